//! Personnel directory domain model.
//!
//! The directory itself is owned by the wider dashboard; the engine reads
//! fresh snapshots through the `PersonnelDirectory` port at run time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a person holds within their organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonnelRole {
    Owner,
    Manager,
    Personnel,
}

impl PersonnelRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::Personnel => "personnel",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "owner" => Some(Self::Owner),
            "manager" => Some(Self::Manager),
            "personnel" => Some(Self::Personnel),
            _ => None,
        }
    }
}

/// A personnel directory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personnel {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub role: PersonnelRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Personnel {
    pub fn new(organization_id: Uuid, name: impl Into<String>, role: PersonnelRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            organization_id,
            name: name.into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }
}
