//! Notification domain model.
//!
//! Write-only output of the engine: one notification per created instance,
//! dispatched best-effort. Transport is the dashboard's concern; the engine
//! only hands records to the sink port.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task_definition::TaskDefinition;
use super::task_instance::TaskInstance;

/// Kind of notification emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    TaskAssigned,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "task_assigned" => Some(Self::TaskAssigned),
            _ => None,
        }
    }
}

/// A notification addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub organization_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Deep-link into the dashboard, e.g. `/tasks/{instance_id}`.
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build the assignment notification for a freshly materialized instance.
    pub fn task_assigned(definition: &TaskDefinition, instance: &TaskInstance) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_id: instance.personnel_id,
            organization_id: instance.organization_id,
            kind: NotificationKind::TaskAssigned,
            title: definition.name.clone(),
            message: format!(
                "You have been assigned '{}' due {}",
                definition.name, instance.deadline
            ),
            link: Some(format!("/tasks/{}", instance.id)),
            created_at: Utc::now(),
        }
    }
}
