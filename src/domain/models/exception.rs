//! Generation exception domain models.
//!
//! Skip dates suppress all generation for a definition on one date.
//! Leave dates suppress or redirect generation for a single assignee.
//! Both are written by the dashboard's CRUD surface; the engine only reads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A definition-wide, date-specific override suppressing all generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipDate {
    pub definition_id: Uuid,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl SkipDate {
    pub fn new(definition_id: Uuid, date: NaiveDate) -> Self {
        Self { definition_id, date, created_at: Utc::now() }
    }
}

/// A per-person, date-specific override for one assignee.
///
/// With a delegate, generation is redirected to the delegate; without one,
/// generation for the assignee is suppressed. Delegation is single level:
/// a delegate who is themselves on leave that day is not re-resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveDate {
    pub definition_id: Uuid,
    pub personnel_id: Uuid,
    pub date: NaiveDate,
    pub delegate_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl LeaveDate {
    pub fn new(definition_id: Uuid, personnel_id: Uuid, date: NaiveDate) -> Self {
        Self {
            definition_id,
            personnel_id,
            date,
            delegate_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_delegate(mut self, delegate_id: Uuid) -> Self {
        self.delegate_id = Some(delegate_id);
        self
    }
}
