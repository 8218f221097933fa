//! Materialized task instance domain model.
//!
//! An instance is the concrete, assignee-specific unit of work produced for
//! one calendar date. The content fields are snapshots of the definition at
//! generation time; later edits to the definition do not touch them.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task_definition::TaskDefinition;

/// Status of a task instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    /// Awaiting completion by the assignee.
    Open,
    /// Terminal; carries a completion timestamp and an optional rating.
    Closed,
}

impl Default for InstanceStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// A concrete unit of work for one assignee on one date.
///
/// For engine-generated instances, `(definition_id, personnel_id, deadline)`
/// is unique: the storage layer enforces at most one instance per assignee
/// per definition per day. Manually created instances carry no
/// `definition_id` and are not constrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInstance {
    pub id: Uuid,
    /// Originating definition; None for manually created instances.
    pub definition_id: Option<Uuid>,
    pub organization_id: Uuid,
    /// Final assignee, after exception resolution.
    pub personnel_id: Uuid,
    /// The definition's creator, copied at generation time.
    pub author_id: Uuid,
    /// Snapshot of the definition's name at generation time.
    pub name: String,
    /// Snapshot of the definition's description at generation time.
    pub description: String,
    /// The generation date.
    pub deadline: NaiveDate,
    /// Time-of-day component of the deadline.
    pub scheduled_time: NaiveTime,
    pub status: InstanceStatus,
    /// Set when the instance is closed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Optional 1..=5 rating recorded at closure.
    pub rating: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskInstance {
    /// Materialize an instance from a definition for a final assignee.
    pub fn materialize(definition: &TaskDefinition, personnel_id: Uuid, deadline: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            definition_id: Some(definition.id),
            organization_id: definition.organization_id,
            personnel_id,
            author_id: definition.created_by,
            name: definition.name.clone(),
            description: definition.description.clone(),
            deadline,
            scheduled_time: definition.scheduled_time,
            status: InstanceStatus::Open,
            completed_at: None,
            rating: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Close the instance, optionally recording a 1..=5 rating.
    pub fn close(&mut self, rating: Option<u8>) -> Result<(), String> {
        if self.status == InstanceStatus::Closed {
            return Err("Instance is already closed".to_string());
        }
        if let Some(r) = rating {
            if !(1..=5).contains(&r) {
                return Err(format!("Invalid rating {}: must be 1..=5", r));
            }
        }
        self.status = InstanceStatus::Closed;
        self.completed_at = Some(Utc::now());
        self.rating = rating;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.status == InstanceStatus::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::personnel::PersonnelRole;
    use crate::domain::models::task_definition::{Assignment, Recurrence};

    fn sample_definition() -> TaskDefinition {
        TaskDefinition::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Daily standup notes",
            Recurrence::Daily,
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            Assignment::ByRole { role: PersonnelRole::Personnel },
        )
        .with_description("Write up the standup notes for the team.")
    }

    #[test]
    fn materialize_snapshots_definition_content() {
        let def = sample_definition();
        let assignee = Uuid::new_v4();
        let deadline = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();

        let instance = TaskInstance::materialize(&def, assignee, deadline);

        assert_eq!(instance.definition_id, Some(def.id));
        assert_eq!(instance.personnel_id, assignee);
        assert_eq!(instance.author_id, def.created_by);
        assert_eq!(instance.name, def.name);
        assert_eq!(instance.description, def.description);
        assert_eq!(instance.deadline, deadline);
        assert_eq!(instance.scheduled_time, def.scheduled_time);
        assert_eq!(instance.status, InstanceStatus::Open);
        assert!(instance.completed_at.is_none());
    }

    #[test]
    fn close_stamps_completion() {
        let def = sample_definition();
        let mut instance = TaskInstance::materialize(
            &def,
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
        );

        instance.close(Some(4)).unwrap();
        assert!(instance.is_closed());
        assert!(instance.completed_at.is_some());
        assert_eq!(instance.rating, Some(4));

        // Closing twice is rejected
        assert!(instance.close(None).is_err());
    }

    #[test]
    fn close_rejects_out_of_range_rating() {
        let def = sample_definition();
        let mut instance = TaskInstance::materialize(
            &def,
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
        );

        assert!(instance.close(Some(0)).is_err());
        assert!(instance.close(Some(6)).is_err());
        assert!(instance.close(Some(5)).is_ok());
    }
}
