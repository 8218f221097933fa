//! Repository port for task instance persistence.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::task_instance::TaskInstance;

/// Result of an insert against the materialization idempotency key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The instance was inserted.
    Created,
    /// An instance with the same `(definition_id, personnel_id, deadline)`
    /// already exists. Expected when a re-run or a concurrent worker got
    /// there first; never an error.
    Duplicate,
}

#[async_trait]
pub trait InstanceRepository: Send + Sync {
    /// Insert an instance, enforcing the materialization idempotency key.
    ///
    /// Implementations must treat a storage-level uniqueness conflict on
    /// `(definition_id, personnel_id, deadline)` as `Duplicate`, not as an
    /// error.
    async fn insert(&self, instance: &TaskInstance) -> DomainResult<InsertOutcome>;

    /// Whether an engine-generated instance exists for the key.
    async fn exists(
        &self,
        definition_id: Uuid,
        personnel_id: Uuid,
        deadline: NaiveDate,
    ) -> DomainResult<bool>;

    /// Get an instance by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<TaskInstance>>;

    /// List all instances with the given deadline date.
    async fn list_for_date(&self, deadline: NaiveDate) -> DomainResult<Vec<TaskInstance>>;

    /// Close an instance (the closure workflow's storage contract).
    async fn close(
        &self,
        id: Uuid,
        completed_at: DateTime<Utc>,
        rating: Option<u8>,
    ) -> DomainResult<()>;
}
