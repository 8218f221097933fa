//! Port for skip date and leave date lookups.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::exception::{LeaveDate, SkipDate};

#[async_trait]
pub trait ExceptionStore: Send + Sync {
    /// Record a skip date (seeding/operator surface).
    async fn add_skip(&self, skip: &SkipDate) -> DomainResult<()>;

    /// Record a leave date (seeding/operator surface).
    async fn add_leave(&self, leave: &LeaveDate) -> DomainResult<()>;

    /// Whether a skip date exists for `(definition, date)`.
    async fn skip_exists(&self, definition_id: Uuid, date: NaiveDate) -> DomainResult<bool>;

    /// The leave date for `(definition, personnel, date)`, if any.
    async fn leave_for(
        &self,
        definition_id: Uuid,
        personnel_id: Uuid,
        date: NaiveDate,
    ) -> DomainResult<Option<LeaveDate>>;
}
