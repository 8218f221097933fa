//! Exception resolution service.
//!
//! Decides, for one definition/date/assignee, whether generation proceeds
//! unchanged, is redirected to a delegate, or is suppressed. The whole-day
//! skip check is separate so the materializer can evaluate it once per
//! definition instead of once per assignee.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::ports::exception_store::ExceptionStore;

/// Outcome of exception resolution for a single candidate assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionOutcome {
    /// No exception applies; generate for the original assignee.
    Proceed(Uuid),
    /// A leave date names a delegate; generate for the delegate instead.
    Redirect(Uuid),
    /// A leave date without delegate; generate nothing for this assignee.
    Suppress,
}

impl ExceptionOutcome {
    /// The assignee the instance should be created for, if any.
    pub fn final_assignee(&self) -> Option<Uuid> {
        match self {
            Self::Proceed(id) | Self::Redirect(id) => Some(*id),
            Self::Suppress => None,
        }
    }
}

#[derive(Clone)]
pub struct ExceptionResolver {
    exceptions: Arc<dyn ExceptionStore>,
}

impl ExceptionResolver {
    pub fn new(exceptions: Arc<dyn ExceptionStore>) -> Self {
        Self { exceptions }
    }

    /// Whether a skip date suppresses all generation for this definition
    /// and date. Takes precedence over any leave dates.
    pub async fn day_skipped(&self, definition_id: Uuid, date: NaiveDate) -> DomainResult<bool> {
        self.exceptions.skip_exists(definition_id, date).await
    }

    /// Resolve the leave exception for one candidate assignee.
    ///
    /// Delegation is single level: a delegate who is themselves on leave
    /// that day is not re-resolved.
    pub async fn resolve_assignee(
        &self,
        definition_id: Uuid,
        date: NaiveDate,
        assignee_id: Uuid,
    ) -> DomainResult<ExceptionOutcome> {
        match self.exceptions.leave_for(definition_id, assignee_id, date).await? {
            None => Ok(ExceptionOutcome::Proceed(assignee_id)),
            Some(leave) => match leave.delegate_id {
                Some(delegate) => Ok(ExceptionOutcome::Redirect(delegate)),
                None => Ok(ExceptionOutcome::Suppress),
            },
        }
    }
}
