//! Run report domain model.
//!
//! The materializer's diagnostic output for one daily run. Per-item errors
//! are collected here instead of aborting the batch; the external scheduler
//! may safely re-invoke the whole run on failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An error isolated to a single definition or assignee unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunItemError {
    pub definition_id: Uuid,
    /// Set when the error was scoped to one assignee's unit of work.
    pub personnel_id: Option<Uuid>,
    pub message: String,
}

impl RunItemError {
    pub fn definition(definition_id: Uuid, message: impl Into<String>) -> Self {
        Self { definition_id, personnel_id: None, message: message.into() }
    }

    pub fn assignee(definition_id: Uuid, personnel_id: Uuid, message: impl Into<String>) -> Self {
        Self { definition_id, personnel_id: Some(personnel_id), message: message.into() }
    }
}

/// Counters and errors for one materialization run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// The calendar date the run materialized.
    pub run_date: Option<NaiveDate>,
    /// Active definitions examined.
    pub definitions_evaluated: usize,
    /// Definitions whose recurrence fired on the run date.
    pub definitions_due: usize,
    /// Due definitions suppressed by a skip date.
    pub definitions_skipped: usize,
    /// Instances inserted this run.
    pub instances_created: usize,
    /// Assignees suppressed by a leave date without delegate.
    pub assignees_suppressed: usize,
    /// Assignees whose instance already existed (re-run or race).
    pub already_materialized: usize,
    /// Notifications dispatched successfully.
    pub notifications_sent: usize,
    /// Notifications that failed to dispatch (logged, never fatal).
    pub notifications_failed: usize,
    /// Per-item errors; never abort the run.
    pub errors: Vec<RunItemError>,
}

impl RunReport {
    pub fn new(run_date: NaiveDate) -> Self {
        Self { run_date: Some(run_date), ..Self::default() }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
