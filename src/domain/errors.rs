//! Domain errors for the cadence materialization engine.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors that can occur in the cadence system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Task definition not found: {0}")]
    DefinitionNotFound(Uuid),

    #[error("Task instance not found: {0}")]
    InstanceNotFound(Uuid),

    #[error("Personnel not found: {0}")]
    PersonnelNotFound(Uuid),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Worker timed out after {secs}s")]
    WorkerTimeout { secs: u64 },

    #[error("Notification dispatch failed: {0}")]
    NotificationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
