//! Cadence - Recurring Task Materialization Engine
//!
//! Cadence expands recurring task definitions into concrete, assignee-specific
//! task instances once per calendar day, honoring per-person leave exceptions
//! (with optional delegates) and whole-day skip exceptions, while remaining
//! safe to re-run without duplicating work.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure business logic, models, and ports
//! - **Service Layer** (`services`): Resolution and materialization services
//! - **Adapter Layer** (`adapters`): SQLite-backed port implementations
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use cadence::services::Materializer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Build a Materializer over the SQLite adapters and run it for today.
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ConfigLoader};
pub use domain::models::{
    Assignment, Config, DatabaseConfig, InstanceStatus, LeaveDate, LoggingConfig,
    MaterializerSettings, Notification, NotificationKind, Personnel, PersonnelRole, Recurrence,
    RunItemError, RunReport, SkipDate, TaskDefinition, TaskInstance,
};
pub use domain::ports::{
    DefinitionRepository, ExceptionStore, InsertOutcome, InstanceRepository, NotificationSink,
    PersonnelDirectory,
};
pub use services::{
    AssigneeResolver, DispatchNotifier, ExceptionOutcome, ExceptionResolver, Materializer,
    MaterializerConfig,
};
