//! Port trait definitions (Hexagonal Architecture).
//!
//! The engine talks to the outside world only through these traits;
//! `adapters` provides the SQLite-backed implementations.

pub mod definition_repository;
pub mod exception_store;
pub mod instance_repository;
pub mod notification_sink;
pub mod personnel_directory;

pub use definition_repository::DefinitionRepository;
pub use exception_store::ExceptionStore;
pub use instance_repository::{InsertOutcome, InstanceRepository};
pub use notification_sink::NotificationSink;
pub use personnel_directory::PersonnelDirectory;
