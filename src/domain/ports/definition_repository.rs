//! Repository port for task definition persistence.
//!
//! Definitions are owned by the dashboard's CRUD surface; the engine only
//! reads them. The write side exists for seeding and tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::task_definition::TaskDefinition;

#[async_trait]
pub trait DefinitionRepository: Send + Sync {
    /// Create a new task definition.
    async fn create(&self, definition: &TaskDefinition) -> DomainResult<()>;

    /// Get a task definition by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<TaskDefinition>>;

    /// List all active definitions across organizations.
    ///
    /// Rows with undecodable recurrence/assignment payloads are skipped
    /// with a data-integrity warning rather than failing the listing.
    async fn list_active(&self) -> DomainResult<Vec<TaskDefinition>>;

    /// Activate or deactivate a definition.
    async fn set_active(&self, id: Uuid, active: bool) -> DomainResult<()>;
}
