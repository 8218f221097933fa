//! Port for the personnel directory (external collaborator).
//!
//! The directory is always queried at call time; resolved assignee sets are
//! never cached across runs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::personnel::{Personnel, PersonnelRole};

#[async_trait]
pub trait PersonnelDirectory: Send + Sync {
    /// Add a personnel record (seeding/tests; the directory CRUD itself is
    /// owned by the dashboard).
    async fn add(&self, person: &Personnel) -> DomainResult<()>;

    /// List all personnel in an organization.
    async fn list_personnel(&self, organization_id: Uuid) -> DomainResult<Vec<Personnel>>;

    /// List personnel currently holding a role within an organization.
    async fn list_by_role(
        &self,
        organization_id: Uuid,
        role: PersonnelRole,
    ) -> DomainResult<Vec<Personnel>>;

    /// Whether a personnel record exists.
    async fn personnel_exists(&self, id: Uuid) -> DomainResult<bool>;
}
