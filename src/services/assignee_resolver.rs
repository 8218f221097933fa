//! Assignee resolution service.
//!
//! Expands an assignment rule into a concrete list of personnel ids against
//! a fresh directory snapshot. Dangling references in `Specific` lists are a
//! data error, not a batch failure: they are dropped and logged.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::task_definition::Assignment;
use crate::domain::ports::personnel_directory::PersonnelDirectory;

#[derive(Clone)]
pub struct AssigneeResolver {
    directory: Arc<dyn PersonnelDirectory>,
}

impl AssigneeResolver {
    pub fn new(directory: Arc<dyn PersonnelDirectory>) -> Self {
        Self { directory }
    }

    /// Expand an assignment rule into personnel ids at call time.
    ///
    /// The directory is queried fresh on every call; results are never
    /// cached across runs. Read-only.
    pub async fn resolve(
        &self,
        assignment: &Assignment,
        organization_id: Uuid,
    ) -> DomainResult<Vec<Uuid>> {
        match assignment {
            Assignment::Specific { personnel_ids } => {
                let mut seen = HashSet::new();
                let mut resolved = Vec::with_capacity(personnel_ids.len());
                for &id in personnel_ids {
                    if !seen.insert(id) {
                        continue;
                    }
                    if self.directory.personnel_exists(id).await? {
                        resolved.push(id);
                    } else {
                        warn!(
                            personnel_id = %id,
                            organization_id = %organization_id,
                            "Dropping assignee no longer present in the personnel directory"
                        );
                    }
                }
                Ok(resolved)
            }
            Assignment::ByRole { role } => {
                let personnel = self.directory.list_by_role(organization_id, *role).await?;
                Ok(personnel.into_iter().map(|p| p.id).collect())
            }
        }
    }
}
