//! SQLite adapter for DefinitionRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

use crate::adapters::sqlite::{parse_datetime, parse_time, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::task_definition::{Assignment, Recurrence, TaskDefinition};
use crate::domain::ports::definition_repository::DefinitionRepository;

#[derive(Clone)]
pub struct SqliteDefinitionRepository {
    pool: SqlitePool,
}

impl SqliteDefinitionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DefinitionRow {
    id: String,
    organization_id: String,
    created_by: String,
    name: String,
    description: String,
    recurrence: String,
    scheduled_time: String,
    assignment: String,
    active: i64,
    created_at: String,
    updated_at: String,
}

fn row_to_definition(row: DefinitionRow) -> DomainResult<TaskDefinition> {
    let recurrence: Recurrence = serde_json::from_str(&row.recurrence)
        .map_err(|e| DomainError::SerializationError(format!("recurrence: {}", e)))?;
    let assignment: Assignment = serde_json::from_str(&row.assignment)
        .map_err(|e| DomainError::SerializationError(format!("assignment: {}", e)))?;

    Ok(TaskDefinition {
        id: parse_uuid(&row.id)?,
        organization_id: parse_uuid(&row.organization_id)?,
        created_by: parse_uuid(&row.created_by)?,
        name: row.name,
        description: row.description,
        recurrence,
        scheduled_time: parse_time(&row.scheduled_time)?,
        assignment,
        active: row.active != 0,
        created_at: parse_datetime(&row.created_at)?,
        updated_at: parse_datetime(&row.updated_at)?,
    })
}

#[async_trait]
impl DefinitionRepository for SqliteDefinitionRepository {
    async fn create(&self, definition: &TaskDefinition) -> DomainResult<()> {
        let recurrence = serde_json::to_string(&definition.recurrence)?;
        let assignment = serde_json::to_string(&definition.assignment)?;

        sqlx::query(
            "INSERT INTO task_definitions
             (id, organization_id, created_by, name, description,
              recurrence, scheduled_time, assignment, active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
        )
        .bind(definition.id.to_string())
        .bind(definition.organization_id.to_string())
        .bind(definition.created_by.to_string())
        .bind(&definition.name)
        .bind(&definition.description)
        .bind(&recurrence)
        .bind(definition.scheduled_time.format("%H:%M:%S").to_string())
        .bind(&assignment)
        .bind(i64::from(definition.active))
        .bind(definition.created_at.to_rfc3339())
        .bind(definition.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<TaskDefinition>> {
        let row: Option<DefinitionRow> =
            sqlx::query_as("SELECT * FROM task_definitions WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(row_to_definition).transpose()
    }

    async fn list_active(&self) -> DomainResult<Vec<TaskDefinition>> {
        let rows: Vec<DefinitionRow> = sqlx::query_as(
            "SELECT * FROM task_definitions WHERE active = 1 ORDER BY created_at"
        )
        .fetch_all(&self.pool)
        .await?;

        // Malformed recurrence/assignment payloads are a data error, not a
        // reason to fail the whole batch: skip the row and keep going.
        let mut definitions = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id.clone();
            match row_to_definition(row) {
                Ok(definition) => definitions.push(definition),
                Err(err) => {
                    warn!(definition_id = %id, error = %err, "Skipping undecodable task definition");
                }
            }
        }
        Ok(definitions)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE task_definitions SET active = ?2, updated_at = ?3 WHERE id = ?1"
        )
        .bind(id.to_string())
        .bind(i64::from(active))
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::DefinitionNotFound(id));
        }
        Ok(())
    }
}
