//! SQLite adapter for InstanceRepository.
//!
//! The materialization idempotency key is a unique index on
//! `(definition_id, personnel_id, deadline)`; a uniqueness conflict on
//! insert is reported as `InsertOutcome::Duplicate`, the expected result of
//! a re-run or of two workers racing for the same key.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::adapters::sqlite::{
    parse_date, parse_datetime, parse_optional_datetime, parse_optional_uuid, parse_time,
    parse_uuid,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::task_instance::{InstanceStatus, TaskInstance};
use crate::domain::ports::instance_repository::{InsertOutcome, InstanceRepository};

#[derive(Clone)]
pub struct SqliteInstanceRepository {
    pool: SqlitePool,
}

impl SqliteInstanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct InstanceRow {
    id: String,
    definition_id: Option<String>,
    organization_id: String,
    personnel_id: String,
    author_id: String,
    name: String,
    description: String,
    deadline: String,
    scheduled_time: String,
    status: String,
    completed_at: Option<String>,
    rating: Option<i64>,
    created_at: String,
    updated_at: String,
}

fn row_to_instance(row: InstanceRow) -> DomainResult<TaskInstance> {
    let status = InstanceStatus::from_str(&row.status).ok_or_else(|| {
        DomainError::SerializationError(format!("Unknown instance status '{}'", row.status))
    })?;

    Ok(TaskInstance {
        id: parse_uuid(&row.id)?,
        definition_id: parse_optional_uuid(row.definition_id)?,
        organization_id: parse_uuid(&row.organization_id)?,
        personnel_id: parse_uuid(&row.personnel_id)?,
        author_id: parse_uuid(&row.author_id)?,
        name: row.name,
        description: row.description,
        deadline: parse_date(&row.deadline)?,
        scheduled_time: parse_time(&row.scheduled_time)?,
        status,
        completed_at: parse_optional_datetime(row.completed_at)?,
        rating: row.rating.map(|r| r as u8),
        created_at: parse_datetime(&row.created_at)?,
        updated_at: parse_datetime(&row.updated_at)?,
    })
}

#[async_trait]
impl InstanceRepository for SqliteInstanceRepository {
    async fn insert(&self, instance: &TaskInstance) -> DomainResult<InsertOutcome> {
        let result = sqlx::query(
            "INSERT INTO task_instances
             (id, definition_id, organization_id, personnel_id, author_id,
              name, description, deadline, scheduled_time, status,
              completed_at, rating, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
        )
        .bind(instance.id.to_string())
        .bind(instance.definition_id.map(|u| u.to_string()))
        .bind(instance.organization_id.to_string())
        .bind(instance.personnel_id.to_string())
        .bind(instance.author_id.to_string())
        .bind(&instance.name)
        .bind(&instance.description)
        .bind(instance.deadline.to_string())
        .bind(instance.scheduled_time.format("%H:%M:%S").to_string())
        .bind(instance.status.as_str())
        .bind(instance.completed_at.map(|t| t.to_rfc3339()))
        .bind(instance.rating.map(i64::from))
        .bind(instance.created_at.to_rfc3339())
        .bind(instance.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Ok(InsertOutcome::Duplicate)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn exists(
        &self,
        definition_id: Uuid,
        personnel_id: Uuid,
        deadline: NaiveDate,
    ) -> DomainResult<bool> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1 FROM task_instances
             WHERE definition_id = ? AND personnel_id = ? AND deadline = ?"
        )
        .bind(definition_id.to_string())
        .bind(personnel_id.to_string())
        .bind(deadline.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<TaskInstance>> {
        let row: Option<InstanceRow> =
            sqlx::query_as("SELECT * FROM task_instances WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(row_to_instance).transpose()
    }

    async fn list_for_date(&self, deadline: NaiveDate) -> DomainResult<Vec<TaskInstance>> {
        let rows: Vec<InstanceRow> = sqlx::query_as(
            "SELECT * FROM task_instances WHERE deadline = ? ORDER BY created_at"
        )
        .bind(deadline.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_instance).collect()
    }

    async fn close(
        &self,
        id: Uuid,
        completed_at: DateTime<Utc>,
        rating: Option<u8>,
    ) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE task_instances
             SET status = 'closed', completed_at = ?2, rating = ?3, updated_at = ?4
             WHERE id = ?1 AND status = 'open'"
        )
        .bind(id.to_string())
        .bind(completed_at.to_rfc3339())
        .bind(rating.map(i64::from))
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::InstanceNotFound(id));
        }
        Ok(())
    }
}
