//! SQLite adapter for the PersonnelDirectory port.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::adapters::sqlite::{parse_datetime, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::personnel::{Personnel, PersonnelRole};
use crate::domain::ports::personnel_directory::PersonnelDirectory;

#[derive(Clone)]
pub struct SqlitePersonnelDirectory {
    pool: SqlitePool,
}

impl SqlitePersonnelDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PersonnelRow {
    id: String,
    organization_id: String,
    name: String,
    role: String,
    created_at: String,
    updated_at: String,
}

fn row_to_personnel(row: PersonnelRow) -> DomainResult<Personnel> {
    let role = PersonnelRole::from_str(&row.role).ok_or_else(|| {
        DomainError::SerializationError(format!("Unknown personnel role '{}'", row.role))
    })?;

    Ok(Personnel {
        id: parse_uuid(&row.id)?,
        organization_id: parse_uuid(&row.organization_id)?,
        name: row.name,
        role,
        created_at: parse_datetime(&row.created_at)?,
        updated_at: parse_datetime(&row.updated_at)?,
    })
}

#[async_trait]
impl PersonnelDirectory for SqlitePersonnelDirectory {
    async fn add(&self, person: &Personnel) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO personnel (id, organization_id, name, role, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
        )
        .bind(person.id.to_string())
        .bind(person.organization_id.to_string())
        .bind(&person.name)
        .bind(person.role.as_str())
        .bind(person.created_at.to_rfc3339())
        .bind(person.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_personnel(&self, organization_id: Uuid) -> DomainResult<Vec<Personnel>> {
        let rows: Vec<PersonnelRow> = sqlx::query_as(
            "SELECT * FROM personnel WHERE organization_id = ? ORDER BY name"
        )
        .bind(organization_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_personnel).collect()
    }

    async fn list_by_role(
        &self,
        organization_id: Uuid,
        role: PersonnelRole,
    ) -> DomainResult<Vec<Personnel>> {
        let rows: Vec<PersonnelRow> = sqlx::query_as(
            "SELECT * FROM personnel WHERE organization_id = ? AND role = ? ORDER BY name"
        )
        .bind(organization_id.to_string())
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_personnel).collect()
    }

    async fn personnel_exists(&self, id: Uuid) -> DomainResult<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM personnel WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }
}
