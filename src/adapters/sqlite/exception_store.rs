//! SQLite adapter for the ExceptionStore port.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::adapters::sqlite::{parse_date, parse_datetime, parse_optional_uuid, parse_uuid};
use crate::domain::errors::DomainResult;
use crate::domain::models::exception::{LeaveDate, SkipDate};
use crate::domain::ports::exception_store::ExceptionStore;

#[derive(Clone)]
pub struct SqliteExceptionStore {
    pool: SqlitePool,
}

impl SqliteExceptionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LeaveDateRow {
    definition_id: String,
    personnel_id: String,
    date: String,
    delegate_id: Option<String>,
    created_at: String,
}

fn row_to_leave(row: LeaveDateRow) -> DomainResult<LeaveDate> {
    Ok(LeaveDate {
        definition_id: parse_uuid(&row.definition_id)?,
        personnel_id: parse_uuid(&row.personnel_id)?,
        date: parse_date(&row.date)?,
        delegate_id: parse_optional_uuid(row.delegate_id)?,
        created_at: parse_datetime(&row.created_at)?,
    })
}

#[async_trait]
impl ExceptionStore for SqliteExceptionStore {
    async fn add_skip(&self, skip: &SkipDate) -> DomainResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO skip_dates (definition_id, date, created_at)
             VALUES (?1, ?2, ?3)"
        )
        .bind(skip.definition_id.to_string())
        .bind(skip.date.to_string())
        .bind(skip.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn add_leave(&self, leave: &LeaveDate) -> DomainResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO leave_dates
             (definition_id, personnel_id, date, delegate_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)"
        )
        .bind(leave.definition_id.to_string())
        .bind(leave.personnel_id.to_string())
        .bind(leave.date.to_string())
        .bind(leave.delegate_id.map(|u| u.to_string()))
        .bind(leave.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn skip_exists(&self, definition_id: Uuid, date: NaiveDate) -> DomainResult<bool> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1 FROM skip_dates WHERE definition_id = ? AND date = ?"
        )
        .bind(definition_id.to_string())
        .bind(date.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    async fn leave_for(
        &self,
        definition_id: Uuid,
        personnel_id: Uuid,
        date: NaiveDate,
    ) -> DomainResult<Option<LeaveDate>> {
        let row: Option<LeaveDateRow> = sqlx::query_as(
            "SELECT * FROM leave_dates
             WHERE definition_id = ? AND personnel_id = ? AND date = ?"
        )
        .bind(definition_id.to_string())
        .bind(personnel_id.to_string())
        .bind(date.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_leave).transpose()
    }
}
