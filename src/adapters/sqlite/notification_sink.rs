//! SQLite adapter for the NotificationSink port.
//!
//! The dashboard's notification feed is a table in the managed data
//! platform; transport to devices happens elsewhere. Writing the row is all
//! the engine owes the pipeline.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::models::notification::Notification;
use crate::domain::ports::notification_sink::NotificationSink;

#[derive(Clone)]
pub struct SqliteNotificationSink {
    pool: SqlitePool,
}

impl SqliteNotificationSink {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationSink for SqliteNotificationSink {
    async fn send(&self, notification: &Notification) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO notifications
             (id, recipient_id, organization_id, kind, title, message, link, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        )
        .bind(notification.id.to_string())
        .bind(notification.recipient_id.to_string())
        .bind(notification.organization_id.to_string())
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.link)
        .bind(notification.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
