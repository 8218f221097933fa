//! Port for the notification sink (external collaborator).
//!
//! Dispatch is fire-and-forget from the engine's perspective; delivery
//! guarantees beyond best effort are the dashboard's concern.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::notification::Notification;

#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Hand a notification to the dashboard's delivery pipeline.
    async fn send(&self, notification: &Notification) -> DomainResult<()>;
}
