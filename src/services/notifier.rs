//! Dispatch notifier service.
//!
//! Thin wrapper over the notification sink. Dispatch is best-effort: a
//! failed send is logged and swallowed, never propagated into the
//! materializer's control flow.

use std::sync::Arc;

use tracing::warn;

use crate::domain::models::notification::Notification;
use crate::domain::models::task_definition::TaskDefinition;
use crate::domain::models::task_instance::TaskInstance;
use crate::domain::ports::notification_sink::NotificationSink;

#[derive(Clone)]
pub struct DispatchNotifier {
    sink: Arc<dyn NotificationSink>,
}

impl DispatchNotifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Emit the assignment notification for a freshly created instance.
    ///
    /// Returns whether the send succeeded so the run report can count it.
    pub async fn task_assigned(
        &self,
        definition: &TaskDefinition,
        instance: &TaskInstance,
    ) -> bool {
        let notification = Notification::task_assigned(definition, instance);
        match self.sink.send(&notification).await {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    recipient_id = %notification.recipient_id,
                    instance_id = %instance.id,
                    error = %err,
                    "Failed to dispatch assignment notification"
                );
                false
            }
        }
    }
}
