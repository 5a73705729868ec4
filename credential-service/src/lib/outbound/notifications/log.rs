use async_trait::async_trait;

use crate::account::errors::NotifierError;
use crate::account::events::Notification;
use crate::account::ports::Notifier;

/// Notifier that writes rendered messages to the log instead of sending them.
///
/// Used when notifications are disabled and in local development.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifierError> {
        tracing::info!(
            kind = notification.kind.as_str(),
            event_id = %notification.event_id,
            account_id = %notification.account_id,
            to = %notification.recipient,
            subject = notification.subject(),
            body = %notification.body(),
            "Notification (not sent)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::account::events::NotificationKind;

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        let notification = Notification {
            event_id: "evt-1".to_string(),
            kind: NotificationKind::Login,
            account_id: "acc-1".to_string(),
            recipient: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            occurred_at: Utc::now(),
        };

        assert!(LogNotifier::new().notify(&notification).await.is_ok());
    }
}
