use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::account::events::Notification;
use crate::account::events::NotificationKind;

/// Serializable envelope handed to the mail relay.
///
/// Infrastructure representation of a domain notification, with the subject
/// and body already rendered so the relay only has to deliver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum NotificationMessage {
    AccountRegistered(EmailMessage),
    AccountLoggedIn(EmailMessage),
}

/// Rendered email plus the identifiers needed for tracing and deduplication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailMessage {
    pub event_id: String,
    pub account_id: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub occurred_at: DateTime<Utc>,
}

impl From<&Notification> for EmailMessage {
    fn from(notification: &Notification) -> Self {
        Self {
            event_id: notification.event_id.clone(),
            account_id: notification.account_id.clone(),
            to: notification.recipient.clone(),
            subject: notification.subject().to_string(),
            body: notification.body(),
            occurred_at: notification.occurred_at,
        }
    }
}

impl From<&Notification> for NotificationMessage {
    fn from(notification: &Notification) -> Self {
        let email = EmailMessage::from(notification);
        match notification.kind {
            NotificationKind::Registration => NotificationMessage::AccountRegistered(email),
            NotificationKind::Login => NotificationMessage::AccountLoggedIn(email),
        }
    }
}
