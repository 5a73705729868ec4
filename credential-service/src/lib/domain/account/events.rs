use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use uuid::Uuid;

use crate::account::models::Account;

/// What happened to trigger a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Registration,
    Login,
}

impl NotificationKind {
    /// Get the kind name.
    ///
    /// # Returns
    /// "registration" or "login"
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Registration => "registration",
            NotificationKind::Login => "login",
        }
    }
}

/// Best-effort message to an account holder.
///
/// Carries a snapshot of the recipient's details so delivery never needs to
/// read the store again.
#[derive(Debug, Clone)]
pub struct Notification {
    pub event_id: String,
    pub kind: NotificationKind,
    pub account_id: String,
    pub recipient: String,
    pub first_name: String,
    pub occurred_at: DateTime<Utc>,
}

impl Notification {
    /// Create a welcome notification for a newly registered account.
    pub fn registration(account: &Account) -> Self {
        Self::new(NotificationKind::Registration, account, account.created_at)
    }

    /// Create a login alert stamped with the token issuance time.
    pub fn login(account: &Account, issued_at: DateTime<Utc>) -> Self {
        Self::new(NotificationKind::Login, account, issued_at)
    }

    fn new(kind: NotificationKind, account: &Account, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            kind,
            account_id: account.id.to_string(),
            recipient: account.email.as_str().to_string(),
            first_name: account.first_name.clone(),
            occurred_at,
        }
    }

    pub fn subject(&self) -> &'static str {
        match self.kind {
            NotificationKind::Registration => "Registration successful",
            NotificationKind::Login => "Login alert",
        }
    }

    /// Render the plain-text message body.
    pub fn body(&self) -> String {
        match self.kind {
            NotificationKind::Registration => format!(
                "Dear {}! Your registration finished successfully.\nWelcome aboard.\nThank you!",
                self.first_name
            ),
            NotificationKind::Login => format!(
                "Dear {}, you have logged in successfully at {}",
                self.first_name,
                self.occurred_at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
        }
    }
}
