use std::fmt;

use thiserror::Error;

use crate::account::validation::FieldErrors;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for CardId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CardIdError {
    #[error("Card ID is required")]
    Empty,

    #[error("Card ID too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Field guarded by a storage-level unique constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    CardId,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Email => "email",
            UniqueField::CardId => "cardId",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by an account store implementation
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Unique constraint violated on {field}")]
    UniquenessViolation { field: UniqueField },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Stored record is corrupted: {0}")]
    Corrupted(String),
}

/// Error for notification dispatch
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Failed to serialize notification: {0}")]
    SerializationFailed(String),

    #[error("Failed to publish notification: {0}")]
    PublishFailed(String),
}

/// Top-level error for registration and login.
///
/// Caller errors carry enough detail to build a field-keyed response.
/// Infrastructure errors carry nothing the caller should see; their detail is
/// logged where they are raised.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Validation failed: {0}")]
    ValidationFailed(FieldErrors),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Card ID already exists: {0}")]
    DuplicateCardId(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Password is incorrect")]
    InvalidPassword,

    #[error("Could not register account")]
    PersistenceFailed,

    #[error("Could not process password")]
    HashingFailed,

    #[error("Could not issue session token")]
    SigningFailed,

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AccountError {
    /// Request field the error refers to, for caller errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AccountError::DuplicateEmail(_) | AccountError::AccountNotFound(_) => Some("email"),
            AccountError::DuplicateCardId(_) => Some("cardId"),
            AccountError::InvalidPassword => Some("password"),
            _ => None,
        }
    }

    /// True for failures caused by infrastructure rather than the request.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AccountError::PersistenceFailed
                | AccountError::HashingFailed
                | AccountError::SigningFailed
                | AccountError::Unknown(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_errors_name_their_field() {
        assert_eq!(
            AccountError::DuplicateEmail("a@b.c".into()).field(),
            Some("email")
        );
        assert_eq!(
            AccountError::DuplicateCardId("123".into()).field(),
            Some("cardId")
        );
        assert_eq!(
            AccountError::AccountNotFound("a@b.c".into()).field(),
            Some("email")
        );
        assert_eq!(AccountError::InvalidPassword.field(), Some("password"));
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        for err in [
            AccountError::PersistenceFailed,
            AccountError::HashingFailed,
            AccountError::SigningFailed,
        ] {
            assert!(err.is_internal());
            assert!(err.field().is_none());
        }

        assert!(!AccountError::InvalidPassword.is_internal());
    }
}
