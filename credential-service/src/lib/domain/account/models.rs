use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::account::errors::AccountIdError;
use crate::account::errors::CardIdError;
use crate::account::errors::EmailError;
use crate::account::errors::RoleError;

/// Account aggregate entity.
///
/// Created once by registration and never modified afterwards.
#[derive(Clone)]
pub struct Account {
    pub id: AccountId,
    pub card_id: CardId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub street: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("card_id", &self.card_id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("city", &self.city)
            .field("street", &self.street)
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Externally issued personal/card identifier.
///
/// Trimmed, non-empty, at most 64 characters. Unique across accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardId(String);

impl CardId {
    const MAX_LENGTH: usize = 64;

    /// Create a new card ID.
    ///
    /// # Errors
    /// * `Empty` - Value is blank
    /// * `TooLong` - Value exceeds 64 characters
    pub fn new(card_id: String) -> Result<Self, CardIdError> {
        let card_id = card_id.trim();
        let length = card_id.chars().count();

        if length == 0 {
            Err(CardIdError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(CardIdError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(card_id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser and normalized to lowercase, so
/// uniqueness does not depend on the caller's capitalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account privilege level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Standard,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Role::Standard),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plaintext secret supplied by a caller. Wiped from memory on drop.
pub type Secret = Zeroizing<String>;

/// Command to register a new account with validated fields.
pub struct RegisterAccountCommand {
    pub card_id: CardId,
    pub email: EmailAddress,
    pub password: Secret,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub street: String,
    pub requested_role: Role,
    pub admin_key: Option<Secret>,
}

impl fmt::Debug for RegisterAccountCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterAccountCommand")
            .field("card_id", &self.card_id)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("requested_role", &self.requested_role)
            .finish_non_exhaustive()
    }
}

/// Command to log in with an email and plaintext password.
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Secret,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self {
            email,
            password: Secret::new(password),
        }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub account: Account,
    pub issued_at: DateTime<Utc>,
}
