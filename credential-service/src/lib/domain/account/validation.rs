//! Structural checks on registration and login input.
//!
//! Every rule runs, so a single response lists all offending fields keyed by
//! their external (camelCase) names.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::account::models::CardId;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::Role;
use crate::account::models::Secret;

pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 30;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 30;
pub const ADDRESS_MAX_LENGTH: usize = 128;

/// Field-keyed validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding one message.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record a message. The first message for a field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Raw registration input as received from a client.
pub struct RegistrationForm {
    pub card_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Secret,
    pub city: String,
    pub street: String,
    pub role: Option<Role>,
    pub admin_key: Option<Secret>,
}

impl RegistrationForm {
    /// Validate every field and build a registration command.
    ///
    /// # Errors
    /// All failing fields, keyed by their external names
    pub fn validate(self) -> Result<RegisterAccountCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let card_id = CardId::new(self.card_id)
            .map_err(|e| errors.insert("cardId", e.to_string()))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|_| errors.insert("email", "Email is invalid"))
            .ok();

        let first_name = check_name(&mut errors, "firstName", "First name", self.first_name);
        let last_name = check_name(&mut errors, "lastName", "Last name", self.last_name);
        let city = check_required(&mut errors, "city", "City", self.city);
        let street = check_required(&mut errors, "street", "Street", self.street);
        check_password(&mut errors, &self.password);

        match (card_id, email) {
            (Some(card_id), Some(email)) if errors.is_empty() => Ok(RegisterAccountCommand {
                card_id,
                email,
                password: self.password,
                first_name,
                last_name,
                city,
                street,
                requested_role: self.role.unwrap_or_default(),
                admin_key: self.admin_key,
            }),
            _ => Err(errors),
        }
    }
}

/// Raw login input as received from a client.
pub struct LoginForm {
    pub email: String,
    pub password: Secret,
}

impl LoginForm {
    /// Validate the credentials' shape and build a login command.
    ///
    /// Only presence and format are checked here; length rules apply to
    /// registration.
    pub fn validate(self) -> Result<LoginCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = if self.email.trim().is_empty() {
            errors.insert("email", "Email field is required");
            None
        } else {
            EmailAddress::new(self.email)
                .map_err(|_| errors.insert("email", "Email is invalid"))
                .ok()
        };

        if self.password.is_empty() {
            errors.insert("password", "Password field is required");
        }

        match email {
            Some(email) if errors.is_empty() => Ok(LoginCommand {
                email,
                password: self.password,
            }),
            _ => Err(errors),
        }
    }
}

fn check_required(errors: &mut FieldErrors, field: &str, label: &str, value: String) -> String {
    let value = value.trim().to_string();
    let length = value.chars().count();

    if length == 0 {
        errors.insert(field, format!("{} field is required", label));
    } else if length > ADDRESS_MAX_LENGTH {
        errors.insert(
            field,
            format!("{} must be at most {} characters", label, ADDRESS_MAX_LENGTH),
        );
    }
    value
}

fn check_name(errors: &mut FieldErrors, field: &str, label: &str, value: String) -> String {
    let value = value.trim().to_string();
    let length = value.chars().count();

    if length == 0 {
        errors.insert(field, format!("{} field is required", label));
    } else if !(NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&length) {
        errors.insert(
            field,
            format!(
                "{} must be between {} and {} characters",
                label, NAME_MIN_LENGTH, NAME_MAX_LENGTH
            ),
        );
    }
    value
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    let length = password.chars().count();

    if length == 0 {
        errors.insert("password", "Password field is required");
    } else if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
        errors.insert(
            "password",
            format!(
                "Password must be between {} and {} characters",
                PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH
            ),
        );
    }
}
