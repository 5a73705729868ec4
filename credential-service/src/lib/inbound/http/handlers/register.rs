use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::models::Role;
use crate::account::models::Secret;
use crate::account::validation::RegistrationForm;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let command = body
        .into_form()
        .validate()
        .map_err(AccountError::ValidationFailed)?;

    state
        .credential_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for registration (raw JSON).
///
/// Missing fields deserialize as empty so validation can report them by name.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    card_id: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    street: String,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    admin_key: Option<String>,
}

impl RegisterRequest {
    fn into_form(self) -> RegistrationForm {
        RegistrationForm {
            card_id: self.card_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: Secret::new(self.password),
            city: self.city,
            street: self.street,
            role: self.role,
            admin_key: self.admin_key.map(Secret::new),
        }
    }
}
