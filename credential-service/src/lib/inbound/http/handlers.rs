use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::Role;
use crate::account::validation::FieldErrors;

pub mod current_session;
pub mod login;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(ApiErrorData),
    UnprocessableEntity(ApiErrorData),
    NotFound(ApiErrorData),
    Conflict(ApiErrorData),
    Unauthorized(ApiErrorData),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, data) = match self {
            ApiError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ApiErrorData::new(msg))
            }
            ApiError::BadRequest(data) => (StatusCode::BAD_REQUEST, data),
            ApiError::UnprocessableEntity(data) => (StatusCode::UNPROCESSABLE_ENTITY, data),
            ApiError::NotFound(data) => (StatusCode::NOT_FOUND, data),
            ApiError::Conflict(data) => (StatusCode::CONFLICT, data),
            ApiError::Unauthorized(data) => (StatusCode::UNAUTHORIZED, data),
        };

        (status, Json(ApiResponseBody::new_error(status, data))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let field_error = |message: &str| match err.field() {
            Some(field) => ApiErrorData::with_field(field, message),
            None => ApiErrorData::new(message.to_string()),
        };

        match &err {
            AccountError::ValidationFailed(errors) => ApiError::UnprocessableEntity(ApiErrorData {
                message: "Validation failed".to_string(),
                errors: errors.clone(),
            }),
            AccountError::DuplicateEmail(_) => {
                ApiError::Conflict(field_error("Email already exists"))
            }
            AccountError::DuplicateCardId(_) => {
                ApiError::Conflict(field_error("Card ID already exists"))
            }
            AccountError::AccountNotFound(_) => ApiError::NotFound(field_error("Account not found")),
            AccountError::InvalidPassword => {
                ApiError::Unauthorized(field_error("Password is incorrect"))
            }
            AccountError::PersistenceFailed
            | AccountError::HashingFailed
            | AccountError::SigningFailed => ApiError::InternalServerError(err.to_string()),
            AccountError::Unknown(_) => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            success: true,
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, data: ApiErrorData) -> Self {
        Self {
            success: false,
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}

impl ApiErrorData {
    pub fn new(message: String) -> Self {
        Self {
            message,
            errors: FieldErrors::new(),
        }
    }

    /// Error tied to one request field. The message doubles as the field's entry.
    pub fn with_field(field: &str, message: &str) -> Self {
        Self {
            message: message.to_string(),
            errors: FieldErrors::single(field, message),
        }
    }
}

/// Outward representation of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub id: String,
    pub card_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub street: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            card_id: account.card_id.as_str().to_string(),
            email: account.email.as_str().to_string(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            city: account.city.clone(),
            street: account.street.clone(),
            role: account.role,
            created_at: account.created_at,
        }
    }
}
