use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;

/// Echo the identity asserted by the caller's session token.
///
/// Answered from the token alone; the store is not consulted.
pub async fn current_session(
    Extension(session): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        SessionData {
            account_id: session.account_id.to_string(),
            first_name: session.first_name,
            last_name: session.last_name,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub account_id: String,
    pub first_name: String,
    pub last_name: String,
}
