use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::account::models::AccountId;
use crate::account::service::FIRST_NAME_CLAIM;
use crate::account::service::LAST_NAME_CLAIM;
use crate::inbound::http::router::AppState;

/// Identity taken from a verified session token, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub first_name: String,
    pub last_name: String,
}

/// Middleware that validates session tokens and adds the account to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims: auth::Claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Session token rejected");
        unauthorized("Invalid or expired token")
    })?;

    let account_id = claims
        .sub
        .as_deref()
        .ok_or_else(|| {
            tracing::warn!("Missing 'sub' claim in session token");
            unauthorized("Invalid token format")
        })
        .and_then(|sub| {
            AccountId::from_string(sub).map_err(|e| {
                tracing::warn!(error = %e, "Session token subject is not an account ID");
                unauthorized("Invalid token format")
            })
        })?;

    let first_name = claims.extra_str(FIRST_NAME_CLAIM).unwrap_or_default().to_string();
    let last_name = claims.extra_str(LAST_NAME_CLAIM).unwrap_or_default().to_string();

    req.extensions_mut().insert(AuthenticatedAccount {
        account_id,
        first_name,
        last_name,
    });

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "statusCode": StatusCode::UNAUTHORIZED.as_u16(),
            "data": { "message": message }
        })),
    )
        .into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })
}
