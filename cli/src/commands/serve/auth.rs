//! # Bearer Token Guard
//!
//! File: cli/src/commands/serve/auth.rs
//!
//! Middleware applied to every `/api/*` route. The request only reaches its
//! handler (and therefore the filesystem) once the `Authorization: Bearer`
//! token has a valid signature and has not expired.
//!
use super::error::ApiError;
use super::AppState;
use crate::core::token::{bearer_token, validate_token};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// # Require Bearer (`require_bearer`)
///
/// Installed with `axum::middleware::from_fn_with_state` on the `/api` router.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` (401) if:
/// - The `Authorization` header is missing, not UTF-8, or not `Bearer <token>`.
/// - The signature does not verify against `state.app_key`.
/// - The token carries an `exp` that has passed.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    // Header shape first, then signature and expiry.
    let token = bearer_token(header_value)?;
    let claims = validate_token(token, &state.app_key)?;

    debug!(
        "Authenticated '{}' for {} {}",
        claims.identifier,
        request.method(),
        request.uri().path()
    );
    Ok(next.run(request).await)
}
