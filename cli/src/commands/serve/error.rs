//! # API Error Responses
//!
//! File: cli/src/commands/serve/error.rs
//!
//! Maps failures of the HTTP layer onto status codes. Every error body has the
//! shape `{"error": "<message>"}`.
//!
use crate::core::error::{ProjgitError, ProvisionError};
use crate::core::token::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Error returned by handlers and the auth middleware.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// 400
    #[error("{0}")]
    BadRequest(String),

    /// 404
    #[error("{0}")]
    NotFound(String),

    /// 500
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status sent for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProvisionError> for ApiError {
    fn from(err: ProvisionError) -> Self {
        if err.is_validation() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<ProjgitError> for ApiError {
    fn from(err: ProjgitError) -> Self {
        match err {
            ProjgitError::ClientNotFound { .. } | ProjgitError::ProjectNotFound { .. } => {
                ApiError::NotFound(err.to_string())
            }
            ProjgitError::InvalidIdentifier(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(AuthError::Expired).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(ProvisionError::Validation("Client and project are required.".into()))
                .status(),
            StatusCode::BAD_REQUEST
        );
        let not_found = ApiError::from(ProjgitError::ClientNotFound {
            client: "ghost".into(),
        });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "The client 'ghost' does not exist.");
    }

    #[test]
    fn test_auth_message_is_passed_through() {
        assert_eq!(
            ApiError::from(AuthError::MissingToken).to_string(),
            "Bearer token required."
        );
    }
}
