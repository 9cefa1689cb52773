//! Server error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use event_store::EventStoreError;
use serde_json::json;

/// Error codes surfaced in JSON error bodies.
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const AUTHENTICATION_REQUIRED: &str = "AUTHENTICATION_REQUIRED";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication required.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Permission denied.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] EventStoreError),

    /// Authentication error.
    #[error("Auth error: {0}")]
    Auth(#[from] auth::AuthError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST, msg.clone())
            }
            ServerError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, error_codes::RESOURCE_NOT_FOUND, msg.clone())
            }
            ServerError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                error_codes::AUTHENTICATION_REQUIRED,
                "Authentication required".to_string(),
            ),
            ServerError::PermissionDenied(msg) => {
                (StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED, msg.clone())
            }
            ServerError::Store(EventStoreError::NotFound { .. }) => (
                StatusCode::NOT_FOUND,
                error_codes::RESOURCE_NOT_FOUND,
                self.to_string(),
            ),
            ServerError::Store(EventStoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST, msg.clone())
            }
            ServerError::Store(e) => {
                tracing::error!(error = %e, "Store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    e.to_string(),
                )
            }
            ServerError::Auth(e) => (
                StatusCode::UNAUTHORIZED,
                error_codes::AUTHENTICATION_REQUIRED,
                e.to_string(),
            ),
            ServerError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR, msg.clone())
            }
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
