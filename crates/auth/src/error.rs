//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token validation failed.
    #[error("Token validation failed: {0}")]
    TokenValidation(String),

    /// Token encoding failed.
    #[error("Token encoding failed: {0}")]
    TokenEncoding(String),

    /// Token expired.
    #[error("Token expired")]
    TokenExpired,

    /// Invalid token.
    #[error("Invalid token")]
    InvalidToken,
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            jsonwebtoken::errors::ErrorKind::InvalidToken => AuthError::InvalidToken,
            _ => AuthError::TokenValidation(e.to_string()),
        }
    }
}

/// Result type for token operations.
pub type AuthResult<T> = Result<T, AuthError>;
