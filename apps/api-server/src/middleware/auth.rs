//! Authentication middleware.

use std::sync::Arc;

use auth::IdentityClaims;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use event_store::EventStore;

use crate::error::ServerError;
use crate::state::AppState;

/// Identity attached to each authenticated request.
///
/// These are the verified claims from the identity provider, not a local
/// user: handlers resolve the local user record through the directory.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    /// Identity-provider user id.
    pub external_id: String,
    /// Email address, when the provider shares it.
    pub email: Option<String>,
    /// Display name, when the provider shares it.
    pub display_name: Option<String>,
}

impl From<IdentityClaims> for AuthenticatedIdentity {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            external_id: claims.sub,
            email: claims.email,
            display_name: claims.name,
        }
    }
}

/// Extracts the bearer token from the Authorization header.
fn extract_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Authentication middleware.
///
/// Extracts the bearer token from the Authorization header, verifies it, and
/// stores the authenticated identity in the request extensions. Requests
/// without a valid token are rejected before any handler runs.
pub async fn auth_middleware<S: EventStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(&request) else {
        return ServerError::AuthenticationRequired.into_response();
    };

    let claims = match state.verifier.verify_token(token) {
        Ok(claims) => claims,
        Err(e) => return ServerError::Auth(e).into_response(),
    };

    request
        .extensions_mut()
        .insert(AuthenticatedIdentity::from(claims));

    next.run(request).await
}
