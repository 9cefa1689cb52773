//! API endpoints.

pub mod events;
pub mod reviews;
pub mod users;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use entities::User;
use event_store::EventStore;

use crate::error::{ServerError, ServerResult};
use crate::middleware::{AuthenticatedIdentity, auth_middleware};
use crate::state::{AppState, SharedState};

/// Creates the API router with all endpoints.
pub fn create_router<S: EventStore + 'static>(state: SharedState<S>) -> Router {
    let api = Router::new()
        // User endpoints
        .route("/api/users/sync", post(users::sync_user))
        // Event endpoints
        .route("/api/events", get(events::list_events).post(events::create_event))
        .route("/api/events/my-events", get(events::my_events))
        .route("/api/events/:id", get(events::get_event).put(events::update_event))
        .route("/api/events/:id/attend", post(events::attend_event))
        .route("/api/events/:id/cancel", post(events::cancel_attendance))
        // Review endpoints
        .route(
            "/api/reviews/:event_id",
            get(reviews::list_event_reviews).post(reviews::submit_review),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S>,
        ));

    Router::new()
        .merge(api)
        // Health check
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Resolves the caller's local user record from their verified identity.
///
/// An identity that never hit `/api/users/sync` has no local record yet and
/// resolves to a 404, as the original client flow expects.
pub(crate) async fn current_user<S: EventStore>(
    state: &AppState<S>,
    identity: &AuthenticatedIdentity,
) -> ServerResult<User> {
    state
        .store
        .get_user_by_external_id(&identity.external_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))
}
