//! Plaza API Server
//!
//! The API server exposes the community-events REST surface: user directory
//! sync, event creation and listings, RSVP state, and reviews. Identity is
//! verified at the boundary; the stores behind the handlers carry the domain
//! invariants.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use auth::{TokenVerifier, VerifierConfig};
use axum::Router;
use event_store::EventStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::state::{AppState, SharedState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app<S: EventStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state with the given configuration and store.
pub fn create_state<S: EventStore>(config: &Config, store: S) -> SharedState<S> {
    let verifier = TokenVerifier::new(
        VerifierConfig::new(&config.jwt_secret).with_issuer(&config.token_issuer),
    );
    create_shared_state(store, verifier)
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
