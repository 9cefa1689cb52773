//! Application state.

use std::sync::Arc;

use auth::TokenVerifier;
use event_store::EventStore;

/// Shared application state.
pub struct AppState<S: EventStore> {
    /// Event store.
    pub store: S,
    /// Bearer token verifier.
    pub verifier: TokenVerifier,
}

impl<S: EventStore> AppState<S> {
    /// Creates new application state.
    pub fn new(store: S, verifier: TokenVerifier) -> Self {
        Self { store, verifier }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from a store and verifier.
pub fn create_shared_state<S: EventStore>(store: S, verifier: TokenVerifier) -> SharedState<S> {
    Arc::new(AppState::new(store, verifier))
}
