//! User directory API endpoints.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use event_store::EventStore;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ServerResult;
use crate::middleware::AuthenticatedIdentity;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncUserResponse {
    pub success: bool,
    pub user: SyncedUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncedUser {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
}

/// Reconciles the caller's verified identity with the local user directory.
pub async fn sync_user<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> ServerResult<Json<SyncUserResponse>> {
    let user = state
        .store
        .reconcile_user(
            &identity.external_id,
            identity.email.as_deref().unwrap_or(""),
            identity.display_name.as_deref(),
        )
        .await?;

    tracing::info!(user_id = %user.id, "User synced");

    Ok(Json(SyncUserResponse {
        success: true,
        user: SyncedUser {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
        },
    }))
}
