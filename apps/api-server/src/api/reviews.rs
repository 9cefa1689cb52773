//! Review API endpoints.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use entities::{Review, ReviewStats};
use event_store::{EventStore, ReviewEntry};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::current_user;
use crate::error::ServerResult;
use crate::middleware::AuthenticatedIdentity;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub success: bool,
    pub review: Review,
}

#[derive(Debug, Serialize)]
pub struct EventReviewsResponse {
    pub success: bool,
    pub reviews: Vec<ReviewEntry>,
    pub stats: ReviewStats,
}

/// Submits or revises the caller's review of an event.
pub async fn submit_review<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(event_id): Path<Uuid>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Json(request): Json<SubmitReviewRequest>,
) -> ServerResult<(StatusCode, Json<ReviewResponse>)> {
    let user = current_user(state.as_ref(), &identity).await?;

    let review = state
        .store
        .submit_review(user.id, event_id, request.rating, request.comment)
        .await?;

    tracing::info!(event_id = %event_id, user_id = %user.id, "Review submitted");

    Ok((
        StatusCode::CREATED,
        Json(ReviewResponse {
            success: true,
            review,
        }),
    ))
}

/// Lists an event's reviews with aggregated statistics.
pub async fn list_event_reviews<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(event_id): Path<Uuid>,
) -> ServerResult<Json<EventReviewsResponse>> {
    let listing = state.store.list_event_reviews(event_id).await?;

    Ok(Json(EventReviewsResponse {
        success: true,
        reviews: listing.reviews,
        stats: listing.stats,
    }))
}
