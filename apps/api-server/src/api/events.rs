//! Event and RSVP API endpoints.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use entities::{Attendance, Event, EventUpdate};
use event_store::{AttendedEvent, EventDetail, EventStore, EventSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::current_user;
use crate::error::{ServerError, ServerResult};
use crate::middleware::AuthenticatedIdentity;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub success: bool,
    pub event: Event,
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub success: bool,
    pub events: Vec<EventSummary>,
}

#[derive(Debug, Serialize)]
pub struct EventDetailResponse {
    pub success: bool,
    pub event: EventDetail,
}

#[derive(Debug, Serialize)]
pub struct MyEventsResponse {
    pub success: bool,
    pub organized: Vec<Event>,
    pub attended: Vec<AttendedEvent>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub success: bool,
    pub attendance: Attendance,
}

/// Creates a new event with the caller as organizer.
pub async fn create_event<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Json(request): Json<CreateEventRequest>,
) -> ServerResult<(StatusCode, Json<EventResponse>)> {
    let user = current_user(state.as_ref(), &identity).await?;

    if request.title.trim().is_empty() {
        return Err(ServerError::InvalidRequest("title is required".to_string()));
    }
    if request.location.trim().is_empty() {
        return Err(ServerError::InvalidRequest(
            "location is required".to_string(),
        ));
    }

    let mut event = Event::new(user.id, request.title, request.date, request.location);
    if let Some(description) = request.description {
        event = event.with_description(description);
    }

    let event = state.store.create_event(event).await?;

    tracing::info!(event_id = %event.id, organizer_id = %user.id, "Event created");

    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            success: true,
            event,
        }),
    ))
}

/// Lists all events with organizer and participation counts.
pub async fn list_events<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<EventListResponse>> {
    let events = state.store.list_events().await?;

    Ok(Json(EventListResponse {
        success: true,
        events,
    }))
}

/// Gets a single event with attendances and reviews.
pub async fn get_event<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<EventDetailResponse>> {
    let event = state
        .store
        .get_event_detail(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Event not found".to_string()))?;

    Ok(Json(EventDetailResponse {
        success: true,
        event,
    }))
}

/// Edits an event. Only the organizer may edit, and only before the event
/// starts; neither rule is left to the client.
pub async fn update_event<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Uuid>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Json(update): Json<EventUpdate>,
) -> ServerResult<Json<EventResponse>> {
    let user = current_user(state.as_ref(), &identity).await?;

    let mut event = state
        .store
        .get_event(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Event not found".to_string()))?;

    if !event.is_organized_by(user.id) {
        return Err(ServerError::PermissionDenied(
            "only the organizer can edit an event".to_string(),
        ));
    }
    if event.has_started(Utc::now()) {
        return Err(ServerError::InvalidRequest(
            "past events cannot be edited".to_string(),
        ));
    }
    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(ServerError::InvalidRequest(
            "title must not be empty".to_string(),
        ));
    }
    if update
        .location
        .as_deref()
        .is_some_and(|l| l.trim().is_empty())
    {
        return Err(ServerError::InvalidRequest(
            "location must not be empty".to_string(),
        ));
    }

    event.apply(update);
    let event = state.store.update_event(event).await?;

    tracing::info!(event_id = %event.id, "Event updated");

    Ok(Json(EventResponse {
        success: true,
        event,
    }))
}

/// Confirms the caller's RSVP for an event.
pub async fn attend_event<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Uuid>,
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> ServerResult<Json<AttendanceResponse>> {
    let user = current_user(state.as_ref(), &identity).await?;

    let attendance = state.store.set_attending(user.id, id).await?;

    tracing::info!(event_id = %id, user_id = %user.id, "RSVP confirmed");

    Ok(Json(AttendanceResponse {
        success: true,
        attendance,
    }))
}

/// Cancels the caller's RSVP for an event.
pub async fn cancel_attendance<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Uuid>,
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> ServerResult<Json<AttendanceResponse>> {
    let user = current_user(state.as_ref(), &identity).await?;

    let attendance = state.store.cancel_attendance(user.id, id).await?;

    tracing::info!(event_id = %id, user_id = %user.id, "RSVP cancelled");

    Ok(Json(AttendanceResponse {
        success: true,
        attendance,
    }))
}

/// Returns the caller's organized and attended events.
pub async fn my_events<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> ServerResult<Json<MyEventsResponse>> {
    let user = current_user(state.as_ref(), &identity).await?;

    let history = state.store.list_user_events(user.id).await?;

    Ok(Json(MyEventsResponse {
        success: true,
        organized: history.organized,
        attended: history.attended,
    }))
}
