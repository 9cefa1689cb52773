//! Store trait definition and composed read models.

use async_trait::async_trait;
use entities::{
    Attendance, Event, OrganizerSummary, Review, ReviewStats, User, UserSummary,
};
use serde::Serialize;
use uuid::Uuid;

use crate::EventStoreResult;

/// An event annotated with its organizer and participation counts, as
/// returned by event listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    #[serde(flatten)]
    pub event: Event,
    pub organizer: OrganizerSummary,
    pub attendance_count: u32,
    pub review_count: u32,
}

/// An attendance row together with the attendee's public profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub user: UserSummary,
}

/// A review row together with the reviewer's public profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    #[serde(flatten)]
    pub review: Review,
    pub user: UserSummary,
}

/// The full detail view of a single event: organizer, every attendance row
/// (cancelled ones included, as history) and every review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub organizer: OrganizerSummary,
    pub attendances: Vec<AttendanceEntry>,
    pub reviews: Vec<ReviewEntry>,
}

/// An attendance row together with the event it refers to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendedEvent {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub event: Event,
}

/// A user's event history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEvents {
    /// Events the user organized, most recent date first.
    pub organized: Vec<Event>,
    /// Events the user RSVP'd to, most recent RSVP first.
    pub attended: Vec<AttendedEvent>,
}

/// All reviews for an event plus the derived statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReviews {
    pub reviews: Vec<ReviewEntry>,
    pub stats: ReviewStats,
}

/// Trait for storage operations.
///
/// The methods are grouped by the component they belong to: the user
/// directory, the event store proper, the participation ledger, and the
/// review aggregator. Implementations must make the (user, event) upserts
/// atomic per row; concurrent writes to the same pair are serialized by the
/// uniqueness constraint and the last write wins.
#[async_trait]
pub trait EventStore: Send + Sync {
    // =========================================================================
    // User directory
    // =========================================================================

    /// Reconciles an external identity with the local user directory.
    ///
    /// Matches by external id first, then by email (attaching the external
    /// id to a pre-provisioned account), and creates a new user otherwise.
    /// Exactly one row is created or updated per call. Empty `external_id`
    /// or `email` is rejected with a validation error.
    async fn reconcile_user(
        &self,
        external_id: &str,
        email: &str,
        display_name: Option<&str>,
    ) -> EventStoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> EventStoreResult<Option<User>>;

    /// Gets a user by external identity-provider id.
    async fn get_user_by_external_id(&self, external_id: &str) -> EventStoreResult<Option<User>>;

    // =========================================================================
    // Events
    // =========================================================================

    /// Creates a new event.
    async fn create_event(&self, event: Event) -> EventStoreResult<Event>;

    /// Gets an event by ID.
    async fn get_event(&self, id: Uuid) -> EventStoreResult<Option<Event>>;

    /// Gets an event with organizer, attendances, and reviews attached.
    async fn get_event_detail(&self, id: Uuid) -> EventStoreResult<Option<EventDetail>>;

    /// Lists all events, date ascending, with organizer and counts.
    async fn list_events(&self) -> EventStoreResult<Vec<EventSummary>>;

    /// Persists an edited event.
    async fn update_event(&self, event: Event) -> EventStoreResult<Event>;

    // =========================================================================
    // Participation ledger
    // =========================================================================

    /// Upserts the (user, event) RSVP to confirmed. Idempotent.
    async fn set_attending(&self, user_id: Uuid, event_id: Uuid) -> EventStoreResult<Attendance>;

    /// Cancels an existing RSVP. Fails with NotFound when the user never
    /// RSVP'd; never deletes the row.
    async fn cancel_attendance(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> EventStoreResult<Attendance>;

    /// Returns the user's organized and attended event history.
    async fn list_user_events(&self, user_id: Uuid) -> EventStoreResult<UserEvents>;

    // =========================================================================
    // Review aggregator
    // =========================================================================

    /// Upserts the (user, event) review. Out-of-range ratings are rejected
    /// before persistence; a repeat submission replaces rating and comment.
    async fn submit_review(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> EventStoreResult<Review>;

    /// Returns all reviews for an event, newest first, with stats.
    async fn list_event_reviews(&self, event_id: Uuid) -> EventStoreResult<EventReviews>;
}
