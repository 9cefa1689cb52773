//! In-memory store implementation for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use entities::{Attendance, Event, Review, ReviewStats, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    AttendanceEntry, AttendedEvent, EventDetail, EventReviews, EventStore, EventStoreError,
    EventStoreResult, EventSummary, ReviewEntry, UserEvents,
};

/// In-memory event store. Attendance and review maps are keyed by the
/// (user, event) pair, which is what makes the upserts naturally unique.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    users: RwLock<HashMap<Uuid, User>>,
    events: RwLock<HashMap<Uuid, Event>>,
    attendances: RwLock<HashMap<(Uuid, Uuid), Attendance>>,
    reviews: RwLock<HashMap<(Uuid, Uuid), Review>>,
}

impl MemoryEventStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    // =========================================================================
    // User directory
    // =========================================================================

    async fn reconcile_user(
        &self,
        external_id: &str,
        email: &str,
        display_name: Option<&str>,
    ) -> EventStoreResult<User> {
        if external_id.is_empty() {
            return Err(EventStoreError::validation("external id must not be empty"));
        }
        if email.is_empty() {
            return Err(EventStoreError::validation("email must not be empty"));
        }

        let mut users = self.users.write().await;

        if let Some(user) = users.values_mut().find(|u| u.external_id == external_id) {
            user.email = email.to_string();
            if let Some(name) = display_name {
                user.display_name = Some(name.to_string());
            }
            user.updated_at = chrono::Utc::now();
            return Ok(user.clone());
        }

        if let Some(user) = users.values_mut().find(|u| u.email == email) {
            // Pre-provisioned account: bind the new external identity to it.
            user.external_id = external_id.to_string();
            if let Some(name) = display_name {
                user.display_name = Some(name.to_string());
            }
            user.updated_at = chrono::Utc::now();
            return Ok(user.clone());
        }

        let mut user = User::new(external_id, email);
        if let Some(name) = display_name {
            user = user.with_display_name(name);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> EventStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_external_id(&self, external_id: &str) -> EventStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.external_id == external_id)
            .cloned())
    }

    // =========================================================================
    // Events
    // =========================================================================

    async fn create_event(&self, event: Event) -> EventStoreResult<Event> {
        let mut events = self.events.write().await;
        events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: Uuid) -> EventStoreResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn get_event_detail(&self, id: Uuid) -> EventStoreResult<Option<EventDetail>> {
        let events = self.events.read().await;
        let Some(event) = events.get(&id).cloned() else {
            return Ok(None);
        };

        let users = self.users.read().await;
        let organizer = users
            .get(&event.organizer_id)
            .ok_or_else(|| EventStoreError::not_found("User", event.organizer_id.to_string()))?
            .organizer_summary();

        let attendances = self.attendances.read().await;
        let mut attendance_entries: Vec<AttendanceEntry> = attendances
            .values()
            .filter(|a| a.event_id == id)
            .filter_map(|a| {
                users.get(&a.user_id).map(|u| AttendanceEntry {
                    attendance: a.clone(),
                    user: u.summary(),
                })
            })
            .collect();
        attendance_entries.sort_by_key(|e| e.attendance.created_at);

        let reviews = self.reviews.read().await;
        let mut review_entries: Vec<ReviewEntry> = reviews
            .values()
            .filter(|r| r.event_id == id)
            .filter_map(|r| {
                users.get(&r.user_id).map(|u| ReviewEntry {
                    review: r.clone(),
                    user: u.summary(),
                })
            })
            .collect();
        review_entries.sort_by(|a, b| b.review.created_at.cmp(&a.review.created_at));

        Ok(Some(EventDetail {
            event,
            organizer,
            attendances: attendance_entries,
            reviews: review_entries,
        }))
    }

    async fn list_events(&self) -> EventStoreResult<Vec<EventSummary>> {
        let events = self.events.read().await;
        let users = self.users.read().await;
        let attendances = self.attendances.read().await;
        let reviews = self.reviews.read().await;

        let mut summaries: Vec<EventSummary> = events
            .values()
            .filter_map(|event| {
                users.get(&event.organizer_id).map(|organizer| EventSummary {
                    event: event.clone(),
                    organizer: organizer.organizer_summary(),
                    attendance_count: attendances
                        .values()
                        .filter(|a| a.event_id == event.id)
                        .count() as u32,
                    review_count: reviews.values().filter(|r| r.event_id == event.id).count()
                        as u32,
                })
            })
            .collect();
        summaries.sort_by_key(|s| s.event.date);

        Ok(summaries)
    }

    async fn update_event(&self, event: Event) -> EventStoreResult<Event> {
        let mut events = self.events.write().await;
        if !events.contains_key(&event.id) {
            return Err(EventStoreError::not_found("Event", event.id.to_string()));
        }
        events.insert(event.id, event.clone());
        Ok(event)
    }

    // =========================================================================
    // Participation ledger
    // =========================================================================

    async fn set_attending(&self, user_id: Uuid, event_id: Uuid) -> EventStoreResult<Attendance> {
        {
            let users = self.users.read().await;
            if !users.contains_key(&user_id) {
                return Err(EventStoreError::not_found("User", user_id.to_string()));
            }
            let events = self.events.read().await;
            if !events.contains_key(&event_id) {
                return Err(EventStoreError::not_found("Event", event_id.to_string()));
            }
        }

        let mut attendances = self.attendances.write().await;
        let attendance = attendances
            .entry((user_id, event_id))
            .and_modify(Attendance::confirm)
            .or_insert_with(|| Attendance::new(user_id, event_id));
        Ok(attendance.clone())
    }

    async fn cancel_attendance(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> EventStoreResult<Attendance> {
        let mut attendances = self.attendances.write().await;
        let attendance = attendances.get_mut(&(user_id, event_id)).ok_or_else(|| {
            EventStoreError::not_found("Attendance", format!("{user_id}/{event_id}"))
        })?;
        attendance.cancel();
        Ok(attendance.clone())
    }

    async fn list_user_events(&self, user_id: Uuid) -> EventStoreResult<UserEvents> {
        let events = self.events.read().await;

        let mut organized: Vec<Event> = events
            .values()
            .filter(|e| e.organizer_id == user_id)
            .cloned()
            .collect();
        organized.sort_by(|a, b| b.date.cmp(&a.date));

        let attendances = self.attendances.read().await;
        let mut attended: Vec<AttendedEvent> = attendances
            .values()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| {
                events.get(&a.event_id).map(|event| AttendedEvent {
                    attendance: a.clone(),
                    event: event.clone(),
                })
            })
            .collect();
        attended.sort_by(|a, b| b.attendance.created_at.cmp(&a.attendance.created_at));

        Ok(UserEvents {
            organized,
            attended,
        })
    }

    // =========================================================================
    // Review aggregator
    // =========================================================================

    async fn submit_review(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> EventStoreResult<Review> {
        if !Review::valid_rating(rating) {
            return Err(EventStoreError::validation(format!(
                "rating must be between 1 and 5, got {rating}"
            )));
        }

        {
            let users = self.users.read().await;
            if !users.contains_key(&user_id) {
                return Err(EventStoreError::not_found("User", user_id.to_string()));
            }
            let events = self.events.read().await;
            if !events.contains_key(&event_id) {
                return Err(EventStoreError::not_found("Event", event_id.to_string()));
            }
        }

        let mut reviews = self.reviews.write().await;
        let review = reviews
            .entry((user_id, event_id))
            .and_modify(|r| r.revise(rating, comment.clone()))
            .or_insert_with(|| Review::new(user_id, event_id, rating, comment.clone()));
        Ok(review.clone())
    }

    async fn list_event_reviews(&self, event_id: Uuid) -> EventStoreResult<EventReviews> {
        let reviews = self.reviews.read().await;
        let users = self.users.read().await;

        let mut entries: Vec<ReviewEntry> = reviews
            .values()
            .filter(|r| r.event_id == event_id)
            .filter_map(|r| {
                users.get(&r.user_id).map(|u| ReviewEntry {
                    review: r.clone(),
                    user: u.summary(),
                })
            })
            .collect();
        entries.sort_by(|a, b| b.review.created_at.cmp(&a.review.created_at));

        let ratings: Vec<i32> = entries.iter().map(|e| e.review.rating).collect();
        let stats = ReviewStats::compute(&ratings);

        Ok(EventReviews {
            reviews: entries,
            stats,
        })
    }
}
