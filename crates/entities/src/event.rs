//! Event-related entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A community event.
///
/// The organizer reference is set at creation time and never changes;
/// `EventUpdate` deliberately has no organizer field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier.
    pub id: Uuid,
    /// Event title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Where the event takes place.
    pub location: String,
    /// The user who created the event.
    pub organizer_id: Uuid,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new event.
    pub fn new(
        organizer_id: Uuid,
        title: impl Into<String>,
        date: DateTime<Utc>,
        location: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            date,
            location: location.into(),
            organizer_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description for this event.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if the given user is the organizer.
    pub fn is_organized_by(&self, user_id: Uuid) -> bool {
        self.organizer_id == user_id
    }

    /// Returns true if the event's date is at or before `now`.
    ///
    /// Events that have started are no longer editable.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.date <= now
    }

    /// Applies an edit to the mutable fields, touching `updated_at`.
    pub fn apply(&mut self, update: EventUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        self.updated_at = Utc::now();
    }
}

/// An edit to an event's mutable fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New date.
    pub date: Option<DateTime<Utc>>,
    /// New location.
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn future_event(organizer_id: Uuid) -> Event {
        Event::new(
            organizer_id,
            "Park Cleanup",
            Utc::now() + Duration::days(7),
            "Central Park",
        )
    }

    #[test]
    fn test_event_creation() {
        let organizer_id = Uuid::new_v4();
        let event = future_event(organizer_id).with_description("Bring gloves");

        assert_eq!(event.title, "Park Cleanup");
        assert_eq!(event.description, Some("Bring gloves".to_string()));
        assert!(event.is_organized_by(organizer_id));
        assert!(!event.is_organized_by(Uuid::new_v4()));
    }

    #[test]
    fn test_has_started() {
        let organizer_id = Uuid::new_v4();
        let mut event = future_event(organizer_id);
        assert!(!event.has_started(Utc::now()));

        event.date = Utc::now() - Duration::hours(1);
        assert!(event.has_started(Utc::now()));
    }

    #[test]
    fn test_apply_update() {
        let organizer_id = Uuid::new_v4();
        let mut event = future_event(organizer_id);
        let new_date = Utc::now() + Duration::days(14);

        event.apply(EventUpdate {
            title: Some("Park Cleanup (rescheduled)".to_string()),
            date: Some(new_date),
            ..Default::default()
        });

        assert_eq!(event.title, "Park Cleanup (rescheduled)");
        assert_eq!(event.date, new_date);
        assert_eq!(event.location, "Central Park");
        assert_eq!(event.organizer_id, organizer_id);
    }

    #[test]
    fn test_empty_update_keeps_fields() {
        let organizer_id = Uuid::new_v4();
        let mut event = future_event(organizer_id).with_description("Bring gloves");
        let date = event.date;

        event.apply(EventUpdate::default());

        assert_eq!(event.title, "Park Cleanup");
        assert_eq!(event.description, Some("Bring gloves".to_string()));
        assert_eq!(event.date, date);
    }
}
