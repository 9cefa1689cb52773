//! Attendance (RSVP) entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// RSVP status for a (user, event) pair.
///
/// The full state machine is {absent, confirmed, cancelled}: `absent` is the
/// lack of a row. Once a row exists it is never deleted; it only moves
/// between `Confirmed` and `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// The user plans to attend.
    Confirmed,
    /// The user withdrew their RSVP.
    Cancelled,
}

impl AttendanceStatus {
    /// String form used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Confirmed => "confirmed",
            AttendanceStatus::Cancelled => "cancelled",
        }
    }

    /// Parses the storage string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(AttendanceStatus::Confirmed),
            "cancelled" => Some(AttendanceStatus::Cancelled),
            _ => None,
        }
    }
}

/// A user's RSVP to an event. One row per (user, event) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    /// Unique identifier.
    pub id: Uuid,
    /// The attending user.
    pub user_id: Uuid,
    /// The event being attended.
    pub event_id: Uuid,
    /// Current RSVP status.
    pub status: AttendanceStatus,
    /// When the user first RSVP'd. Re-confirming does not touch this.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

impl Attendance {
    /// Creates a new confirmed RSVP (the absent -> confirmed transition).
    pub fn new(user_id: Uuid, event_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            status: AttendanceStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves to `Confirmed`. Idempotent; re-confirming a cancelled RSVP is
    /// the cancelled -> confirmed transition.
    pub fn confirm(&mut self) {
        self.status = AttendanceStatus::Confirmed;
        self.updated_at = Utc::now();
    }

    /// Moves to `Cancelled`. The row stays around as history.
    pub fn cancel(&mut self) {
        self.status = AttendanceStatus::Cancelled;
        self.updated_at = Utc::now();
    }

    /// Returns true if the RSVP is currently confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.status == AttendanceStatus::Confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attendance_is_confirmed() {
        let attendance = Attendance::new(Uuid::new_v4(), Uuid::new_v4());
        assert!(attendance.is_confirmed());
    }

    #[test]
    fn test_cancel_then_reconfirm() {
        let mut attendance = Attendance::new(Uuid::new_v4(), Uuid::new_v4());
        let id = attendance.id;

        attendance.cancel();
        assert_eq!(attendance.status, AttendanceStatus::Cancelled);

        attendance.confirm();
        assert_eq!(attendance.status, AttendanceStatus::Confirmed);
        // Same row throughout; identity never changes.
        assert_eq!(attendance.id, id);
    }

    #[test]
    fn test_confirm_is_idempotent() {
        let mut attendance = Attendance::new(Uuid::new_v4(), Uuid::new_v4());
        attendance.confirm();
        attendance.confirm();
        assert!(attendance.is_confirmed());
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(
            AttendanceStatus::parse(AttendanceStatus::Confirmed.as_str()),
            Some(AttendanceStatus::Confirmed)
        );
        assert_eq!(
            AttendanceStatus::parse(AttendanceStatus::Cancelled.as_str()),
            Some(AttendanceStatus::Cancelled)
        );
        assert_eq!(AttendanceStatus::parse("maybe"), None);
    }
}
