//! User-related entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user in the system.
///
/// Users are created on first successful identity verification and
/// reconciled on every subsequent one; they are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Identifier assigned by the external identity provider.
    pub external_id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: Option<String>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user.
    pub fn new(external_id: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            external_id: external_id.into(),
            email: email.into(),
            display_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Returns the public projection attached to attendance and review rows.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            display_name: self.display_name.clone(),
        }
    }

    /// Returns the projection used when this user appears as an organizer.
    pub fn organizer_summary(&self) -> OrganizerSummary {
        OrganizerSummary {
            id: self.id,
            display_name: self.display_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public projection of a user (no email).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// User identifier.
    pub id: Uuid,
    /// Display name.
    pub display_name: Option<String>,
}

/// Projection of an event's organizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerSummary {
    /// User identifier.
    pub id: Uuid,
    /// Display name.
    pub display_name: Option<String>,
    /// Email address.
    pub email: String,
}
