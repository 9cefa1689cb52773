//! Review entity definitions and rating aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest accepted rating.
pub const RATING_MIN: i32 = 1;
/// Highest accepted rating.
pub const RATING_MAX: i32 = 5;

/// A user's review of an event. One row per (user, event) pair; submitting
/// again replaces the stored rating and comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique identifier.
    pub id: Uuid,
    /// The reviewing user.
    pub user_id: Uuid,
    /// The reviewed event.
    pub event_id: Uuid,
    /// Rating in [1, 5].
    pub rating: i32,
    /// Optional free-form comment.
    pub comment: Option<String>,
    /// When the review was first submitted.
    pub created_at: DateTime<Utc>,
    /// When the review was last revised.
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Creates a new review. Callers must have validated the rating with
    /// [`Review::valid_rating`] first.
    pub fn new(user_id: Uuid, event_id: Uuid, rating: i32, comment: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the rating and comment, touching `updated_at`.
    pub fn revise(&mut self, rating: i32, comment: Option<String>) {
        self.rating = rating;
        self.comment = comment;
        self.updated_at = Utc::now();
    }

    /// Returns true if the rating is within the accepted range.
    pub fn valid_rating(rating: i32) -> bool {
        (RATING_MIN..=RATING_MAX).contains(&rating)
    }
}

/// Aggregated rating statistics for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    /// Arithmetic mean of all ratings; 0 when there are none.
    pub average: f64,
    /// Number of reviews.
    pub count: u32,
}

impl ReviewStats {
    /// Computes stats from stored ratings. No weighting, no decay.
    pub fn compute(ratings: &[i32]) -> Self {
        if ratings.is_empty() {
            return Self {
                average: 0.0,
                count: 0,
            };
        }
        let sum: i32 = ratings.iter().sum();
        Self {
            average: f64::from(sum) / ratings.len() as f64,
            count: ratings.len() as u32,
        }
    }
}
