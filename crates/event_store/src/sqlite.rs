//! SQLite-backed store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{
    Attendance, AttendanceStatus, Event, OrganizerSummary, Review, ReviewStats, User, UserSummary,
};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{FromRow, Pool, Sqlite};
use uuid::Uuid;

use crate::{
    AttendanceEntry, AttendedEvent, EventDetail, EventReviews, EventStore, EventStoreError,
    EventStoreResult, EventSummary, ReviewEntry, UserEvents,
};

/// SQL schema definition
const SCHEMA_SQL: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    external_id TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    display_name TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Events table
CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    date TEXT NOT NULL,
    location TEXT NOT NULL,
    organizer_id TEXT NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Attendance table, one row per (user, event) pair
CREATE TABLE IF NOT EXISTS attendances (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL REFERENCES users(id),
    event_id TEXT NOT NULL REFERENCES events(id),
    status TEXT NOT NULL DEFAULT 'confirmed',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (user_id, event_id)
);

-- Reviews table, one row per (user, event) pair
CREATE TABLE IF NOT EXISTS reviews (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL REFERENCES users(id),
    event_id TEXT NOT NULL REFERENCES events(id),
    rating INTEGER NOT NULL,
    comment TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (user_id, event_id)
);

-- Indexes for performance
CREATE INDEX IF NOT EXISTS idx_events_organizer ON events(organizer_id);
CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);
CREATE INDEX IF NOT EXISTS idx_attendances_event ON attendances(event_id);
CREATE INDEX IF NOT EXISTS idx_attendances_user ON attendances(user_id);
CREATE INDEX IF NOT EXISTS idx_reviews_event ON reviews(event_id);
"#;

fn parse_datetime(s: &str) -> DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap_or_default()
}

/// Database row for User
#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    external_id: String,
    email: String,
    display_name: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: parse_uuid(&row.id),
            external_id: row.external_id,
            email: row.email,
            display_name: row.display_name,
            created_at: parse_datetime(&row.created_at),
            updated_at: parse_datetime(&row.updated_at),
        }
    }
}

/// Database row for Event
#[derive(Debug, FromRow)]
struct EventRow {
    id: String,
    title: String,
    description: Option<String>,
    date: String,
    location: String,
    organizer_id: String,
    created_at: String,
    updated_at: String,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: parse_uuid(&row.id),
            title: row.title,
            description: row.description,
            date: parse_datetime(&row.date),
            location: row.location,
            organizer_id: parse_uuid(&row.organizer_id),
            created_at: parse_datetime(&row.created_at),
            updated_at: parse_datetime(&row.updated_at),
        }
    }
}

/// Database row for Attendance
#[derive(Debug, FromRow)]
struct AttendanceRow {
    id: String,
    user_id: String,
    event_id: String,
    status: String,
    created_at: String,
    updated_at: String,
}

impl From<AttendanceRow> for Attendance {
    fn from(row: AttendanceRow) -> Self {
        Attendance {
            id: parse_uuid(&row.id),
            user_id: parse_uuid(&row.user_id),
            event_id: parse_uuid(&row.event_id),
            status: AttendanceStatus::parse(&row.status).unwrap_or(AttendanceStatus::Confirmed),
            created_at: parse_datetime(&row.created_at),
            updated_at: parse_datetime(&row.updated_at),
        }
    }
}

/// Database row for Review
#[derive(Debug, FromRow)]
struct ReviewRow {
    id: String,
    user_id: String,
    event_id: String,
    rating: i32,
    comment: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: parse_uuid(&row.id),
            user_id: parse_uuid(&row.user_id),
            event_id: parse_uuid(&row.event_id),
            rating: row.rating,
            comment: row.comment,
            created_at: parse_datetime(&row.created_at),
            updated_at: parse_datetime(&row.updated_at),
        }
    }
}

/// Event row joined with its organizer and participation counts
#[derive(Debug, FromRow)]
struct EventSummaryRow {
    id: String,
    title: String,
    description: Option<String>,
    date: String,
    location: String,
    organizer_id: String,
    created_at: String,
    updated_at: String,
    organizer_display_name: Option<String>,
    organizer_email: String,
    attendance_count: i64,
    review_count: i64,
}

impl From<EventSummaryRow> for EventSummary {
    fn from(row: EventSummaryRow) -> Self {
        let organizer = OrganizerSummary {
            id: parse_uuid(&row.organizer_id),
            display_name: row.organizer_display_name,
            email: row.organizer_email,
        };
        EventSummary {
            event: Event {
                id: parse_uuid(&row.id),
                title: row.title,
                description: row.description,
                date: parse_datetime(&row.date),
                location: row.location,
                organizer_id: organizer.id,
                created_at: parse_datetime(&row.created_at),
                updated_at: parse_datetime(&row.updated_at),
            },
            organizer,
            attendance_count: row.attendance_count as u32,
            review_count: row.review_count as u32,
        }
    }
}

/// Attendance row joined with the attendee's display name
#[derive(Debug, FromRow)]
struct AttendanceUserRow {
    id: String,
    user_id: String,
    event_id: String,
    status: String,
    created_at: String,
    updated_at: String,
    user_display_name: Option<String>,
}

impl From<AttendanceUserRow> for AttendanceEntry {
    fn from(row: AttendanceUserRow) -> Self {
        let user = UserSummary {
            id: parse_uuid(&row.user_id),
            display_name: row.user_display_name,
        };
        AttendanceEntry {
            attendance: Attendance {
                id: parse_uuid(&row.id),
                user_id: user.id,
                event_id: parse_uuid(&row.event_id),
                status: AttendanceStatus::parse(&row.status)
                    .unwrap_or(AttendanceStatus::Confirmed),
                created_at: parse_datetime(&row.created_at),
                updated_at: parse_datetime(&row.updated_at),
            },
            user,
        }
    }
}

/// Review row joined with the reviewer's display name
#[derive(Debug, FromRow)]
struct ReviewUserRow {
    id: String,
    user_id: String,
    event_id: String,
    rating: i32,
    comment: Option<String>,
    created_at: String,
    updated_at: String,
    user_display_name: Option<String>,
}

impl From<ReviewUserRow> for ReviewEntry {
    fn from(row: ReviewUserRow) -> Self {
        let user = UserSummary {
            id: parse_uuid(&row.user_id),
            display_name: row.user_display_name,
        };
        ReviewEntry {
            review: Review {
                id: parse_uuid(&row.id),
                user_id: user.id,
                event_id: parse_uuid(&row.event_id),
                rating: row.rating,
                comment: row.comment,
                created_at: parse_datetime(&row.created_at),
                updated_at: parse_datetime(&row.updated_at),
            },
            user,
        }
    }
}

/// Attendance row joined with its event
#[derive(Debug, FromRow)]
struct AttendedEventRow {
    id: String,
    user_id: String,
    event_id: String,
    status: String,
    created_at: String,
    updated_at: String,
    event_title: String,
    event_description: Option<String>,
    event_date: String,
    event_location: String,
    event_organizer_id: String,
    event_created_at: String,
    event_updated_at: String,
}

impl From<AttendedEventRow> for AttendedEvent {
    fn from(row: AttendedEventRow) -> Self {
        let event_id = parse_uuid(&row.event_id);
        AttendedEvent {
            attendance: Attendance {
                id: parse_uuid(&row.id),
                user_id: parse_uuid(&row.user_id),
                event_id,
                status: AttendanceStatus::parse(&row.status)
                    .unwrap_or(AttendanceStatus::Confirmed),
                created_at: parse_datetime(&row.created_at),
                updated_at: parse_datetime(&row.updated_at),
            },
            event: Event {
                id: event_id,
                title: row.event_title,
                description: row.event_description,
                date: parse_datetime(&row.event_date),
                location: row.event_location,
                organizer_id: parse_uuid(&row.event_organizer_id),
                created_at: parse_datetime(&row.event_created_at),
                updated_at: parse_datetime(&row.event_updated_at),
            },
        }
    }
}

/// SQLite-backed event store.
pub struct SqliteEventStore {
    pool: Pool<Sqlite>,
}

impl SqliteEventStore {
    /// Connects to the database and bootstraps the schema.
    pub async fn connect(database_url: &str) -> EventStoreResult<Self> {
        // An in-memory database exists per connection; a larger pool would
        // hand out connections that never saw the schema.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Runs database migrations.
    async fn run_migrations(&self) -> EventStoreResult<()> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| EventStoreError::Other(format!("migration failed: {e}")))?;
        Ok(())
    }

    async fn require_user(&self, user_id: Uuid) -> EventStoreResult<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            return Err(EventStoreError::not_found("User", user_id.to_string()));
        }
        Ok(())
    }

    async fn require_event(&self, event_id: Uuid) -> EventStoreResult<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE id = ?")
            .bind(event_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            return Err(EventStoreError::not_found("Event", event_id.to_string()));
        }
        Ok(())
    }

    async fn fetch_user(&self, id: &str) -> EventStoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, external_id, email, display_name, created_at, updated_at
             FROM users
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn fetch_attendance(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> EventStoreResult<Option<Attendance>> {
        let row: Option<AttendanceRow> = sqlx::query_as(
            "SELECT id, user_id, event_id, status, created_at, updated_at
             FROM attendances
             WHERE user_id = ? AND event_id = ?",
        )
        .bind(user_id.to_string())
        .bind(event_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Attendance::from))
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
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

        let now = Utc::now().to_rfc3339();

        if let Some(user) = self.get_user_by_external_id(external_id).await? {
            sqlx::query(
                "UPDATE users
                 SET email = ?, display_name = COALESCE(?, display_name), updated_at = ?
                 WHERE id = ?",
            )
            .bind(email)
            .bind(display_name)
            .bind(&now)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await?;

            return self
                .fetch_user(&user.id.to_string())
                .await?
                .ok_or_else(|| EventStoreError::not_found("User", user.id.to_string()));
        }

        let by_email: Option<UserRow> = sqlx::query_as(
            "SELECT id, external_id, email, display_name, created_at, updated_at
             FROM users
             WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = by_email {
            // Pre-provisioned account: bind the new external identity to it.
            sqlx::query(
                "UPDATE users
                 SET external_id = ?, display_name = COALESCE(?, display_name), updated_at = ?
                 WHERE id = ?",
            )
            .bind(external_id)
            .bind(display_name)
            .bind(&now)
            .bind(&row.id)
            .execute(&self.pool)
            .await?;

            return self
                .fetch_user(&row.id)
                .await?
                .ok_or_else(|| EventStoreError::not_found("User", row.id));
        }

        let mut user = User::new(external_id, email);
        if let Some(name) = display_name {
            user = user.with_display_name(name);
        }

        sqlx::query(
            "INSERT INTO users (id, external_id, email, display_name, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.external_id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.created_at.to_rfc3339())
        .bind(user.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        tracing::info!(user_id = %user.id, "Created user");

        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> EventStoreResult<Option<User>> {
        self.fetch_user(&id.to_string()).await
    }

    async fn get_user_by_external_id(&self, external_id: &str) -> EventStoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, external_id, email, display_name, created_at, updated_at
             FROM users
             WHERE external_id = ?",
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    // =========================================================================
    // Events
    // =========================================================================

    async fn create_event(&self, event: Event) -> EventStoreResult<Event> {
        sqlx::query(
            "INSERT INTO events (id, title, description, date, location, organizer_id, \
             created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(event.id.to_string())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date.to_rfc3339())
        .bind(&event.location)
        .bind(event.organizer_id.to_string())
        .bind(event.created_at.to_rfc3339())
        .bind(event.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(event)
    }

    async fn get_event(&self, id: Uuid) -> EventStoreResult<Option<Event>> {
        let row: Option<EventRow> = sqlx::query_as(
            "SELECT id, title, description, date, location, organizer_id, created_at, updated_at
             FROM events
             WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Event::from))
    }

    async fn get_event_detail(&self, id: Uuid) -> EventStoreResult<Option<EventDetail>> {
        let Some(event) = self.get_event(id).await? else {
            return Ok(None);
        };

        let organizer = self
            .fetch_user(&event.organizer_id.to_string())
            .await?
            .ok_or_else(|| EventStoreError::not_found("User", event.organizer_id.to_string()))?
            .organizer_summary();

        let attendance_rows: Vec<AttendanceUserRow> = sqlx::query_as(
            "SELECT a.id, a.user_id, a.event_id, a.status, a.created_at, a.updated_at,
                    u.display_name AS user_display_name
             FROM attendances a
             JOIN users u ON u.id = a.user_id
             WHERE a.event_id = ?
             ORDER BY a.created_at ASC",
        )
        .bind(id.to_string())
        .fetch_all(&self.pool)
        .await?;

        let review_rows: Vec<ReviewUserRow> = sqlx::query_as(
            "SELECT r.id, r.user_id, r.event_id, r.rating, r.comment, r.created_at, r.updated_at,
                    u.display_name AS user_display_name
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.event_id = ?
             ORDER BY r.created_at DESC",
        )
        .bind(id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(EventDetail {
            event,
            organizer,
            attendances: attendance_rows.into_iter().map(AttendanceEntry::from).collect(),
            reviews: review_rows.into_iter().map(ReviewEntry::from).collect(),
        }))
    }

    async fn list_events(&self) -> EventStoreResult<Vec<EventSummary>> {
        let rows: Vec<EventSummaryRow> = sqlx::query_as(
            "SELECT e.id, e.title, e.description, e.date, e.location, e.organizer_id,
                    e.created_at, e.updated_at,
                    u.display_name AS organizer_display_name,
                    u.email AS organizer_email,
                    (SELECT COUNT(*) FROM attendances a WHERE a.event_id = e.id) \
                    AS attendance_count,
                    (SELECT COUNT(*) FROM reviews r WHERE r.event_id = e.id) AS review_count
             FROM events e
             JOIN users u ON u.id = e.organizer_id
             ORDER BY e.date ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EventSummary::from).collect())
    }

    async fn update_event(&self, event: Event) -> EventStoreResult<Event> {
        let result = sqlx::query(
            "UPDATE events
             SET title = ?, description = ?, date = ?, location = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date.to_rfc3339())
        .bind(&event.location)
        .bind(event.updated_at.to_rfc3339())
        .bind(event.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(EventStoreError::not_found("Event", event.id.to_string()));
        }

        Ok(event)
    }

    // =========================================================================
    // Participation ledger
    // =========================================================================

    async fn set_attending(&self, user_id: Uuid, event_id: Uuid) -> EventStoreResult<Attendance> {
        self.require_user(user_id).await?;
        self.require_event(event_id).await?;

        let attendance = Attendance::new(user_id, event_id);

        // The uniqueness constraint on (user_id, event_id) makes this a
        // single atomic confirm-or-create; created_at survives re-confirms.
        sqlx::query(
            "INSERT INTO attendances (id, user_id, event_id, status, created_at, updated_at)
             VALUES (?, ?, ?, 'confirmed', ?, ?)
             ON CONFLICT (user_id, event_id)
             DO UPDATE SET status = 'confirmed', updated_at = excluded.updated_at",
        )
        .bind(attendance.id.to_string())
        .bind(user_id.to_string())
        .bind(event_id.to_string())
        .bind(attendance.created_at.to_rfc3339())
        .bind(attendance.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        self.fetch_attendance(user_id, event_id).await?.ok_or_else(|| {
            EventStoreError::not_found("Attendance", format!("{user_id}/{event_id}"))
        })
    }

    async fn cancel_attendance(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> EventStoreResult<Attendance> {
        let result = sqlx::query(
            "UPDATE attendances
             SET status = 'cancelled', updated_at = ?
             WHERE user_id = ? AND event_id = ?",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(user_id.to_string())
        .bind(event_id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(EventStoreError::not_found(
                "Attendance",
                format!("{user_id}/{event_id}"),
            ));
        }

        self.fetch_attendance(user_id, event_id).await?.ok_or_else(|| {
            EventStoreError::not_found("Attendance", format!("{user_id}/{event_id}"))
        })
    }

    async fn list_user_events(&self, user_id: Uuid) -> EventStoreResult<UserEvents> {
        let organized_rows: Vec<EventRow> = sqlx::query_as(
            "SELECT id, title, description, date, location, organizer_id, created_at, updated_at
             FROM events
             WHERE organizer_id = ?
             ORDER BY date DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        let attended_rows: Vec<AttendedEventRow> = sqlx::query_as(
            "SELECT a.id, a.user_id, a.event_id, a.status, a.created_at, a.updated_at,
                    e.title AS event_title,
                    e.description AS event_description,
                    e.date AS event_date,
                    e.location AS event_location,
                    e.organizer_id AS event_organizer_id,
                    e.created_at AS event_created_at,
                    e.updated_at AS event_updated_at
             FROM attendances a
             JOIN events e ON e.id = a.event_id
             WHERE a.user_id = ?
             ORDER BY a.created_at DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(UserEvents {
            organized: organized_rows.into_iter().map(Event::from).collect(),
            attended: attended_rows.into_iter().map(AttendedEvent::from).collect(),
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

        self.require_user(user_id).await?;
        self.require_event(event_id).await?;

        let review = Review::new(user_id, event_id, rating, comment);

        sqlx::query(
            "INSERT INTO reviews (id, user_id, event_id, rating, comment, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (user_id, event_id)
             DO UPDATE SET rating = excluded.rating, comment = excluded.comment,
                           updated_at = excluded.updated_at",
        )
        .bind(review.id.to_string())
        .bind(user_id.to_string())
        .bind(event_id.to_string())
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at.to_rfc3339())
        .bind(review.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        let row: ReviewRow = sqlx::query_as(
            "SELECT id, user_id, event_id, rating, comment, created_at, updated_at
             FROM reviews
             WHERE user_id = ? AND event_id = ?",
        )
        .bind(user_id.to_string())
        .bind(event_id.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(Review::from(row))
    }

    async fn list_event_reviews(&self, event_id: Uuid) -> EventStoreResult<EventReviews> {
        let rows: Vec<ReviewUserRow> = sqlx::query_as(
            "SELECT r.id, r.user_id, r.event_id, r.rating, r.comment, r.created_at, r.updated_at,
                    u.display_name AS user_display_name
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.event_id = ?
             ORDER BY r.created_at DESC",
        )
        .bind(event_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        let entries: Vec<ReviewEntry> = rows.into_iter().map(ReviewEntry::from).collect();
        let ratings: Vec<i32> = entries.iter().map(|e| e.review.rating).collect();
        let stats = ReviewStats::compute(&ratings);

        Ok(EventReviews {
            reviews: entries,
            stats,
        })
    }
}
