//! Seeds the configured database with demo data.
//!
//! Wipes reviews, attendances, and events (synced users are kept) and plants
//! a demo organizer, a few upcoming events, and one past event with reviews.

use chrono::{Duration, Utc};
use entities::Event;
use event_store::{EventStore, SqliteEventStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    api_server::init_tracing("info");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:plaza.db?mode=rwc".to_string());
    let store = SqliteEventStore::connect(&database_url).await?;

    // Clear existing event data, keep real users
    sqlx::query("DELETE FROM reviews").execute(store.pool()).await?;
    sqlx::query("DELETE FROM attendances").execute(store.pool()).await?;
    sqlx::query("DELETE FROM events").execute(store.pool()).await?;

    let organizer = store
        .reconcile_user("seed-uid-001", "organizer@plaza.test", Some("Jordan Alvarez"))
        .await?;

    store
        .create_event(
            Event::new(
                organizer.id,
                "Park Cleanup Day",
                Utc::now() + Duration::days(14),
                "Riverside Park, main entrance",
            )
            .with_description("Community cleanup morning. Gloves and bags provided."),
        )
        .await?;

    store
        .create_event(
            Event::new(
                organizer.id,
                "Recycling Workshop",
                Utc::now() + Duration::days(21),
                "North Community Center",
            )
            .with_description("Hands-on techniques for reusing household materials."),
        )
        .await?;

    store
        .create_event(
            Event::new(
                organizer.id,
                "Neighborhood Food Fair",
                Utc::now() + Duration::days(28),
                "Market Square",
            )
            .with_description("Tasting stalls run by neighbors. Bring the family."),
        )
        .await?;

    // A past event with attendance and reviews, so listings have stats
    let past = store
        .create_event(
            Event::new(
                organizer.id,
                "Tree Planting Morning",
                Utc::now() - Duration::days(30),
                "Hillside Commons",
            )
            .with_description("Fifty saplings along the east path."),
        )
        .await?;

    for (external_id, email, name, rating, comment) in [
        (
            "seed-uid-002",
            "sam@plaza.test",
            "Sam Ortiz",
            5,
            "Well organized, great turnout.",
        ),
        (
            "seed-uid-003",
            "ana@plaza.test",
            "Ana Beltran",
            4,
            "Started late but worth it.",
        ),
    ] {
        let user = store.reconcile_user(external_id, email, Some(name)).await?;
        store.set_attending(user.id, past.id).await?;
        store
            .submit_review(user.id, past.id, rating, Some(comment.to_string()))
            .await?;
    }

    tracing::info!("Seed data created");

    Ok(())
}
