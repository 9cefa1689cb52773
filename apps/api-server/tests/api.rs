//! End-to-end tests for the REST surface, run against the in-memory store.

use api_server::create_app;
use api_server::state::create_shared_state;
use auth::{TokenVerifier, VerifierConfig};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use event_store::MemoryEventStore;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret-long-enough";

fn test_app() -> (Router, TokenVerifier) {
    let verifier = TokenVerifier::new(VerifierConfig::new(SECRET));
    let state = create_shared_state(MemoryEventStore::new(), verifier.clone());
    (create_app(state), verifier)
}

fn token(verifier: &TokenVerifier, uid: &str, email: &str, name: &str) -> String {
    verifier
        .issue_token(uid, Some(email.to_string()), Some(name.to_string()))
        .unwrap()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn sync(app: &Router, token: &str) -> Value {
    let (status, body) = send(app, "POST", "/api/users/sync", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn create_event(app: &Router, token: &str, title: &str, days_ahead: i64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/events",
        Some(token),
        Some(json!({
            "title": title,
            "description": "Bring gloves",
            "date": (Utc::now() + Duration::days(days_ahead)).to_rfc3339(),
            "location": "Central Park",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["event"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _) = test_app();

    let (status, _) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_requires_authentication() {
    let (app, _) = test_app();

    let (status, body) = send(&app, "GET", "/api/events", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTHENTICATION_REQUIRED");

    let (status, _) = send(&app, "GET", "/api/events", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unsynced_identity_is_not_found() {
    let (app, verifier) = test_app();
    let stranger = token(&verifier, "uid-stranger", "s@x.com", "Stranger");

    // Valid token, but the identity never hit /api/users/sync.
    let (status, _) = send(
        &app,
        "POST",
        "/api/events",
        Some(&stranger),
        Some(json!({
            "title": "Picnic",
            "date": Utc::now().to_rfc3339(),
            "location": "Somewhere",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sync_reconciles_identity() {
    let (app, verifier) = test_app();
    let ana = token(&verifier, "uid-ana", "ana@x.com", "Ana");

    let body = sync(&app, &ana).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "ana@x.com");
    assert_eq!(body["user"]["displayName"], "Ana");

    // Syncing again resolves to the same local user.
    let again = sync(&app, &ana).await;
    assert_eq!(again["user"]["id"], body["user"]["id"]);

    // The same email under a new provider account binds to the same row.
    let ana_new_account = token(&verifier, "uid-ana-2", "ana@x.com", "Ana");
    let rebound = sync(&app, &ana_new_account).await;
    assert_eq!(rebound["user"]["id"], body["user"]["id"]);
}

#[tokio::test]
async fn test_event_lifecycle() {
    let (app, verifier) = test_app();
    let organizer = token(&verifier, "uid-org", "org@x.com", "Organizer");
    let attendee = token(&verifier, "uid-att", "att@x.com", "Attendee");
    sync(&app, &organizer).await;
    sync(&app, &attendee).await;

    let event_id = create_event(&app, &organizer, "Park Cleanup", 7).await;

    // Fresh event: empty attendance and review lists.
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/events/{event_id}"),
        Some(&organizer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["title"], "Park Cleanup");
    assert_eq!(body["event"]["organizer"]["email"], "org@x.com");
    assert_eq!(body["event"]["attendances"].as_array().unwrap().len(), 0);
    assert_eq!(body["event"]["reviews"].as_array().unwrap().len(), 0);

    // RSVP.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/events/{event_id}/attend"),
        Some(&attendee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attendance"]["status"], "confirmed");

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/events/{event_id}"),
        Some(&organizer),
        None,
    )
    .await;
    let attendances = body["event"]["attendances"].as_array().unwrap();
    assert_eq!(attendances.len(), 1);
    assert_eq!(attendances[0]["status"], "confirmed");
    assert_eq!(attendances[0]["user"]["displayName"], "Attendee");

    // Cancel: the row stays, flipped to cancelled.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/events/{event_id}/cancel"),
        Some(&attendee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attendance"]["status"], "cancelled");

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/events/{event_id}"),
        Some(&organizer),
        None,
    )
    .await;
    let attendances = body["event"]["attendances"].as_array().unwrap();
    assert_eq!(attendances.len(), 1);
    assert_eq!(attendances[0]["status"], "cancelled");

    // Re-confirm after cancelling.
    let (_, body) = send(
        &app,
        "POST",
        &format!("/api/events/{event_id}/attend"),
        Some(&attendee),
        None,
    )
    .await;
    assert_eq!(body["attendance"]["status"], "confirmed");

    // Listing shows the organizer and the single attendance row.
    let (status, body) = send(&app, "GET", "/api/events", Some(&attendee), None).await;
    assert_eq!(status, StatusCode::OK);
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["attendanceCount"], 1);
    assert_eq!(events[0]["organizer"]["displayName"], "Organizer");

    // History for both sides.
    let (_, body) = send(&app, "GET", "/api/events/my-events", Some(&organizer), None).await;
    assert_eq!(body["organized"].as_array().unwrap().len(), 1);
    assert_eq!(body["attended"].as_array().unwrap().len(), 0);

    let (_, body) = send(&app, "GET", "/api/events/my-events", Some(&attendee), None).await;
    assert_eq!(body["organized"].as_array().unwrap().len(), 0);
    let attended = body["attended"].as_array().unwrap();
    assert_eq!(attended.len(), 1);
    assert_eq!(attended[0]["event"]["title"], "Park Cleanup");
}

#[tokio::test]
async fn test_cancel_without_rsvp_is_not_found() {
    let (app, verifier) = test_app();
    let organizer = token(&verifier, "uid-org", "org@x.com", "Organizer");
    sync(&app, &organizer).await;

    let event_id = create_event(&app, &organizer, "Park Cleanup", 7).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/events/{event_id}/cancel"),
        Some(&organizer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_edit_rules_are_enforced_server_side() {
    let (app, verifier) = test_app();
    let organizer = token(&verifier, "uid-org", "org@x.com", "Organizer");
    let other = token(&verifier, "uid-other", "other@x.com", "Other");
    sync(&app, &organizer).await;
    sync(&app, &other).await;

    let event_id = create_event(&app, &organizer, "Park Cleanup", 7).await;

    // Someone other than the organizer cannot edit.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/events/{event_id}"),
        Some(&other),
        Some(json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "PERMISSION_DENIED");

    // The organizer can.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/events/{event_id}"),
        Some(&organizer),
        Some(json!({ "title": "Park Cleanup (rescheduled)" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["title"], "Park Cleanup (rescheduled)");

    // But not once the event has started.
    let past_id = create_event(&app, &organizer, "Old Cleanup", -7).await;
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/events/{past_id}"),
        Some(&organizer),
        Some(json!({ "title": "Rewriting history" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_create_event_validates_fields() {
    let (app, verifier) = test_app();
    let organizer = token(&verifier, "uid-org", "org@x.com", "Organizer");
    sync(&app, &organizer).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/events",
        Some(&organizer),
        Some(json!({
            "title": "   ",
            "date": Utc::now().to_rfc3339(),
            "location": "Central Park",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_flow() {
    let (app, verifier) = test_app();
    let organizer = token(&verifier, "uid-org", "org@x.com", "Organizer");
    let reviewer = token(&verifier, "uid-rev", "rev@x.com", "Reviewer");
    sync(&app, &organizer).await;
    sync(&app, &reviewer).await;

    let event_id = create_event(&app, &organizer, "Tree Planting", -30).await;

    // Empty event: zero stats, no division-by-zero surprises.
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/reviews/{event_id}"),
        Some(&reviewer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["average"], 0.0);
    assert_eq!(body["stats"]["count"], 0);

    // Out-of-range ratings are rejected.
    for rating in [0, 6] {
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/reviews/{event_id}"),
            Some(&reviewer),
            Some(json!({ "rating": rating })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    }

    // Submit, then revise: one row, latest values.
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/reviews/{event_id}"),
        Some(&reviewer),
        Some(json!({ "rating": 5, "comment": "Great" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/reviews/{event_id}"),
        Some(&reviewer),
        Some(json!({ "rating": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["review"]["rating"], 3);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/reviews/{event_id}"),
        Some(&reviewer),
        None,
    )
    .await;
    let reviews = body["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rating"], 3);
    assert_eq!(reviews[0]["user"]["displayName"], "Reviewer");
    assert_eq!(body["stats"]["average"], 3.0);
    assert_eq!(body["stats"]["count"], 1);
}
