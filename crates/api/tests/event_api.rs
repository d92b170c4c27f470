//! Integration tests for the `/api/v1/events` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete, get, post_json, put_json, sample_directory, StubDirectory,
};
use eventhub_core::notification::NotificationType;
use serde_json::json;

#[tokio::test]
async fn create_event_returns_201_and_announces() {
    let app = build_test_app(sample_directory());

    let response = post_json(
        &app.router,
        "/api/v1/events",
        json!({ "title": "Workshop", "location": "Room 4", "organizer_id": 7 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Workshop");
    assert_eq!(json["data"]["organizer_id"], 7);
    let event_id = json["data"]["id"].as_i64().unwrap();

    let mut sent = app.sink.received();
    sent.sort_by_key(|n| n.participant_id);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].participant_id, 1);
    assert_eq!(sent[1].participant_id, 2);
    for notification in &sent {
        assert_eq!(notification.kind, NotificationType::NewEvent);
        assert_eq!(notification.event_id, Some(event_id));
        assert_eq!(notification.message, "New event published by Lee: Workshop.");
    }
}

#[tokio::test]
async fn create_event_with_blank_title_returns_400() {
    let app = build_test_app(sample_directory());

    let response = post_json(&app.router, "/api/v1/events", json!({ "title": "  " })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert!(app.sink.received().is_empty());
}

#[tokio::test]
async fn create_event_with_inverted_dates_returns_400() {
    let app = build_test_app(StubDirectory::default());

    let response = post_json(
        &app.router,
        "/api/v1/events",
        json!({
            "title": "Workshop",
            "starts_at": "2026-05-02T10:00:00Z",
            "ends_at": "2026-05-01T10:00:00Z",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_missing_event_returns_404() {
    let app = build_test_app(StubDirectory::default());

    let response = get(&app.router, "/api/v1/events/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Event with id 999 not found");
}

#[tokio::test]
async fn list_and_get_events() {
    let app = build_test_app(StubDirectory::default());
    post_json(&app.router, "/api/v1/events", json!({ "title": "Workshop" })).await;
    post_json(&app.router, "/api/v1/events", json!({ "title": "Meetup" })).await;

    let list = body_json(get(&app.router, "/api/v1/events").await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);

    let id = list["data"][0]["id"].as_i64().unwrap();
    let one = body_json(get(&app.router, &format!("/api/v1/events/{id}")).await).await;
    assert_eq!(one["data"]["id"], id);
}

#[tokio::test]
async fn search_filters_by_keyword_and_location() {
    let app = build_test_app(StubDirectory::default());
    post_json(
        &app.router,
        "/api/v1/events",
        json!({ "title": "Rust Workshop", "location": "Lisbon" }),
    )
    .await;
    post_json(
        &app.router,
        "/api/v1/events",
        json!({ "title": "Go Workshop", "location": "Porto" }),
    )
    .await;
    post_json(
        &app.router,
        "/api/v1/events",
        json!({ "title": "Rust Meetup", "location": "Porto" }),
    )
    .await;

    let json = body_json(
        get(
            &app.router,
            "/api/v1/events/search?keyword=workshop&location=PORTO",
        )
        .await,
    )
    .await;

    let titles: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Go Workshop"]);
}

#[tokio::test]
async fn search_filters_by_start_date() {
    let app = build_test_app(StubDirectory::default());
    post_json(
        &app.router,
        "/api/v1/events",
        json!({ "title": "Early", "starts_at": "2026-01-10T09:00:00Z" }),
    )
    .await;
    post_json(
        &app.router,
        "/api/v1/events",
        json!({ "title": "Late", "starts_at": "2026-06-10T09:00:00Z" }),
    )
    .await;

    let json = body_json(
        get(
            &app.router,
            "/api/v1/events/search?starts_after=2026-03-01T00:00:00Z",
        )
        .await,
    )
    .await;

    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "Late");
}

#[tokio::test]
async fn update_replaces_fields_without_notifying() {
    let app = build_test_app(sample_directory());
    let created = body_json(
        post_json(&app.router, "/api/v1/events", json!({ "title": "Workshop" })).await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();
    let announced = app.sink.received().len();

    let response = put_json(
        &app.router,
        &format!("/api/v1/events/{id}"),
        json!({ "title": "Advanced Workshop", "category": "training" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Advanced Workshop");
    assert_eq!(json["data"]["category"], "training");
    assert_eq!(app.sink.received().len(), announced);
}

#[tokio::test]
async fn update_missing_event_returns_404() {
    let app = build_test_app(StubDirectory::default());

    let response = put_json(&app.router, "/api/v1/events/5", json!({ "title": "X" })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_event_returns_204_then_404() {
    let app = build_test_app(StubDirectory::default());
    let created = body_json(
        post_json(&app.router, "/api/v1/events", json!({ "title": "Workshop" })).await,
    )
    .await;
    let uri = format!("/api/v1/events/{}", created["data"]["id"]);

    assert_eq!(delete(&app.router, &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete(&app.router, &uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app.router, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_outage_returns_sanitized_500() {
    let app = build_test_app(StubDirectory::default());
    app.store.set_unavailable(true);

    let response = get(&app.router, "/api/v1/events").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "An internal error occurred");
}
