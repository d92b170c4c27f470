#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use eventhub_api::config::{NotificationConfig, ServerConfig};
use eventhub_api::router::build_app_router;
use eventhub_api::state::AppState;
use eventhub_core::roles::Role;
use eventhub_core::types::DbId;
use eventhub_db::MemoryStore;
use eventhub_events::{
    Directory, DirectoryError, NewNotification, NotificationSink, ParticipantProfile, SinkError,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        notifications: NotificationConfig::default(),
    }
}

// ---------------------------------------------------------------------------
// Transports
// ---------------------------------------------------------------------------

/// Sink that records every submitted notification.
#[derive(Default)]
pub struct RecordingSink {
    received: Mutex<Vec<NewNotification>>,
}

impl RecordingSink {
    pub fn received(&self) -> Vec<NewNotification> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn submit(&self, notification: &NewNotification) -> Result<(), SinkError> {
        self.received.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Directory holding a fixed set of participant profiles.
#[derive(Default)]
pub struct StubDirectory {
    profiles: HashMap<DbId, ParticipantProfile>,
}

impl StubDirectory {
    pub fn with_user(mut self, id: DbId, name: &str, email: &str, role: Role) -> Self {
        self.profiles.insert(
            id,
            ParticipantProfile {
                id: Some(id),
                email: Some(email.to_string()),
                display_name: Some(name.to_string()),
                role: Some(role.as_str().to_string()),
            },
        );
        self
    }
}

#[async_trait]
impl Directory for StubDirectory {
    async fn profile(&self, id: DbId) -> Result<Option<ParticipantProfile>, DirectoryError> {
        Ok(self.profiles.get(&id).cloned())
    }

    async fn profiles_with_role(
        &self,
        role: Role,
    ) -> Result<Vec<ParticipantProfile>, DirectoryError> {
        let mut matching: Vec<_> = self
            .profiles
            .values()
            .filter(|p| p.role.as_deref() == Some(role.as_str()))
            .cloned()
            .collect();
        matching.sort_by_key(|p| p.id);
        Ok(matching)
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Handles into the collaborators behind a test app.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub sink: Arc<RecordingSink>,
}

/// Build the full application router over an in-memory store.
///
/// Uses the same middleware stack as the binary.
pub fn build_test_app(directory: StubDirectory) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let sink = Arc::new(RecordingSink::default());
    let state = AppState::new(
        test_config(),
        store.clone(),
        Arc::new(directory),
        sink.clone(),
    );
    TestApp {
        router: build_app_router(state).unwrap(),
        store,
        sink,
    }
}

/// A directory with participants 1 (Ana) and 2 (Bo) and organizer 7 (Lee).
pub fn sample_directory() -> StubDirectory {
    StubDirectory::default()
        .with_user(1, "Ana", "ana@example.org", Role::Participant)
        .with_user(2, "Bo", "bo@example.org", Role::Participant)
        .with_user(7, "Lee", "lee@example.org", Role::Organizer)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body).await
}

async fn json_request(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
