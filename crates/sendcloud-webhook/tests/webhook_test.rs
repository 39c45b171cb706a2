//! End-to-end tests for the webhook receiver over the full router.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sendcloud_core::{DeliveryEvent, EventHandler};
use sendcloud_webhook::{auth, create_router, AppState};
use tower::ServiceExt;

const KEY: &[u8] = b"shared-key";

/// Event handler that records everything it receives.
#[derive(Debug, Default)]
struct RecordingHandler {
    events: Mutex<Vec<DeliveryEvent>>,
}

#[async_trait::async_trait]
impl EventHandler for RecordingHandler {
    async fn handle_event(&self, event: DeliveryEvent) {
        self.events.lock().expect("recorder lock").push(event);
    }
}

fn test_app() -> (Router, Arc<RecordingHandler>) {
    let recorder = Arc::new(RecordingHandler::default());
    let state = AppState::new(KEY, recorder.clone());
    (create_router(state, Duration::from_secs(5)), recorder)
}

fn signed_form(timestamp: &str, token: &str, extra: &[(&str, &str)]) -> String {
    let signature = auth::sign(timestamp, token, KEY);
    let mut pairs = vec![
        ("timestamp".to_string(), timestamp.to_string()),
        ("token".to_string(), token.to_string()),
        ("signature".to_string(), signature),
    ];
    for (k, v) in extra {
        pairs.push((k.to_string(), v.to_string()));
    }
    serde_urlencoded::to_string(pairs).expect("form encoding")
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.into())
        .expect("request")
}

#[tokio::test]
async fn get_request_is_405_with_allow_header() {
    let (app, recorder) = test_app();

    let request = Request::builder().method("GET").uri("/webhook").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).unwrap(), "POST");
    assert!(recorder.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_form_body_is_400() {
    let (app, recorder) = test_app();

    let response = app.oneshot(post("%zz=broken")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(recorder.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_signature_is_403() {
    let (app, recorder) = test_app();

    let body = "timestamp=1000&token=tok&signature=deadbeef";
    let response = app.oneshot(post(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(recorder.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn bad_timestamp_is_400_after_signature_check() {
    let (app, recorder) = test_app();

    let body = signed_form("not-millis", "tok", &[]);
    let response = app.oneshot(post(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(recorder.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn valid_callback_decodes_event_and_returns_200() {
    let (app, recorder) = test_app();

    let body = signed_form("1700000000000", "sample-token", &[
        ("event", "delivered"),
        ("recipient", "r@x.com"),
        ("emailId", "m1"),
        ("message", "ok"),
        ("reason", "none"),
    ]);
    let response = app.oneshot(post(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let events = recorder.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.name, "delivered");
    assert_eq!(event.recipient, "r@x.com");
    assert_eq!(event.message_id, "m1");
    assert_eq!(event.reason, "ok: none");
    assert_eq!(event.occurred_at.to_rfc3339(), "2023-11-14T22:13:20+00:00");
}

#[tokio::test]
async fn callbacks_are_stateless_across_requests() {
    let (app, recorder) = test_app();

    for i in 0..3 {
        let token = format!("tok-{i}");
        let body = signed_form("1000", &token, &[("event", "open")]);
        let response = app.clone().oneshot(post(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(recorder.events.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (app, _) = test_app();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
