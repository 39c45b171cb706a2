//! HTTP handlers for the webhook receiver.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument, warn};

use sendcloud_core::EventHandler;

use crate::decode::{decode_request, WebhookError};

/// Shared state for the webhook routes.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shared signing key agreed with the remote service.
    pub key: Arc<[u8]>,
    /// Handler invoked for each decoded event.
    pub events: Arc<dyn EventHandler>,
}

impl AppState {
    /// Creates state from a shared key and an event handler.
    pub fn new(key: impl AsRef<[u8]>, events: Arc<dyn EventHandler>) -> Self {
        Self { key: Arc::from(key.as_ref()), events }
    }
}

/// Receives one delivery-event callback.
///
/// Runs the decode state machine and answers with its status mapping:
/// 200 on success, 405 + `Allow: POST` for wrong methods, 400 for
/// malformed forms or timestamps, 403 for signature mismatches.
#[instrument(name = "receive_webhook", skip_all, fields(method = %method))]
pub async fn receive_webhook(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Response {
    match decode_request(&method, &body, &state.key) {
        Ok(event) => {
            info!(
                event = %event.name,
                recipient = %event.recipient,
                message_id = %event.message_id,
                "webhook event decoded"
            );
            state.events.handle_event(event).await;
            StatusCode::OK.into_response()
        },
        Err(error) => {
            warn!(%error, "webhook rejected");
            rejection_response(&error)
        },
    }
}

fn rejection_response(error: &WebhookError) -> Response {
    let mut response = (error.status(), error.body()).into_response();
    if matches!(error, WebhookError::MethodNotAllowed) {
        response.headers_mut().insert(header::ALLOW, HeaderValue::from_static("POST"));
    }
    response
}

/// Liveness probe.
pub async fn health_check() -> Response {
    debug!("health check");
    (StatusCode::OK, "ok").into_response()
}
