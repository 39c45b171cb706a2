//! Webhook request decoding state machine.
//!
//! Each inbound callback walks a fixed checkpoint sequence:
//!
//! ```text
//! Received → MethodChecked → FormParsed → SignatureVerified → Decoded
//!                  │              │               │               │
//!                  └──────────────┴───────────────┴───────────────┴─▶ Rejected
//! ```
//!
//! Any checkpoint failure terminates in `Rejected` with a
//! [`WebhookError`] that carries both the caller-visible error and the
//! HTTP status/body owed to the remote service. The status mapping is
//! part of the wire contract: SendCloud's own retry behavior is driven
//! by it.

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use sendcloud_core::DeliveryEvent;

use crate::auth;

/// Rejection reasons, one per state-machine checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// The request method was not POST.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The body was not parseable as form-encoded key/value pairs.
    #[error("invalid form data")]
    InvalidForm,

    /// The signature failed verification.
    #[error("bad signature")]
    BadSignature,

    /// The timestamp was not a base-10 millisecond count, or was out
    /// of representable range.
    #[error("invalid timestamp")]
    InvalidTimestamp,
}

impl WebhookError {
    /// HTTP status owed to the remote caller for this rejection.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidForm | Self::InvalidTimestamp => StatusCode::BAD_REQUEST,
            Self::BadSignature => StatusCode::FORBIDDEN,
        }
    }

    /// Response body text for this rejection.
    pub fn body(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "only POST method is allowed",
            Self::InvalidForm => "invalid form",
            Self::BadSignature => "bad signature",
            Self::InvalidTimestamp => "invalid timestamp",
        }
    }
}

/// Form fields of a callback.
///
/// Fields default to empty strings when absent, matching lenient form
/// lookup: a missing signature is a signature mismatch (403), not a
/// malformed form (400).
#[derive(Debug, Default, Deserialize)]
struct CallbackForm {
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    token: String,
    #[serde(default)]
    signature: String,
    #[serde(default)]
    event: String,
    #[serde(default)]
    recipient: String,
    #[serde(default, rename = "emailId")]
    email_id: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    reason: String,
}

/// Runs the full decode state machine over one inbound request.
///
/// # Errors
///
/// Returns the [`WebhookError`] of the first failed checkpoint; the
/// caller maps it to an HTTP response via
/// [`status`](WebhookError::status) and [`body`](WebhookError::body).
pub fn decode_request(method: &Method, body: &[u8], key: &[u8]) -> Result<DeliveryEvent, WebhookError> {
    // Received -> MethodChecked
    if method != Method::POST {
        return Err(WebhookError::MethodNotAllowed);
    }

    // MethodChecked -> FormParsed
    let form: CallbackForm =
        serde_urlencoded::from_bytes(body).map_err(|_| WebhookError::InvalidForm)?;

    // FormParsed -> SignatureVerified
    if !auth::verify(&form.timestamp, &form.token, &form.signature, key) {
        return Err(WebhookError::BadSignature);
    }

    // SignatureVerified -> Decoded
    let occurred_at = parse_timestamp_millis(&form.timestamp)?;
    Ok(DeliveryEvent {
        name: form.event,
        occurred_at,
        recipient: form.recipient,
        message_id: form.email_id,
        reason: format!("{}: {}", form.message, form.reason),
    })
}

/// Parses a decimal epoch-millisecond string into an instant.
fn parse_timestamp_millis(timestamp: &str) -> Result<DateTime<Utc>, WebhookError> {
    let millis: i64 = timestamp.parse().map_err(|_| WebhookError::InvalidTimestamp)?;
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or(WebhookError::InvalidTimestamp)
}
