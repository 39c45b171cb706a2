//! Delivery lifecycle events pushed by the remote service.
//!
//! SendCloud notifies of delivery outcomes (bounce, delivery, open and
//! so on) through signed webhook callbacks. The webhook receiver decodes
//! each callback into a [`DeliveryEvent`] and hands it to an
//! [`EventHandler`], keeping the receiver decoupled from whatever the
//! application does with the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One delivery lifecycle notification, decoded from a webhook call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEvent {
    /// Event name as reported by the service, e.g. `delivered`, `bounce`.
    pub name: String,
    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,
    /// Recipient address the event concerns.
    pub recipient: String,
    /// Remote-assigned message id, matches the id returned from a send.
    pub message_id: String,
    /// Human-readable detail, `"<message>: <reason-code>"`.
    pub reason: String,
}

/// Handler invoked for each authenticated, well-formed webhook event.
///
/// Handlers may be called concurrently, one invocation per inbound
/// request. Failures should be logged by the handler itself; the
/// webhook response to the remote service is already committed by the
/// time the handler runs.
#[async_trait::async_trait]
pub trait EventHandler: Send + Sync + std::fmt::Debug {
    /// Processes a decoded delivery event.
    async fn handle_event(&self, event: DeliveryEvent);
}

/// Event handler that discards all events.
///
/// Useful when only the HTTP acknowledgement matters, and as a default
/// for tests.
#[derive(Debug, Default)]
pub struct NoOpEventHandler;

impl NoOpEventHandler {
    /// Creates a new no-op handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EventHandler for NoOpEventHandler {
    async fn handle_event(&self, _event: DeliveryEvent) {}
}
