//! Inbound webhook receiver for SendCloud delivery events.
//!
//! SendCloud pushes delivery lifecycle notifications as signed,
//! form-encoded POST callbacks. This crate authenticates each callback
//! with HMAC-SHA256, decodes it into a
//! [`DeliveryEvent`](sendcloud_core::DeliveryEvent), and answers with
//! the status codes the service expects (405/400/403 on rejection).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod decode;
pub mod handler;
pub mod server;

pub use config::Config;
pub use decode::{decode_request, WebhookError};
pub use handler::AppState;
pub use server::{create_router, start_server};
