//! Outbound client for the SendCloud transactional email web API.
//!
//! Builds the exact form-encoded requests the remote API expects,
//! submits them over HTTP with per-domain credentials, and decodes the
//! JSON response envelope. Retry and rate limiting are deliberately
//! left to the caller; every call here is a single request/response
//! exchange.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod encode;
pub mod error;
pub mod response;
pub mod transport;

pub use client::Client;
pub use error::{ClientError, Result};
pub use response::{ApiResponse, ApiStatus};
pub use transport::{ApiTransport, TransportConfig};
