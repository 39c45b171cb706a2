//! Error types for outbound API calls.
//!
//! Transport failures and non-200 statuses are distinct from API-level
//! business failures so callers can apply retry policy only where it
//! makes sense: `Transport` and `Http` are likely transient, `Remote`
//! and the encoding errors indicate caller-side defects.

use thiserror::Error;

use sendcloud_core::CoreError;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised while building, sending, or decoding an API call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credential lookup or From-address parsing failed before any
    /// network I/O.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Extra mail headers could not be serialized as a JSON object.
    #[error("failed to encode mail headers: {0}")]
    HeaderEncoding(#[source] serde_json::Error),

    /// Template substitutions could not be serialized as a JSON object.
    #[error("failed to encode substitution vars: {0}")]
    SubstitutionEncoding(#[source] serde_json::Error),

    /// The HTTP exchange itself failed: DNS, connect, timeout, TLS.
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-200 status.
    ///
    /// The body is preserved because the service embeds diagnostic
    /// JSON in error responses too.
    #[error("API returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code of the response
        status: u16,
        /// Full response body
        body: String,
    },

    /// The API answered 200 but reported a business-level failure.
    #[error("API error: {0}")]
    Remote(String),
}
