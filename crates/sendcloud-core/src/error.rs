//! Shared error taxonomy for SendCloud operations.
//!
//! Covers the failures that can occur before any network I/O takes
//! place: credential lookup and From-address parsing. Transport and
//! API-level failures live in the client crate.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by core domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No credential pair is registered for the sending domain.
    #[error("unknown sending domain: {domain}")]
    UnknownDomain {
        /// The domain that was looked up
        domain: String,
    },

    /// The From address does not contain a recognizable domain.
    #[error("invalid From address: {address}")]
    InvalidFromAddress {
        /// The address that failed to parse
        address: String,
    },
}
