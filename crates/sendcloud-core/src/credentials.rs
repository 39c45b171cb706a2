//! Per-domain API credential storage.
//!
//! SendCloud authenticates each call with an `api_user`/`api_key` pair
//! scoped to a sending domain. A single client may send on behalf of
//! several domains, so credentials are kept in a store keyed by domain
//! and resolved from the From address at send time.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

use crate::error::{CoreError, Result};

/// An `api_user`/`api_key` pair for one sending domain.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// API user name for form authentication.
    pub api_user: String,
    /// API key for form authentication.
    pub api_key: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // api_key must never leak into logs or error output
        f.debug_struct("Credential")
            .field("api_user", &self.api_user)
            .field("api_key", &"***")
            .finish()
    }
}

/// Thread-safe mapping from sending domain to credentials.
///
/// Registration typically happens once at startup; lookups happen on
/// every send. Reads are concurrent, writes take the lock exclusively.
/// Clone the store to share it between tasks, all clones observe the
/// same registrations.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    domains: Arc<RwLock<HashMap<String, Credential>>>,
}

impl CredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the credential pair for a domain.
    ///
    /// Idempotent per domain; the last registration wins. Domain
    /// matching is case-sensitive and no format validation is applied.
    pub fn register(
        &self,
        domain: impl Into<String>,
        api_user: impl Into<String>,
        api_key: impl Into<String>,
    ) {
        let domain = domain.into();
        tracing::debug!(domain = %domain, "registering sending domain");
        let credential = Credential { api_user: api_user.into(), api_key: api_key.into() };
        // Lock poisoning only occurs if a writer panicked; treat the
        // map as still usable rather than propagating the panic.
        let mut domains = self.domains.write().unwrap_or_else(|e| e.into_inner());
        domains.insert(domain, credential);
    }

    /// Resolves the credential pair for a domain.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownDomain` if the domain was never
    /// registered.
    pub fn resolve(&self, domain: &str) -> Result<Credential> {
        let domains = self.domains.read().unwrap_or_else(|e| e.into_inner());
        domains
            .get(domain)
            .cloned()
            .ok_or_else(|| CoreError::UnknownDomain { domain: domain.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_api_key() {
        let credential =
            Credential { api_user: "postmaster".to_string(), api_key: "s3cret".to_string() };
        let rendered = format!("{credential:?}");
        assert!(rendered.contains("postmaster"));
        assert!(!rendered.contains("s3cret"));
    }
}
