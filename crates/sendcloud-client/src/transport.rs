//! HTTP transport for API calls.
//!
//! One `invoke` is one POST of a form-encoded body to
//! `<base><endpoint>.json`, authenticated by appending the
//! `api_user`/`api_key` pair resolved for the sending domain. The
//! transport distinguishes network failure from non-200 responses and
//! performs no retries; both classes are returned to the caller, which
//! owns retry policy.

use std::time::Duration;

use sendcloud_core::CredentialStore;

use crate::error::{ClientError, Result};

/// Production API base. Endpoint names are appended as `<name>.json`.
pub const DEFAULT_API_BASE: &str = "https://sendcloud.sohu.com/webapi/";

const DEFAULT_USER_AGENT: &str = concat!("sendcloud-client/", env!("CARGO_PKG_VERSION"));

/// Configuration for the API transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// API base URL, must end with `/`.
    pub base_url: String,
    /// Timeout covering the full request/response exchange.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TransportConfig {
    /// Configuration pointed at a non-default base URL, e.g. a mock
    /// server in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }
}

/// Performs authenticated form POSTs against the API.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    http: reqwest::Client,
    base_url: String,
    store: CredentialStore,
}

impl ApiTransport {
    /// Creates a transport over the given credential store.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be
    /// built with the requested settings.
    pub fn new(store: CredentialStore, config: TransportConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self { http, base_url: config.base_url, store })
    }

    /// Invokes one API endpoint for one sending domain.
    ///
    /// Credentials are resolved before any network I/O; an unknown
    /// domain never issues a request. The whole response body is read
    /// before returning.
    ///
    /// # Errors
    ///
    /// - `UnknownDomain` if no credentials are registered for `domain`
    /// - `Transport` on network, timeout, or TLS failure
    /// - `Http` when the status is not 200, with the body preserved
    pub async fn invoke(
        &self,
        endpoint: &str,
        domain: &str,
        mut fields: Vec<(&'static str, String)>,
    ) -> Result<String> {
        let credential = self.store.resolve(domain)?;
        fields.push(("api_user", credential.api_user));
        fields.push(("api_key", credential.api_key));

        let url = format!("{}{}.json", self.base_url, endpoint);
        tracing::debug!(endpoint, domain, "invoking API");

        let response =
            self.http.post(&url).form(&fields).send().await.map_err(ClientError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::Transport)?;

        if status.as_u16() != 200 {
            tracing::warn!(endpoint, status = status.as_u16(), "API returned non-200 status");
            return Err(ClientError::Http { status: status.as_u16(), body });
        }
        Ok(body)
    }
}
