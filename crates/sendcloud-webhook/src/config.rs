//! Configuration for the webhook receiver service.
//!
//! Loaded in priority order: environment variables override
//! `config.toml`, which overrides built-in defaults. Only the shared
//! signing key has no default; the service refuses to start without
//! one rather than accepting unsigned callbacks.

use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "SENDCLOUD_";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong shape.
    #[error("configuration error: {0}")]
    Invalid(#[from] Box<figment::Error>),

    /// No webhook signing key was provided.
    #[error("webhook_key is required (set SENDCLOUD_WEBHOOK_KEY or webhook_key in config.toml)")]
    MissingKey,

    /// The host value is not a valid IP address.
    #[error("invalid host address: {0}")]
    InvalidHost(String),
}

/// Webhook receiver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bind address.
    ///
    /// Environment variable: `SENDCLOUD_HOST`
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    ///
    /// Environment variable: `SENDCLOUD_PORT`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared webhook signing key. Required, never logged.
    ///
    /// Environment variable: `SENDCLOUD_WEBHOOK_KEY`
    #[serde(default)]
    pub webhook_key: String,

    /// Per-request timeout in seconds.
    ///
    /// Environment variable: `SENDCLOUD_REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            webhook_key: String::new(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from defaults, `config.toml`, and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a provider fails, the signing key is
    /// missing, or the host is not an IP address.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.webhook_key.is_empty() {
            return Err(ConfigError::MissingKey);
        }
        if self.host.parse::<IpAddr>().is_err() {
            return Err(ConfigError::InvalidHost(self.host.clone()));
        }
        Ok(())
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHost` if the host is not a valid
    /// IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host: IpAddr =
            self.host.parse().map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(host, self.port))
    }

    /// Per-request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_to_localhost() {
        let config = Config { webhook_key: "k".to_string(), ..Default::default() };
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn missing_key_is_rejected() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingKey)));
    }

    #[test]
    fn invalid_host_is_rejected() {
        let config = Config {
            host: "not-an-ip".to_string(),
            webhook_key: "k".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidHost(_))));
    }
}
