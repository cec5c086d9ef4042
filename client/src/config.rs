//! Client configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::client::{Client, DEFAULT_BASE_URL};
use crate::transport::Transport;

/// Environment variable holding the ingestion base URL.
pub const ENV_INGESTION_URL: &str = "SIGNAL_INGESTION_URL";
/// Environment variable holding the session token.
pub const ENV_TOKEN: &str = "SIGNAL_TOKEN";
/// Environment variable holding the transport timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "SIGNAL_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL is not a valid URL.
    #[error("invalid ingestion url '{url}': {source}")]
    InvalidUrl {
        /// The rejected value.
        url: String,
        /// The parse error.
        #[source]
        source: url::ParseError,
    },

    /// The timeout is not a number of seconds.
    #[error("invalid timeout '{value}': {source}")]
    InvalidTimeout {
        /// The rejected value.
        value: String,
        /// The parse error.
        #[source]
        source: std::num::ParseIntError,
    },

    /// The HTTP transport could not be created.
    #[error("could not build http transport: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client configuration.
///
/// Configuration values can be set via environment variables:
/// - `SIGNAL_INGESTION_URL`: The ingestion base URL (default: `https://ingestion.sqreen.com/`)
/// - `SIGNAL_TOKEN`: The session token (default: empty)
/// - `SIGNAL_TIMEOUT_SECS`: The transport timeout in seconds (default: 30)
#[derive(Clone)]
pub struct ClientConfig {
    /// The ingestion base URL.
    pub base_url: Url,
    /// The session token.
    pub token: String,
    /// Timeout applied by the HTTP transport to every request.
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `SIGNAL_INGESTION_URL` is set but is not a valid URL
    /// - `SIGNAL_TIMEOUT_SECS` is set but cannot be parsed as a number of seconds
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a configuration reading each variable through `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_INGESTION_URL) {
            config.base_url = Url::parse(&url).map_err(|source| ConfigError::InvalidUrl {
                url: url.clone(),
                source,
            })?;
        }

        if let Some(token) = lookup(ENV_TOKEN) {
            config.token = token;
        }

        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::InvalidTimeout {
                    value: value.clone(),
                    source,
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Creates a client with a `reqwest` transport honoring the timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the transport cannot be created.
    pub fn build(&self) -> Result<Client, ConfigError> {
        let transport: Arc<dyn Transport> =
            Arc::new(reqwest::Client::builder().timeout(self.timeout).build()?);

        let mut client = Client::new(Some(transport), self.token.clone());
        client.set_base_url(self.base_url.clone());
        Ok(client)
    }
}

impl Default for ClientConfig {
    /// # Panics
    ///
    /// Never in practice: the default base URL is a valid URL.
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            token: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
