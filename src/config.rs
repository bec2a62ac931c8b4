//! Client configuration.
//!
//! Loaded from the environment by [`ClientConfig::from_env`], or assembled
//! with the `with_*` builder methods.
//!
//! ```ignore
//! use bookchat::config::ClientConfig;
//!
//! let config = ClientConfig::default()
//!     .with_base_url("http://books.internal:8000/")?
//!     .with_connect_timeout(Duration::from_secs(5));
//! ```

use std::time::Duration;

use thiserror::Error;

/// Backend base URL variable.
pub const ENV_API_URL: &str = "BOOKCHAT_API_URL";
/// Connect timeout variable, in whole seconds.
pub const ENV_CONNECT_TIMEOUT: &str = "BOOKCHAT_CONNECT_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Error type for configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Base URL without an http(s) scheme
    #[error("invalid backend URL '{value}': expected http:// or https://")]
    InvalidUrl { value: String },

    /// Timeout that is not a positive integer
    #[error("invalid {name} '{value}': expected a positive number of seconds")]
    InvalidTimeout { name: &'static str, value: String },
}

/// Settings for [`BackendClient`](crate::client::BackendClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub base_url: String,
    /// Transport connect timeout (None = reqwest default)
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. Trailing slashes are trimmed.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(url.as_ref())?;
        Ok(self)
    }

    /// Set the transport connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Load from `BOOKCHAT_API_URL` and `BOOKCHAT_CONNECT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(url) = get(ENV_API_URL) {
            config = config.with_base_url(url.trim())?;
        }
        if let Some(raw) = get(ENV_CONNECT_TIMEOUT) {
            config = config.with_connect_timeout(parse_timeout_secs(ENV_CONNECT_TIMEOUT, &raw)?);
        }
        Ok(config)
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_scheme = ["http://", "https://"].iter().any(|scheme| {
        trimmed.len() > scheme.len() && trimmed.to_ascii_lowercase().starts_with(scheme)
    });
    if !has_scheme {
        return Err(ConfigError::InvalidUrl {
            value: raw.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_timeout_secs(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            name,
            value: raw.to_string(),
        }),
    }
}
