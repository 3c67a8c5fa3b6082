//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default backend API root
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}

/// Client configuration for connecting to the trace backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root including the `/api` prefix (e.g. "http://localhost:8080/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Where the durable session file lives (None = keep the session in memory)
    pub session_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            session_path: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `TRACE_API_URL` (default [`DEFAULT_BASE_URL`])
    /// - `TRACE_TIMEOUT_SECS` (default 30)
    /// - `TRACE_SESSION_PATH` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = match lookup("TRACE_API_URL") {
            Some(url) if url.trim().is_empty() => {
                return Err(ConfigError::Empty {
                    name: "TRACE_API_URL",
                });
            }
            Some(url) => url,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let mut config = Self::new(base_url);

        if let Some(raw) = lookup("TRACE_TIMEOUT_SECS") {
            config.timeout = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "TRACE_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
        }

        config.session_path = lookup("TRACE_SESSION_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the session at the given path
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
