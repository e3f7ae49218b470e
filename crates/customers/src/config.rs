//! Client configuration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Environment variable holding the API base URL.
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";

/// Fallback variable, shared with the web frontend's `.env` files.
pub const ENV_VITE_API_BASE_URL: &str = "VITE_API_BASE_URL";

/// Configuration for [`CustomerClient`](crate::CustomerClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address prefixed to every request path, e.g. `https://api.example.com`.
    pub base_url: String,
}

impl ClientConfig {
    /// Create a configuration with an explicit base URL.
    ///
    /// The value is used verbatim; it is not parsed or normalised.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Resolve the base URL from the environment.
    ///
    /// Reads `API_BASE_URL`, falling back to `VITE_API_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBaseUrl`] if neither variable is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var(ENV_API_BASE_URL)
            .or_else(|_| std::env::var(ENV_VITE_API_BASE_URL))
            .map_err(|_| ConfigError::MissingBaseUrl {
                primary: ENV_API_BASE_URL,
                fallback: ENV_VITE_API_BASE_URL,
            })?;

        debug!(base_url = %base_url, "Resolved customers API base URL");
        Ok(Self { base_url })
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
