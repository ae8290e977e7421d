//! Client configuration

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::request::Headers;

/// Configuration shared by every request a client dispatches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every request path is resolved against.
    pub base_url: String,

    /// Headers applied to every request unless the request overrides them.
    #[serde(default)]
    pub default_headers: Headers,

    /// User-Agent header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of redirects to follow.
    #[serde(default = "default_redirect_limit")]
    pub redirect_limit: usize,
}

fn default_user_agent() -> String {
    concat!("attest/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_redirect_limit() -> usize {
    10
}

impl ClientConfig {
    /// Creates a configuration for the given base URL with default values.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: Headers::new(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            redirect_limit: default_redirect_limit(),
        }
    }

    /// Adds a default header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.set(name, value);
        self
    }

    /// Sets the User-Agent (builder pattern).
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the request timeout in milliseconds (builder pattern).
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the redirect limit (builder pattern).
    #[must_use]
    pub const fn with_redirect_limit(mut self, redirect_limit: usize) -> Self {
        self.redirect_limit = redirect_limit;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL does not use
    /// the http or https scheme.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}
