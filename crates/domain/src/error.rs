//! Domain error types

use thiserror::Error;

/// Configuration errors raised by bad builder usage.
///
/// These are detected before any network I/O happens: a check that carries
/// one of these never dispatches and terminates as `Outcome::Errored`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The request path is empty.
    #[error("request path is empty")]
    EmptyPath,

    /// The base URL is missing or malformed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP method string is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request body could not be built.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// A header name is empty or otherwise unusable.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),
}

/// Result type alias for domain operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
