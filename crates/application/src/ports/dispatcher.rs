//! Dispatcher port

use thiserror::Error;

use attest_domain::expect::CheckErrorKind;
use attest_domain::request::Request;
use attest_domain::response::Response;

/// Port for dispatching HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing the
/// application layer to be independent of specific HTTP libraries. A
/// dispatcher resolves request paths against its own base URL and performs
/// exactly one attempt per call: no retries, no response caching.
pub trait Dispatcher: Send + Sync {
    /// Sends the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues, timeout,
    /// or other transport-level problems. HTTP error statuses (4xx/5xx) are
    /// responses, not errors.
    fn send(&self, request: &Request) -> Result<Response, DispatchError>;
}

/// Errors a dispatcher can produce.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The composed URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value could not be encoded.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// DNS resolution failed.
    #[error("DNS resolution failed for host '{host}'")]
    Dns {
        /// The host that could not be resolved.
        host: String,
    },

    /// The server refused the connection.
    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    /// The connection could not be established or broke mid-flight.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The redirect limit was exceeded.
    #[error("exceeded redirect limit of {max}")]
    TooManyRedirects {
        /// The configured redirect limit.
        max: usize,
    },

    /// The response violated the HTTP protocol, or the failure fits no
    /// other category.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The request body could not be sent or the response body read.
    #[error("body error: {0}")]
    Body(String),
}

impl DispatchError {
    /// Returns the error category for outcome reporting.
    #[must_use]
    pub const fn kind(&self) -> CheckErrorKind {
        match self {
            Self::InvalidUrl(_) => CheckErrorKind::InvalidUrl,
            Self::InvalidHeader { .. } => CheckErrorKind::InvalidConfig,
            Self::Dns { .. } => CheckErrorKind::DnsError,
            Self::ConnectionRefused(_) => CheckErrorKind::ConnectionRefused,
            Self::Connection(_) => CheckErrorKind::ConnectionFailed,
            Self::Timeout { .. } => CheckErrorKind::Timeout,
            Self::TooManyRedirects { .. } | Self::Protocol(_) => CheckErrorKind::Protocol,
            Self::Body(_) => CheckErrorKind::InvalidBody,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_kinds_map_to_outcome_categories() {
        assert_eq!(
            DispatchError::Timeout { timeout_ms: 5000 }.kind(),
            CheckErrorKind::Timeout
        );
        assert_eq!(
            DispatchError::Dns {
                host: "nope.invalid".to_string()
            }
            .kind(),
            CheckErrorKind::DnsError
        );
        assert_eq!(
            DispatchError::InvalidUrl("::".to_string()).kind(),
            CheckErrorKind::InvalidUrl
        );
    }

    #[test]
    fn timeout_message_names_the_limit() {
        let err = DispatchError::Timeout { timeout_ms: 30_000 };
        assert_eq!(err.to_string(), "request timed out after 30000 ms");
    }
}
