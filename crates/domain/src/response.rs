//! HTTP response types
//!
//! A [`Response`] is the raw result of one dispatched request: status code,
//! headers, body bytes, and timing. It is immutable once constructed and is
//! not retained between checks, so it carries no serde support.

use std::borrow::Cow;
use std::time::Duration;

use crate::request::Headers;

/// The raw result of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body as raw bytes
    pub body: Vec<u8>,
    /// Wall-clock duration of the exchange
    pub duration: Duration,
}

impl Response {
    /// Creates a response from raw exchange data.
    #[must_use]
    pub const fn new(status: u16, headers: Headers, body: Vec<u8>, duration: Duration) -> Self {
        Self {
            status,
            headers,
            body,
            duration,
        }
    }

    /// Returns a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Returns the Content-Type header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error if the body is not valid JSON.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns the body length in bytes.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the status code indicates a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns true if the status code indicates a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}
