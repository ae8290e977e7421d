//! Fluent request construction.

use std::time::Duration;

use attest_domain::error::ConfigError;
use attest_domain::request::{AuthScheme, Request, RequestBody};
use serde::Serialize;

use crate::client::Client;
use crate::expect::Expect;

/// Fluent builder for one HTTP request.
///
/// Every method consumes and returns the builder, so a chain reads as one
/// sentence. Nothing touches the network until [`Expect::run`] or
/// [`Expect::done`] executes the check; an abandoned builder costs nothing.
///
/// Errors raised while building, such as an unencodable body, are deferred:
/// the chain stays fluent and the stored error becomes
/// [`Outcome::Errored`](attest_domain::expect::Outcome::Errored) at run time.
#[derive(Clone)]
pub struct RequestBuilder {
    client: Client,
    request: Request,
    deferred: Option<ConfigError>,
}

impl RequestBuilder {
    pub(crate) const fn new(client: Client, request: Request) -> Self {
        Self {
            client,
            request,
            deferred: None,
        }
    }

    /// Sets a header, replacing any previous value for the same name.
    ///
    /// Header names compare case-insensitively, so `set_header("foo", "1")`
    /// followed by `set_header("FOO", "2")` leaves a single `FOO: 2` entry.
    #[must_use]
    pub fn set_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.set(name, value);
        self
    }

    /// Sets several headers at once, in iteration order.
    #[must_use]
    pub fn set_headers<N, V>(mut self, headers: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.request.headers.set(name, value);
        }
        self
    }

    /// Appends a query string parameter. Repeated names are kept.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.add(name, value);
        self
    }

    /// Sets a JSON body, serializing the value.
    ///
    /// `Content-Type: application/json` is sent unless the chain sets the
    /// header explicitly.
    #[must_use]
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(content) => self.request.body = RequestBody::json(content),
            Err(e) => self.defer(ConfigError::InvalidBody(e.to_string())),
        }
        self
    }

    /// Sets a plain text body.
    #[must_use]
    pub fn body_text(mut self, content: impl Into<String>) -> Self {
        self.request.body = RequestBody::text(content);
        self
    }

    /// Sets a raw body with an explicit content type.
    #[must_use]
    pub fn body_raw(
        mut self,
        content: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        self.request.body = RequestBody::raw(content, content_type);
        self
    }

    /// Sets a form-urlencoded body, serializing the value.
    ///
    /// Accepts anything `serde_urlencoded` can encode, typically a slice of
    /// name/value pairs.
    #[must_use]
    pub fn form<T: Serialize>(mut self, form: &T) -> Self {
        match serde_urlencoded::to_string(form) {
            Ok(encoded) => self.request.body = RequestBody::form_urlencoded(encoded),
            Err(e) => self.defer(ConfigError::InvalidBody(e.to_string())),
        }
        self
    }

    /// Sends credentials as a `Basic` authorization header.
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.request.auth = AuthScheme::basic(username, password);
        self
    }

    /// Sends a token as a `Bearer` authorization header.
    #[must_use]
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.request.auth = AuthScheme::bearer(token);
        self
    }

    /// Overrides the client timeout for this request only.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Finishes building and moves to the expectation phase.
    #[must_use]
    pub fn expect(self) -> Expect {
        Expect::new(self.client, self.request, self.deferred)
    }

    /// Records a building error. The first error wins.
    fn defer(&mut self, error: ConfigError) {
        if self.deferred.is_none() {
            self.deferred = Some(error);
        }
    }
}
