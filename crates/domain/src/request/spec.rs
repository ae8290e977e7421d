//! Request description type

use serde::{Deserialize, Serialize};

use super::{AuthScheme, Headers, HttpMethod, QueryParams, RequestBody};
use crate::error::{ConfigError, ConfigResult};

/// Complete description of one HTTP request to dispatch.
///
/// A request is plain data: it carries no client handle and no network state,
/// and it is not modified once handed to a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the client base URL (e.g., `/get`)
    pub path: String,
    /// Query string parameters
    #[serde(default)]
    pub query: QueryParams,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthScheme,
    /// Per-request timeout override in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Request {
    /// Creates a request for the given method and path.
    ///
    /// A missing leading `/` is added so that paths join cleanly onto the
    /// client base URL.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.is_empty() && !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self {
            method,
            path,
            query: QueryParams::new(),
            headers: Headers::new(),
            body: RequestBody::none(),
            auth: AuthScheme::default(),
            timeout_ms: None,
        }
    }

    /// Creates a GET request for the given path.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Validates the request configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPath`] if the path is empty.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.path.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        Ok(())
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::get("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_request_defaults() {
        let req = Request::get("/users");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/users");
        assert!(req.headers.is_empty());
        assert!(req.body.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_leading_slash_is_added() {
        let req = Request::new(HttpMethod::Post, "users");
        assert_eq!(req.path, "/users");
    }

    #[test]
    fn empty_path_fails_validation() {
        let req = Request::new(HttpMethod::Get, "");
        assert_eq!(req.validate(), Err(ConfigError::EmptyPath));
    }
}
