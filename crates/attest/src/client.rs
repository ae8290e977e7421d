//! Test client bound to one base URL.

use std::sync::Arc;

use attest_application::{CheckExecutionExt, CustomCheck, DispatchError, ExecuteCheck};
use attest_domain::config::ClientConfig;
use attest_domain::expect::{ExpectationSet, Outcome};
use attest_domain::request::{HttpMethod, Request};
use attest_infrastructure::{ExpectationEngine, ReqwestDispatcher};

use crate::builder::RequestBuilder;

/// The wired use case behind every client.
type Engine = ExecuteCheck<ReqwestDispatcher, ExpectationEngine>;

/// Entry point of the DSL: a reusable test client bound to one base URL.
///
/// Cloning is cheap and clones share the underlying connection pool, so one
/// client can serve many `#[test]` functions concurrently.
///
/// Construction never fails. An invalid base URL or a failed HTTP client
/// initialization is carried inside the client and surfaces as
/// [`Outcome::Errored`] when the first check runs, keeping call sites fluent.
#[derive(Clone)]
pub struct Client {
    engine: Result<Arc<Engine>, DispatchError>,
}

impl Client {
    /// Creates a client for the given base URL with default configuration.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    /// Creates a client from a full configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let engine = ReqwestDispatcher::new(&config)
            .map(|dispatcher| Arc::new(Engine::new(Arc::new(dispatcher), ExpectationEngine::new())));
        Self { engine }
    }

    /// Starts a GET request for the given path.
    #[must_use]
    pub fn get(&self, path: impl Into<String>) -> RequestBuilder {
        self.request(HttpMethod::Get, path)
    }

    /// Starts a POST request for the given path.
    #[must_use]
    pub fn post(&self, path: impl Into<String>) -> RequestBuilder {
        self.request(HttpMethod::Post, path)
    }

    /// Starts a PUT request for the given path.
    #[must_use]
    pub fn put(&self, path: impl Into<String>) -> RequestBuilder {
        self.request(HttpMethod::Put, path)
    }

    /// Starts a PATCH request for the given path.
    #[must_use]
    pub fn patch(&self, path: impl Into<String>) -> RequestBuilder {
        self.request(HttpMethod::Patch, path)
    }

    /// Starts a DELETE request for the given path.
    #[must_use]
    pub fn delete(&self, path: impl Into<String>) -> RequestBuilder {
        self.request(HttpMethod::Delete, path)
    }

    /// Starts a HEAD request for the given path.
    #[must_use]
    pub fn head(&self, path: impl Into<String>) -> RequestBuilder {
        self.request(HttpMethod::Head, path)
    }

    /// Starts an OPTIONS request for the given path.
    #[must_use]
    pub fn options(&self, path: impl Into<String>) -> RequestBuilder {
        self.request(HttpMethod::Options, path)
    }

    fn request(&self, method: HttpMethod, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(self.clone(), Request::new(method, path))
    }

    /// Runs one check end to end on behalf of [`Expect::run`](crate::expect::Expect::run).
    pub(crate) fn execute(
        &self,
        request: &Request,
        expectations: &ExpectationSet,
        custom: &[CustomCheck],
    ) -> Outcome {
        match &self.engine {
            Ok(engine) => engine
                .execute_with(request, expectations, custom)
                .into_outcome(),
            Err(error) => Outcome::errored(error.kind(), error.to_string()),
        }
    }
}
