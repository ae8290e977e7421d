//! Attest - Expectation-driven HTTP testing DSL
//!
//! Attest expresses an end-to-end HTTP test as one fluent chain: build a
//! request, declare expectations, run. The request is dispatched once and
//! every expectation is evaluated against that single response, so one run
//! reports every mismatch at once instead of stopping at the first.
//!
//! ```no_run
//! use attest::Client;
//! use serde_json::json;
//!
//! let client = Client::new("http://127.0.0.1:8080");
//! client
//!     .get("/get")
//!     .set_header("Foo", "Bar")
//!     .expect()
//!     .status(200)
//!     .header("Server", "apache")
//!     .media_type("json")
//!     .json(json!({ "greeting": "hello" }))
//!     .done();
//! ```
//!
//! [`Expect::done`] panics with the full report on failure, which is the
//! integration point with `#[test]`. [`Expect::run`] returns the
//! [`Outcome`] instead, for tests that assert on failures themselves.

pub mod builder;
pub mod client;
pub mod expect;

pub use builder::RequestBuilder;
pub use client::Client;
pub use expect::Expect;

pub use attest_domain::config::ClientConfig;
pub use attest_domain::expect::{
    CheckErrorKind, CheckReport, Expectation, ExpectationSet, Mismatch, Outcome, StatusRule,
};
pub use attest_domain::response::Response;
