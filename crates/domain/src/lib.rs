//! Attest Domain - Core check types
//!
//! This crate defines the domain model for the attest expectation DSL.
//! All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod error;
pub mod expect;
pub mod request;
pub mod response;

pub use config::ClientConfig;
pub use error::{ConfigError, ConfigResult};
pub use expect::{
    CheckErrorKind, CheckReport, Expectation, ExpectationSet, Mismatch, Outcome, StatusRule,
};
pub use request::{
    AuthScheme, Header, Headers, HttpMethod, QueryParam, QueryParams, Request, RequestBody,
    RequestBodyKind,
};
pub use response::Response;
