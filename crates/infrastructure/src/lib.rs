//! Attest Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod checks;

pub use adapters::ReqwestDispatcher;
pub use checks::ExpectationEngine;
