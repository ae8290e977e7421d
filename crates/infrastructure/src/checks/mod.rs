//! Expectation evaluation

mod engine;

pub use engine::ExpectationEngine;
