//! Expectation and evaluation domain types

mod expectation;
mod mismatch;
mod outcome;
mod report;

pub use expectation::{Expectation, ExpectationSet, StatusRule};
pub use mismatch::Mismatch;
pub use outcome::{CheckErrorKind, Outcome};
pub use report::CheckReport;
