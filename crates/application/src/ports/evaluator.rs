//! Evaluator port

use attest_domain::expect::{ExpectationSet, Mismatch};
use attest_domain::response::Response;

/// Port for evaluating expectations against a response.
///
/// Implementations must evaluate every expectation in the set: evaluation
/// never stops at the first failure, so a set with k failing expectations
/// yields exactly k mismatches, in set order.
pub trait Evaluator: Send + Sync {
    /// Evaluates the set against the response and returns the failures.
    ///
    /// An empty result means every expectation passed.
    fn evaluate(&self, expectations: &ExpectationSet, response: &Response) -> Vec<Mismatch>;
}
