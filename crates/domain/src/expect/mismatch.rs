//! Record of a single failed expectation.

use serde::{Deserialize, Serialize};

/// One expectation that the response did not satisfy.
///
/// Pure data: the expectation description, what was actually observed (when
/// there was something to observe), and the reason the check failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mismatch {
    /// Description of the expectation that failed.
    pub expectation: String,
    /// The observed value, if one was available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed: Option<String>,
    /// Why the check failed.
    pub reason: String,
}

impl Mismatch {
    /// Create a mismatch without an observed value.
    #[must_use]
    pub fn new(expectation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            expectation: expectation.into(),
            observed: None,
            reason: reason.into(),
        }
    }

    /// Create a mismatch carrying the observed value.
    #[must_use]
    pub fn with_observed(
        expectation: impl Into<String>,
        observed: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            expectation: expectation.into(),
            observed: Some(observed.into()),
            reason: reason.into(),
        }
    }

    /// Create a mismatch reported by a custom check.
    #[must_use]
    pub fn custom(reason: impl Into<String>) -> Self {
        Self {
            expectation: "Custom check".to_string(),
            observed: None,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.expectation, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_joins_expectation_and_reason() {
        let mismatch = Mismatch::with_observed(
            "Status code = 200",
            "500",
            "expected 200, got 500",
        );
        assert_eq!(
            mismatch.to_string(),
            "Status code = 200: expected 200, got 500"
        );
        assert_eq!(mismatch.observed.as_deref(), Some("500"));
    }

    #[test]
    fn custom_mismatch_is_labeled() {
        let mismatch = Mismatch::custom("payload is stale");
        assert_eq!(mismatch.to_string(), "Custom check: payload is stale");
    }
}
