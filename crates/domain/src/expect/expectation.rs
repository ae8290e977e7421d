//! Declarative expectations over an HTTP response.

use serde::{Deserialize, Serialize};

/// A single expectation to evaluate against a response.
///
/// Expectations are plain data: evaluating them against a concrete response
/// is the job of an evaluator, so a set can be serialized, stored, and
/// replayed without touching the network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expectation {
    /// Check the response status code.
    Status {
        /// Expected status code or range.
        expected: StatusRule,
    },
    /// Check a header exists with exactly this value.
    HeaderEquals {
        /// Header name (case-insensitive).
        name: String,
        /// Expected value (compared exactly).
        value: String,
    },
    /// Check a header exists, whatever its value.
    HeaderPresent {
        /// Header name (case-insensitive).
        name: String,
    },
    /// Check a header does not exist.
    HeaderAbsent {
        /// Header name (case-insensitive).
        name: String,
    },
    /// Check a header value matches a regex pattern.
    HeaderMatches {
        /// Header name (case-insensitive).
        name: String,
        /// Regex pattern to match against the value.
        pattern: String,
    },
    /// Check the Content-Type header denotes a media kind.
    MediaType {
        /// Short media kind (e.g., "json", "xml", "html", "text").
        kind: String,
    },
    /// Check the body parses as JSON structurally equal to a document.
    JsonEquals {
        /// Expected JSON document (key order does not matter).
        expected: serde_json::Value,
    },
    /// Check the body text equals a string exactly.
    BodyEquals {
        /// Expected body content.
        expected: String,
    },
    /// Check the body text contains a substring.
    BodyContains {
        /// Text to search for.
        text: String,
    },
    /// Check the body text matches a regex pattern.
    BodyMatches {
        /// Regex pattern.
        pattern: String,
    },
    /// Check the body length in bytes.
    BodyLength {
        /// Expected length in bytes.
        expected: usize,
    },
}

impl Expectation {
    /// Get a human-readable description of this expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Status { expected } => format!("Status code {}", expected.description()),
            Self::HeaderEquals { name, value } => format!("Header '{name}' equals '{value}'"),
            Self::HeaderPresent { name } => format!("Header '{name}' present"),
            Self::HeaderAbsent { name } => format!("Header '{name}' absent"),
            Self::HeaderMatches { name, pattern } => format!("Header '{name}' matches /{pattern}/"),
            Self::MediaType { kind } => format!("Content-Type is '{kind}'"),
            Self::JsonEquals { .. } => "Body equals expected JSON".to_string(),
            Self::BodyEquals { .. } => "Body equals expected text".to_string(),
            Self::BodyContains { text } => format!("Body contains '{text}'"),
            Self::BodyMatches { pattern } => format!("Body matches /{pattern}/"),
            Self::BodyLength { expected } => format!("Body length = {expected}"),
        }
    }
}

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusRule {
    /// Exact status code.
    Exact(u16),
    /// Inclusive range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
}

impl StatusRule {
    /// Check if a status code satisfies this rule.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => status >= *min && status <= *max,
        }
    }

    /// Get a description of the rule.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
        }
    }

    /// Create an exact status rule.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }

    /// Create a "success" rule (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Create a "client error" rule (400-499).
    #[must_use]
    pub const fn client_error() -> Self {
        Self::Range { min: 400, max: 499 }
    }

    /// Create a "server error" rule (500-599).
    #[must_use]
    pub const fn server_error() -> Self {
        Self::Range { min: 500, max: 599 }
    }
}

/// An ordered set of expectations to evaluate against one response.
///
/// Evaluation never stops early: every expectation in the set is checked so
/// that a single run reports all failures at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ExpectationSet {
    items: Vec<Expectation>,
}

impl ExpectationSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an expectation to the set.
    pub fn push(&mut self, expectation: Expectation) {
        self.items.push(expectation);
    }

    /// Add an expectation (builder pattern).
    #[must_use]
    pub fn with(mut self, expectation: Expectation) -> Self {
        self.items.push(expectation);
        self
    }

    /// Check if the set is empty.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of expectations.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over the expectations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Expectation> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a ExpectationSet {
    type Item = &'a Expectation;
    type IntoIter = std::slice::Iter<'a, Expectation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Expectation> for ExpectationSet {
    fn from_iter<T: IntoIterator<Item = Expectation>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_rule_exact() {
        let rule = StatusRule::exact(200);
        assert!(rule.matches(200));
        assert!(!rule.matches(201));
    }

    #[test]
    fn status_rule_ranges() {
        assert!(StatusRule::success().matches(204));
        assert!(!StatusRule::success().matches(301));
        assert!(StatusRule::client_error().matches(404));
        assert!(StatusRule::server_error().matches(503));
        assert!(!StatusRule::server_error().matches(499));
    }

    #[test]
    fn expectation_descriptions() {
        let status = Expectation::Status {
            expected: StatusRule::exact(200),
        };
        assert_eq!(status.description(), "Status code = 200");

        let header = Expectation::HeaderEquals {
            name: "Server".to_string(),
            value: "apache".to_string(),
        };
        assert_eq!(header.description(), "Header 'Server' equals 'apache'");

        let media = Expectation::MediaType {
            kind: "json".to_string(),
        };
        assert_eq!(media.description(), "Content-Type is 'json'");
    }

    #[test]
    fn set_preserves_insertion_order() {
        let set = ExpectationSet::new()
            .with(Expectation::Status {
                expected: StatusRule::exact(200),
            })
            .with(Expectation::BodyContains {
                text: "ok".to_string(),
            });
        assert_eq!(set.len(), 2);
        let first = set.iter().next().unwrap();
        assert!(matches!(first, Expectation::Status { .. }));
    }

    #[test]
    fn set_round_trips_through_serde() {
        let set = ExpectationSet::new()
            .with(Expectation::Status {
                expected: StatusRule::Range { min: 200, max: 299 },
            })
            .with(Expectation::JsonEquals {
                expected: serde_json::json!({"foo": "bar"}),
            });
        let json = serde_json::to_string(&set).unwrap();
        let back: ExpectationSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
