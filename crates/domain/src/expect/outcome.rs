//! Terminal state of one executed check.

use serde::{Deserialize, Serialize};

use super::{CheckReport, Mismatch};

/// The terminal state of a dispatched and evaluated check.
///
/// A check that reached evaluation is `Passed` or `Failed`; a check whose
/// request never produced a response is `Errored`. Expectation mismatches are
/// never errors: they always land in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Every expectation passed.
    Passed {
        /// The evaluation report.
        report: CheckReport,
    },
    /// At least one expectation failed.
    Failed {
        /// The evaluation report with the full mismatch list.
        report: CheckReport,
    },
    /// The request could not be dispatched or completed.
    Errored {
        /// Error category.
        kind: CheckErrorKind,
        /// Human-readable error message.
        message: String,
    },
}

impl Outcome {
    /// Creates an outcome from an evaluation report.
    #[must_use]
    pub fn from_report(report: CheckReport) -> Self {
        if report.all_passed() {
            Self::Passed { report }
        } else {
            Self::Failed { report }
        }
    }

    /// Creates an errored outcome.
    #[must_use]
    pub fn errored(kind: CheckErrorKind, message: impl Into<String>) -> Self {
        Self::Errored {
            kind,
            message: message.into(),
        }
    }

    /// Returns true if every expectation passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    /// Returns true if at least one expectation failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns true if the request never produced a response.
    #[must_use]
    pub const fn is_errored(&self) -> bool {
        matches!(self, Self::Errored { .. })
    }

    /// Returns the evaluation report, if the check reached evaluation.
    #[must_use]
    pub const fn report(&self) -> Option<&CheckReport> {
        match self {
            Self::Passed { report } | Self::Failed { report } => Some(report),
            Self::Errored { .. } => None,
        }
    }

    /// Returns the mismatch list, empty unless the check failed.
    #[must_use]
    pub fn mismatches(&self) -> &[Mismatch] {
        match self {
            Self::Passed { report } | Self::Failed { report } => &report.mismatches,
            Self::Errored { .. } => &[],
        }
    }

    /// Panics unless every expectation passed.
    ///
    /// The panic message carries the full mismatch report, or the dispatch
    /// error for checks that never reached evaluation.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is `Failed` or `Errored`.
    #[track_caller]
    #[allow(clippy::panic)] // surfaces failures to the test harness
    pub fn assert(&self) {
        match self {
            Self::Passed { .. } => {}
            Self::Failed { report } => panic!("{}", report.render()),
            Self::Errored { kind, message } => {
                panic!("check errored: {}: {message}", kind.title());
            }
        }
    }
}

/// Categories of errors that prevent a check from being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckErrorKind {
    /// Invalid request configuration.
    InvalidConfig,

    /// Invalid URL format.
    InvalidUrl,

    /// DNS resolution failed.
    DnsError,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// Could not establish connection.
    ConnectionFailed,

    /// Request timed out.
    Timeout,

    /// Malformed response or other protocol violation.
    Protocol,

    /// Request or response body could not be processed.
    InvalidBody,
}

impl CheckErrorKind {
    /// Returns a human-readable title for this error category.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "Invalid Configuration",
            Self::InvalidUrl => "Invalid URL",
            Self::DnsError => "DNS Resolution Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::ConnectionFailed => "Connection Failed",
            Self::Timeout => "Request Timeout",
            Self::Protocol => "Protocol Error",
            Self::InvalidBody => "Invalid Body",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn empty_mismatch_list_means_passed() {
        let outcome = Outcome::from_report(CheckReport::new(3, Vec::new(), Duration::ZERO));
        assert!(outcome.is_passed());
        assert!(outcome.report().is_some());
        assert!(outcome.mismatches().is_empty());
        outcome.assert();
    }

    #[test]
    fn any_mismatch_means_failed() {
        let report = CheckReport::new(
            2,
            vec![Mismatch::new("Status code = 200", "expected 200, got 500")],
            Duration::ZERO,
        );
        let outcome = Outcome::from_report(report);
        assert!(outcome.is_failed());
        assert_eq!(outcome.mismatches().len(), 1);
    }

    #[test]
    fn errored_has_no_report() {
        let outcome = Outcome::errored(CheckErrorKind::Timeout, "request timed out after 30000 ms");
        assert!(outcome.is_errored());
        assert!(outcome.report().is_none());
        assert!(outcome.mismatches().is_empty());
    }

    #[test]
    #[should_panic(expected = "1 of 2 expectations failed")]
    fn assert_panics_with_the_rendered_report() {
        let report = CheckReport::new(
            2,
            vec![Mismatch::new("Status code = 200", "expected 200, got 500")],
            Duration::ZERO,
        );
        Outcome::from_report(report).assert();
    }

    #[test]
    #[should_panic(expected = "check errored: Connection Refused")]
    fn assert_panics_on_dispatch_errors() {
        Outcome::errored(CheckErrorKind::ConnectionRefused, "connection refused").assert();
    }

    #[test]
    fn error_kind_titles() {
        assert_eq!(CheckErrorKind::Timeout.title(), "Request Timeout");
        assert_eq!(CheckErrorKind::InvalidUrl.title(), "Invalid URL");
    }
}
