//! Evaluation report for one checked response.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Mismatch;

/// The outcome of evaluating an expectation set against one response.
///
/// Carries the full mismatch list, never just the first failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckReport {
    /// Total number of expectations evaluated.
    pub total: usize,
    /// Expectations that failed, in evaluation order.
    pub mismatches: Vec<Mismatch>,
    /// Wall-clock duration of the HTTP exchange.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    /// When the check was executed.
    pub executed_at: DateTime<Utc>,
}

impl CheckReport {
    /// Create a report, stamping it with the current time.
    #[must_use]
    pub fn new(total: usize, mismatches: Vec<Mismatch>, duration: Duration) -> Self {
        Self {
            total,
            mismatches,
            duration,
            executed_at: Utc::now(),
        }
    }

    /// Check if every expectation passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Number of expectations that passed.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.total - self.mismatches.len()
    }

    /// Number of expectations that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.mismatches.len()
    }

    /// Render the mismatch list as a multi-line summary.
    #[must_use]
    pub fn render(&self) -> String {
        if self.all_passed() {
            return format!("all {} expectations passed", self.total);
        }
        let mut out = format!("{} of {} expectations failed:", self.failed(), self.total);
        for mismatch in &self.mismatches {
            out.push_str("\n  - ");
            out.push_str(&mismatch.to_string());
            if let Some(observed) = &mismatch.observed {
                out.push_str(&format!(" (observed: {observed})"));
            }
        }
        out
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Truncation is acceptable: durations over ~584 million years are not realistic
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_add_up() {
        let report = CheckReport::new(
            4,
            vec![
                Mismatch::new("Status code = 200", "expected 200, got 500"),
                Mismatch::new("Content-Type is 'json'", "no Content-Type header"),
            ],
            Duration::from_millis(80),
        );
        assert_eq!(report.total, 4);
        assert_eq!(report.passed(), 2);
        assert_eq!(report.failed(), 2);
        assert!(!report.all_passed());
    }

    #[test]
    fn render_lists_every_mismatch() {
        let report = CheckReport::new(
            3,
            vec![
                Mismatch::with_observed("Status code = 200", "500", "expected 200, got 500"),
                Mismatch::new("Body contains 'ok'", "substring not found"),
            ],
            Duration::from_millis(5),
        );
        let rendered = report.render();
        assert!(rendered.starts_with("2 of 3 expectations failed:"));
        assert!(rendered.contains("Status code = 200: expected 200, got 500 (observed: 500)"));
        assert!(rendered.contains("Body contains 'ok': substring not found"));
    }

    #[test]
    fn render_when_everything_passed() {
        let report = CheckReport::new(2, Vec::new(), Duration::from_millis(5));
        assert_eq!(report.render(), "all 2 expectations passed");
    }

    #[test]
    fn duration_serializes_as_millis() {
        let report = CheckReport::new(1, Vec::new(), Duration::from_millis(1500));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["duration"], serde_json::json!(1500));
        let back: CheckReport = serde_json::from_value(json).unwrap();
        assert_eq!(back.duration, Duration::from_millis(1500));
    }
}
