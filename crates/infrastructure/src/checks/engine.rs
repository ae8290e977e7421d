//! Expectation engine implementation.
//!
//! Evaluates declarative expectations against HTTP responses. Every
//! expectation in a set is checked; a failing check produces a mismatch and
//! never aborts the rest of the evaluation. Regex and JSON problems are
//! reported as mismatches too, so evaluation itself cannot fail.

use regex::Regex;

use attest_application::ports::Evaluator;
use attest_domain::expect::{Expectation, ExpectationSet, Mismatch, StatusRule};
use attest_domain::response::Response;

/// Evaluator for the declarative expectation vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectationEngine;

impl ExpectationEngine {
    /// Creates a new engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks a single expectation, returning the mismatch if it failed.
    #[must_use]
    pub fn check(expectation: &Expectation, response: &Response) -> Option<Mismatch> {
        match expectation {
            Expectation::Status { expected } => check_status(expectation, response, expected),
            Expectation::HeaderEquals { name, value } => {
                check_header_equals(expectation, response, name, value)
            }
            Expectation::HeaderPresent { name } => {
                check_header_present(expectation, response, name)
            }
            Expectation::HeaderAbsent { name } => check_header_absent(expectation, response, name),
            Expectation::HeaderMatches { name, pattern } => {
                check_header_matches(expectation, response, name, pattern)
            }
            Expectation::MediaType { kind } => check_media_type(expectation, response, kind),
            Expectation::JsonEquals { expected } => {
                check_json_equals(expectation, response, expected)
            }
            Expectation::BodyEquals { expected } => {
                check_body_equals(expectation, response, expected)
            }
            Expectation::BodyContains { text } => check_body_contains(expectation, response, text),
            Expectation::BodyMatches { pattern } => {
                check_body_matches(expectation, response, pattern)
            }
            Expectation::BodyLength { expected } => {
                check_body_length(expectation, response, *expected)
            }
        }
    }
}

impl Evaluator for ExpectationEngine {
    fn evaluate(&self, expectations: &ExpectationSet, response: &Response) -> Vec<Mismatch> {
        expectations
            .iter()
            .filter_map(|expectation| Self::check(expectation, response))
            .collect()
    }
}

fn check_status(
    expectation: &Expectation,
    response: &Response,
    expected: &StatusRule,
) -> Option<Mismatch> {
    let actual = response.status;
    if expected.matches(actual) {
        return None;
    }
    Some(Mismatch::with_observed(
        expectation.description(),
        actual.to_string(),
        format!("expected status {}, got {actual}", expected.description()),
    ))
}

fn check_header_equals(
    expectation: &Expectation,
    response: &Response,
    name: &str,
    value: &str,
) -> Option<Mismatch> {
    match response.header(name) {
        Some(actual) if actual == value => None,
        Some(actual) => Some(Mismatch::with_observed(
            expectation.description(),
            actual,
            format!("expected '{value}', got '{actual}'"),
        )),
        None => Some(Mismatch::new(
            expectation.description(),
            format!("header '{name}' not found"),
        )),
    }
}

fn check_header_present(
    expectation: &Expectation,
    response: &Response,
    name: &str,
) -> Option<Mismatch> {
    if response.headers.contains(name) {
        return None;
    }
    Some(Mismatch::new(
        expectation.description(),
        format!("header '{name}' not found"),
    ))
}

fn check_header_absent(
    expectation: &Expectation,
    response: &Response,
    name: &str,
) -> Option<Mismatch> {
    response.header(name).map(|actual| {
        Mismatch::with_observed(
            expectation.description(),
            actual,
            format!("header '{name}' should be absent"),
        )
    })
}

fn check_header_matches(
    expectation: &Expectation,
    response: &Response,
    name: &str,
    pattern: &str,
) -> Option<Mismatch> {
    let regex = match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(e) => {
            return Some(Mismatch::new(
                expectation.description(),
                format!("invalid regex pattern '{pattern}': {e}"),
            ));
        }
    };
    match response.header(name) {
        Some(actual) if regex.is_match(actual) => None,
        Some(actual) => Some(Mismatch::with_observed(
            expectation.description(),
            actual,
            format!("value '{actual}' does not match pattern '{pattern}'"),
        )),
        None => Some(Mismatch::new(
            expectation.description(),
            format!("header '{name}' not found"),
        )),
    }
}

fn check_media_type(
    expectation: &Expectation,
    response: &Response,
    kind: &str,
) -> Option<Mismatch> {
    let Some(content_type) = response.content_type() else {
        return Some(Mismatch::new(
            expectation.description(),
            "no Content-Type header present",
        ));
    };
    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return Some(Mismatch::with_observed(
            expectation.description(),
            content_type,
            format!("unparseable Content-Type '{content_type}'"),
        ));
    };
    if media_kind_matches(&mime, kind) {
        return None;
    }
    Some(Mismatch::with_observed(
        expectation.description(),
        content_type,
        format!("Content-Type '{content_type}' is not '{kind}'"),
    ))
}

/// Matches a short media kind alias against a parsed MIME type.
///
/// Aliases cover the common cases; anything else is compared against the
/// type/subtype essence, so exact values like "application/pdf" work too.
fn media_kind_matches(mime: &mime::Mime, kind: &str) -> bool {
    match kind.to_ascii_lowercase().as_str() {
        "json" => mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON),
        "xml" => mime.subtype() == mime::XML || mime.suffix() == Some(mime::XML),
        "html" => mime.subtype() == mime::HTML,
        "text" | "plain" => mime.type_() == mime::TEXT && mime.subtype() == mime::PLAIN,
        "urlencoded" | "form" => mime.subtype() == mime::WWW_FORM_URLENCODED,
        other => mime.essence_str().eq_ignore_ascii_case(other),
    }
}

fn check_json_equals(
    expectation: &Expectation,
    response: &Response,
    expected: &serde_json::Value,
) -> Option<Mismatch> {
    let actual = match response.body_json() {
        Ok(actual) => actual,
        Err(e) => {
            return Some(Mismatch::with_observed(
                expectation.description(),
                preview(&response.body_text()),
                format!("body is not valid JSON: {e}"),
            ));
        }
    };
    if actual == *expected {
        return None;
    }
    Some(Mismatch::with_observed(
        expectation.description(),
        preview(&actual.to_string()),
        format!("JSON body does not equal expected document {expected}"),
    ))
}

fn check_body_equals(
    expectation: &Expectation,
    response: &Response,
    expected: &str,
) -> Option<Mismatch> {
    let body = response.body_text();
    if body == expected {
        return None;
    }
    Some(Mismatch::with_observed(
        expectation.description(),
        preview(&body),
        "body does not equal expected text",
    ))
}

fn check_body_contains(
    expectation: &Expectation,
    response: &Response,
    text: &str,
) -> Option<Mismatch> {
    let body = response.body_text();
    if body.contains(text) {
        return None;
    }
    Some(Mismatch::with_observed(
        expectation.description(),
        preview(&body),
        format!("body does not contain '{text}'"),
    ))
}

fn check_body_matches(
    expectation: &Expectation,
    response: &Response,
    pattern: &str,
) -> Option<Mismatch> {
    let regex = match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(e) => {
            return Some(Mismatch::new(
                expectation.description(),
                format!("invalid regex pattern '{pattern}': {e}"),
            ));
        }
    };
    let body = response.body_text();
    if regex.is_match(&body) {
        return None;
    }
    Some(Mismatch::with_observed(
        expectation.description(),
        preview(&body),
        format!("body does not match pattern '{pattern}'"),
    ))
}

fn check_body_length(
    expectation: &Expectation,
    response: &Response,
    expected: usize,
) -> Option<Mismatch> {
    let actual = response.body_len();
    if actual == expected {
        return None;
    }
    Some(Mismatch::with_observed(
        expectation.description(),
        actual.to_string(),
        format!("expected {expected} bytes, got {actual}"),
    ))
}

/// Truncates a body for display in a mismatch.
fn preview(body: &str) -> String {
    const MAX: usize = 100;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    use attest_domain::request::Headers;

    fn response(status: u16, body: &str, header_pairs: &[(&str, &str)]) -> Response {
        let mut headers = Headers::new();
        for (name, value) in header_pairs {
            headers.set(*name, *value);
        }
        Response::new(
            status,
            headers,
            body.as_bytes().to_vec(),
            Duration::from_millis(50),
        )
    }

    fn json_response(status: u16, body: &str) -> Response {
        response(status, body, &[("Content-Type", "application/json")])
    }

    #[test]
    fn status_exact_and_range() {
        let res = response(204, "", &[]);
        assert!(
            ExpectationEngine::check(
                &Expectation::Status {
                    expected: StatusRule::exact(204)
                },
                &res
            )
            .is_none()
        );
        assert!(
            ExpectationEngine::check(
                &Expectation::Status {
                    expected: StatusRule::success()
                },
                &res
            )
            .is_none()
        );

        let mismatch = ExpectationEngine::check(
            &Expectation::Status {
                expected: StatusRule::exact(200),
            },
            &res,
        )
        .unwrap();
        assert_eq!(mismatch.observed.as_deref(), Some("204"));
        assert_eq!(mismatch.reason, "expected status = 200, got 204");
    }

    #[test]
    fn header_equals_ignores_name_case_only() {
        let res = response(200, "", &[("Server", "apache")]);
        assert!(
            ExpectationEngine::check(
                &Expectation::HeaderEquals {
                    name: "sErVeR".to_string(),
                    value: "apache".to_string()
                },
                &res
            )
            .is_none()
        );
        // Values stay case-sensitive
        let mismatch = ExpectationEngine::check(
            &Expectation::HeaderEquals {
                name: "server".to_string(),
                value: "Apache".to_string(),
            },
            &res,
        )
        .unwrap();
        assert_eq!(mismatch.reason, "expected 'Apache', got 'apache'");
    }

    #[test]
    fn header_presence_and_absence() {
        let res = response(200, "", &[("X-Request-Id", "abc")]);
        assert!(
            ExpectationEngine::check(
                &Expectation::HeaderPresent {
                    name: "x-request-id".to_string()
                },
                &res
            )
            .is_none()
        );
        assert!(
            ExpectationEngine::check(
                &Expectation::HeaderAbsent {
                    name: "X-Powered-By".to_string()
                },
                &res
            )
            .is_none()
        );

        let mismatch = ExpectationEngine::check(
            &Expectation::HeaderAbsent {
                name: "X-Request-Id".to_string(),
            },
            &res,
        )
        .unwrap();
        assert_eq!(mismatch.observed.as_deref(), Some("abc"));
    }

    #[test]
    fn header_matches_pattern() {
        let res = response(200, "", &[("Authorization", "Bearer abc123")]);
        assert!(
            ExpectationEngine::check(
                &Expectation::HeaderMatches {
                    name: "Authorization".to_string(),
                    pattern: r"Bearer \w+".to_string()
                },
                &res
            )
            .is_none()
        );
    }

    #[test]
    fn invalid_regex_is_a_mismatch_not_a_panic() {
        let res = response(200, "body", &[]);
        let mismatch = ExpectationEngine::check(
            &Expectation::BodyMatches {
                pattern: "[unclosed".to_string(),
            },
            &res,
        )
        .unwrap();
        assert!(mismatch.reason.starts_with("invalid regex pattern"));
    }

    #[test]
    fn media_type_aliases() {
        let json = response(
            200,
            "{}",
            &[("Content-Type", "application/json; charset=utf-8")],
        );
        let expect_json = Expectation::MediaType {
            kind: "json".to_string(),
        };
        assert!(ExpectationEngine::check(&expect_json, &json).is_none());

        let problem = response(200, "{}", &[("Content-Type", "application/problem+json")]);
        assert!(ExpectationEngine::check(&expect_json, &problem).is_none());

        let html = response(200, "<html/>", &[("Content-Type", "text/html")]);
        assert!(ExpectationEngine::check(&expect_json, &html).is_some());
        assert!(
            ExpectationEngine::check(
                &Expectation::MediaType {
                    kind: "html".to_string()
                },
                &html
            )
            .is_none()
        );

        let pdf = response(200, "", &[("Content-Type", "application/pdf")]);
        assert!(
            ExpectationEngine::check(
                &Expectation::MediaType {
                    kind: "application/pdf".to_string()
                },
                &pdf
            )
            .is_none()
        );
    }

    #[test]
    fn media_type_without_header_is_a_mismatch() {
        let res = response(200, "{}", &[]);
        let mismatch = ExpectationEngine::check(
            &Expectation::MediaType {
                kind: "json".to_string(),
            },
            &res,
        )
        .unwrap();
        assert_eq!(mismatch.reason, "no Content-Type header present");
    }

    #[test]
    fn json_equals_is_key_order_independent() {
        let res = json_response(200, r#"{"b": 2, "a": 1}"#);
        let expectation = Expectation::JsonEquals {
            expected: serde_json::json!({"a": 1, "b": 2}),
        };
        assert!(ExpectationEngine::check(&expectation, &res).is_none());
    }

    #[test]
    fn json_equals_reports_differences() {
        let res = json_response(200, r#"{"a": 1}"#);
        let mismatch = ExpectationEngine::check(
            &Expectation::JsonEquals {
                expected: serde_json::json!({"a": 2}),
            },
            &res,
        )
        .unwrap();
        assert!(mismatch.reason.contains("does not equal"));
        assert_eq!(mismatch.observed.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn unparseable_json_body_is_a_mismatch() {
        let res = json_response(200, "<html>surprise</html>");
        let mismatch = ExpectationEngine::check(
            &Expectation::JsonEquals {
                expected: serde_json::json!({}),
            },
            &res,
        )
        .unwrap();
        assert!(mismatch.reason.starts_with("body is not valid JSON"));
    }

    #[test]
    fn body_checks() {
        let res = response(200, "Hello World!", &[]);
        assert!(
            ExpectationEngine::check(
                &Expectation::BodyEquals {
                    expected: "Hello World!".to_string()
                },
                &res
            )
            .is_none()
        );
        assert!(
            ExpectationEngine::check(
                &Expectation::BodyContains {
                    text: "World".to_string()
                },
                &res
            )
            .is_none()
        );
        assert!(
            ExpectationEngine::check(
                &Expectation::BodyMatches {
                    pattern: r"^Hello \w+!$".to_string()
                },
                &res
            )
            .is_none()
        );
        assert!(
            ExpectationEngine::check(
                &Expectation::BodyLength { expected: 12 },
                &res
            )
            .is_none()
        );

        let mismatch = ExpectationEngine::check(
            &Expectation::BodyContains {
                text: "world".to_string(),
            },
            &res,
        )
        .unwrap();
        assert_eq!(mismatch.reason, "body does not contain 'world'");
    }

    #[test]
    fn every_failing_expectation_yields_one_mismatch_in_order() {
        let res = json_response(500, r#"{"error": "boom"}"#);
        let set = ExpectationSet::new()
            .with(Expectation::Status {
                expected: StatusRule::exact(200),
            })
            .with(Expectation::MediaType {
                kind: "json".to_string(),
            })
            .with(Expectation::HeaderEquals {
                name: "Server".to_string(),
                value: "apache".to_string(),
            })
            .with(Expectation::JsonEquals {
                expected: serde_json::json!({"error": "boom"}),
            })
            .with(Expectation::BodyLength { expected: 1 });

        let mismatches = ExpectationEngine::new().evaluate(&set, &res);
        assert_eq!(mismatches.len(), 3);
        assert_eq!(mismatches[0].expectation, "Status code = 200");
        assert_eq!(mismatches[1].expectation, "Header 'Server' equals 'apache'");
        assert_eq!(mismatches[2].expectation, "Body length = 1");
    }

    #[test]
    fn empty_set_yields_no_mismatches() {
        let res = response(500, "", &[]);
        let mismatches = ExpectationEngine::new().evaluate(&ExpectationSet::new(), &res);
        assert!(mismatches.is_empty());
    }

    #[test]
    fn long_bodies_are_previewed() {
        let body = "x".repeat(300);
        let res = response(200, &body, &[]);
        let mismatch = ExpectationEngine::check(
            &Expectation::BodyContains {
                text: "missing".to_string(),
            },
            &res,
        )
        .unwrap();
        let observed = mismatch.observed.unwrap();
        assert!(observed.ends_with("..."));
        assert_eq!(observed.chars().count(), 103);
    }
}
