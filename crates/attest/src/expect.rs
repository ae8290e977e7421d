//! Expectation phase of the DSL.

use attest_application::{CheckError, CustomCheck};
use attest_domain::error::ConfigError;
use attest_domain::expect::{Expectation, ExpectationSet, Outcome, StatusRule};
use attest_domain::request::Request;
use attest_domain::response::Response;

use crate::client::Client;

/// Declares expectations against the response of one request.
///
/// Every declared expectation is evaluated against the single response; a
/// failing one records a mismatch and never stops the rest. [`run`](Self::run)
/// returns the full [`Outcome`], [`done`](Self::done) panics on anything but
/// a pass, which is the integration point with `#[test]`.
pub struct Expect {
    client: Client,
    request: Request,
    deferred: Option<ConfigError>,
    expectations: ExpectationSet,
    custom: Vec<CustomCheck>,
}

impl Expect {
    pub(crate) const fn new(
        client: Client,
        request: Request,
        deferred: Option<ConfigError>,
    ) -> Self {
        Self {
            client,
            request,
            deferred,
            expectations: ExpectationSet::new(),
            custom: Vec::new(),
        }
    }

    /// Expects an exact status code.
    #[must_use]
    pub fn status(self, code: u16) -> Self {
        self.push(Expectation::Status {
            expected: StatusRule::exact(code),
        })
    }

    /// Expects a status code in the range `min..=max`.
    #[must_use]
    pub fn status_in(self, min: u16, max: u16) -> Self {
        self.push(Expectation::Status {
            expected: StatusRule::Range { min, max },
        })
    }

    /// Expects a 2xx status code.
    #[must_use]
    pub fn status_success(self) -> Self {
        self.push(Expectation::Status {
            expected: StatusRule::success(),
        })
    }

    /// Expects a 4xx status code.
    #[must_use]
    pub fn status_client_error(self) -> Self {
        self.push(Expectation::Status {
            expected: StatusRule::client_error(),
        })
    }

    /// Expects a 5xx status code.
    #[must_use]
    pub fn status_server_error(self) -> Self {
        self.push(Expectation::Status {
            expected: StatusRule::server_error(),
        })
    }

    /// Expects a header to equal a value.
    ///
    /// Names compare case-insensitively, values compare exactly.
    #[must_use]
    pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(Expectation::HeaderEquals {
            name: name.into(),
            value: value.into(),
        })
    }

    /// Expects a header to be present, with any value.
    #[must_use]
    pub fn header_present(self, name: impl Into<String>) -> Self {
        self.push(Expectation::HeaderPresent { name: name.into() })
    }

    /// Expects a header to be absent.
    #[must_use]
    pub fn header_absent(self, name: impl Into<String>) -> Self {
        self.push(Expectation::HeaderAbsent { name: name.into() })
    }

    /// Expects a header value to match a regular expression.
    #[must_use]
    pub fn header_matches(self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.push(Expectation::HeaderMatches {
            name: name.into(),
            pattern: pattern.into(),
        })
    }

    /// Expects the `Content-Type` to denote the given media kind.
    ///
    /// Accepts the shorthand aliases `json`, `xml`, `html`, `text` and `form`
    /// as well as full media types such as `application/pdf`. Aliases also
    /// match structured suffixes, so `json` accepts
    /// `application/problem+json`.
    #[must_use]
    pub fn media_type(self, kind: impl Into<String>) -> Self {
        self.push(Expectation::MediaType { kind: kind.into() })
    }

    /// Expects the body to parse as JSON equal to the given document.
    ///
    /// Comparison is structural: object key order and whitespace are
    /// irrelevant.
    #[must_use]
    pub fn json(self, expected: serde_json::Value) -> Self {
        self.push(Expectation::JsonEquals { expected })
    }

    /// Expects the exact body text.
    #[must_use]
    pub fn body(self, expected: impl Into<String>) -> Self {
        self.push(Expectation::BodyEquals {
            expected: expected.into(),
        })
    }

    /// Expects the body to contain a substring.
    #[must_use]
    pub fn body_contains(self, text: impl Into<String>) -> Self {
        self.push(Expectation::BodyContains { text: text.into() })
    }

    /// Expects the body to match a regular expression.
    #[must_use]
    pub fn body_matches(self, pattern: impl Into<String>) -> Self {
        self.push(Expectation::BodyMatches {
            pattern: pattern.into(),
        })
    }

    /// Expects the body to be exactly this many bytes long.
    #[must_use]
    pub fn body_length(self, expected: usize) -> Self {
        self.push(Expectation::BodyLength { expected })
    }

    /// Registers a custom check against the raw response.
    ///
    /// Returning `Err(reason)` records one mismatch alongside the declarative
    /// expectations; the closure must never panic to fail.
    #[must_use]
    pub fn assert_fn<F>(mut self, check: F) -> Self
    where
        F: Fn(&Response) -> Result<(), String> + Send + Sync + 'static,
    {
        self.custom.push(Box::new(check));
        self
    }

    /// Executes the request and evaluates every expectation.
    ///
    /// Returns [`Outcome::Errored`] without touching the network when the
    /// chain carries a deferred configuration error.
    #[must_use]
    pub fn run(self) -> Outcome {
        if let Some(error) = self.deferred {
            let error = CheckError::from(error);
            return Outcome::errored(error.kind(), error.to_string());
        }
        self.client
            .execute(&self.request, &self.expectations, &self.custom)
    }

    /// Executes the check and panics unless every expectation passed.
    ///
    /// # Panics
    ///
    /// Panics with the formatted report when the check fails or errors. This
    /// is the terminal call inside `#[test]` functions.
    pub fn done(self) {
        self.run().assert();
    }

    fn push(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use attest_domain::expect::CheckErrorKind;

    /// A value whose serialization always fails.
    struct Unserializable;

    impl serde::Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refused"))
        }
    }

    fn client() -> Client {
        Client::new("http://127.0.0.1:9")
    }

    #[test]
    fn chain_accumulates_expectations_in_order() {
        let expect = client()
            .get("/get")
            .expect()
            .status(200)
            .header("Server", "apache")
            .media_type("json")
            .body_length(12);
        assert_eq!(expect.expectations.len(), 4);
        let descriptions: Vec<_> = expect
            .expectations
            .iter()
            .map(Expectation::description)
            .collect();
        assert_eq!(
            descriptions,
            vec![
                "Status code = 200",
                "Header 'Server' equals 'apache'",
                "Content-Type is 'json'",
                "Body length = 12",
            ]
        );
    }

    #[test]
    fn custom_checks_are_kept_separately() {
        let expect = client()
            .get("/get")
            .expect()
            .status(200)
            .assert_fn(|response| {
                if response.body.is_empty() {
                    Err("empty body".to_string())
                } else {
                    Ok(())
                }
            });
        assert_eq!(expect.expectations.len(), 1);
        assert_eq!(expect.custom.len(), 1);
    }

    #[test]
    fn empty_path_errors_before_any_io() {
        let outcome = client().get("").expect().status(200).run();
        let Outcome::Errored { kind, message } = outcome else {
            unreachable!("expected an errored outcome");
        };
        assert_eq!(kind, CheckErrorKind::InvalidConfig);
        assert!(message.contains("path"));
    }

    #[test]
    fn invalid_base_url_errors_before_any_io() {
        let outcome = Client::new("ftp://example.com")
            .get("/get")
            .expect()
            .run();
        let Outcome::Errored { kind, .. } = outcome else {
            unreachable!("expected an errored outcome");
        };
        assert_eq!(kind, CheckErrorKind::InvalidUrl);
    }

    #[test]
    fn deferred_builder_errors_surface_at_run() {
        let outcome = client()
            .post("/post")
            .json(&Unserializable)
            .expect()
            .status(200)
            .run();
        let Outcome::Errored { kind, message } = outcome else {
            unreachable!("expected an errored outcome");
        };
        assert_eq!(kind, CheckErrorKind::InvalidBody);
        assert!(message.contains("refused"));
    }
}
