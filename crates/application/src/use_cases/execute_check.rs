//! Execute Check use case
//!
//! The primary use case: dispatch one request, evaluate every expectation
//! against the response, and report the result.

use std::sync::Arc;

use attest_domain::expect::{CheckReport, ExpectationSet, Mismatch, Outcome};
use attest_domain::request::Request;
use attest_domain::response::Response;

use crate::error::CheckError;
use crate::ports::{Dispatcher, Evaluator};

/// Result type for check execution.
pub type CheckExecution = Result<CheckReport, CheckError>;

/// A caller-supplied check run against the raw response.
///
/// Custom checks participate in the same mismatch collection as declarative
/// expectations: a returned `Err` becomes one mismatch, never a panic.
pub type CustomCheck = Box<dyn Fn(&Response) -> Result<(), String> + Send + Sync>;

/// Use case for executing checks.
///
/// Encapsulates the flow from validated request to evaluation report. The
/// [`Dispatcher`] port performs the HTTP exchange and the [`Evaluator`] port
/// judges the response; this type owns the ordering and the mismatch
/// accounting.
pub struct ExecuteCheck<D: Dispatcher, E: Evaluator> {
    dispatcher: Arc<D>,
    evaluator: E,
}

impl<D: Dispatcher, E: Evaluator> ExecuteCheck<D, E> {
    /// Creates the use case from its two collaborators.
    pub const fn new(dispatcher: Arc<D>, evaluator: E) -> Self {
        Self {
            dispatcher,
            evaluator,
        }
    }

    /// Executes the request and evaluates the expectation set.
    ///
    /// # Errors
    ///
    /// Returns `CheckError` when the request is invalid or dispatch fails.
    /// Expectation failures are never errors: they are mismatches inside the
    /// returned report.
    pub fn execute(&self, request: &Request, expectations: &ExpectationSet) -> CheckExecution {
        self.execute_with(request, expectations, &[])
    }

    /// Executes the request and evaluates expectations plus custom checks.
    ///
    /// Every expectation and every custom check is evaluated against the
    /// same single response; a failing entry adds one mismatch and never
    /// stops the rest from running.
    ///
    /// # Errors
    ///
    /// Returns `CheckError` when the request is invalid or dispatch fails.
    pub fn execute_with(
        &self,
        request: &Request,
        expectations: &ExpectationSet,
        custom: &[CustomCheck],
    ) -> CheckExecution {
        request.validate()?;

        let response = self.dispatcher.send(request)?;

        let mut mismatches = self.evaluator.evaluate(expectations, &response);
        for check in custom {
            if let Err(reason) = check(&response) {
                mismatches.push(Mismatch::custom(reason));
            }
        }

        let total = expectations.len() + custom.len();
        Ok(CheckReport::new(total, mismatches, response.duration))
    }
}

/// Extension trait for folding an execution result into an [`Outcome`].
pub trait CheckExecutionExt {
    /// Converts the result to the terminal outcome of a check.
    fn into_outcome(self) -> Outcome;
}

impl CheckExecutionExt for CheckExecution {
    fn into_outcome(self) -> Outcome {
        match self {
            Ok(report) => Outcome::from_report(report),
            Err(error) => Outcome::errored(error.kind(), error.to_string()),
        }
    }
}
