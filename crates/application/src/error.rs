//! Application error types

use thiserror::Error;

use attest_domain::error::ConfigError;
use attest_domain::expect::CheckErrorKind;

use crate::ports::DispatchError;

/// Errors that prevent a check from reaching evaluation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckError {
    /// The request or client configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dispatching the request failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl CheckError {
    /// Returns the error category for outcome reporting.
    #[must_use]
    pub const fn kind(&self) -> CheckErrorKind {
        match self {
            Self::Config(error) => match error {
                ConfigError::InvalidBaseUrl(_) => CheckErrorKind::InvalidUrl,
                ConfigError::InvalidBody(_) => CheckErrorKind::InvalidBody,
                ConfigError::EmptyPath
                | ConfigError::UnsupportedMethod(_)
                | ConfigError::InvalidHeaderName(_) => CheckErrorKind::InvalidConfig,
            },
            Self::Dispatch(error) => error.kind(),
        }
    }
}
