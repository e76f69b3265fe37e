//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map client, action, configuration and script errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use selchord_client::{ActionError, ClientError};
use selchord_config::ConfigError;
use selchord_core::BindingError;

use crate::replay::ScriptError;

/// Structured exit codes for `selchord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Missing or rejected API key.
    AuthenticationFailed = 2,

    /// Network, timeout, or DNS failure.
    ConnectionError = 3,

    /// Invalid configuration, bindings, or input file.
    ValidationError = 5,

    /// Rate limited on every attempt.
    RateLimited = 7,

    /// SIGINT/Ctrl+C (128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            _ if err.is_auth_error() => ExitCode::AuthenticationFailed,
            ClientError::ApiError { status: 429, .. } | ClientError::MaxRetriesExceeded(_) => {
                ExitCode::RateLimited
            }
            ClientError::Timeout(_) | ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }
            ClientError::InvalidResponse(_) => ExitCode::ValidationError,
            ClientError::MissingApiKey | ClientError::HttpError(_) | ClientError::ApiError { .. } => {
                ExitCode::GeneralError
            }
        }
    }
}

impl From<&ActionError> for ExitCode {
    fn from(err: &ActionError) -> Self {
        match err {
            ActionError::Client(inner) => Self::from(inner),
            ActionError::QueryTooLong { .. } => ExitCode::ValidationError,
            ActionError::EmptyResult { .. } => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(action_err) = cause.downcast_ref::<ActionError>() {
                return ExitCode::from(action_err);
            }
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.downcast_ref::<ConfigError>().is_some()
                || cause.downcast_ref::<ScriptError>().is_some()
                || cause.downcast_ref::<BindingError>().is_some()
                || cause.downcast_ref::<serde_json::Error>().is_some()
            {
                return ExitCode::ValidationError;
            }
        }

        ExitCode::GeneralError
    }
}
