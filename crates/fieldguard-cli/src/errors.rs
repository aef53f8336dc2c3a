//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes. Errors coming from the core
//! library are classified by their kind, and every verification failure is
//! reported with the same public message.

use std::fmt;

use fieldguard_core::{ErrorKind, ProtectionError};

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config file, master secret)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// A signature or password did not verify
    VerificationFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, .. } => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::VerificationFailed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    pub fn verification_failed(message: impl Into<String>) -> Self {
        CliError::VerificationFailed(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::VerificationFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } => Some(hint),
            _ => None,
        }
    }
}

/// Exit code for a core library error.
pub fn protection_exit_code(err: &ProtectionError) -> i32 {
    match err.kind() {
        ErrorKind::Integrity | ErrorKind::Encoding => exit_codes::INTEGRITY_FAILED,
        ErrorKind::InvalidInput | ErrorKind::UnsupportedLevel => exit_codes::INVALID_INPUT,
        _ => exit_codes::GENERAL,
    }
}

/// A user-facing report for any error reaching `main`.
#[derive(Debug)]
pub struct Report {
    pub message: String,
    pub hint: Option<String>,
    pub exit_code: i32,
}

impl Report {
    pub fn from_error(err: &anyhow::Error) -> Self {
        if let Some(cli_err) = err.chain().find_map(|e| e.downcast_ref::<CliError>()) {
            return Self {
                message: cli_err.to_string(),
                hint: cli_err.hint().map(str::to_string),
                exit_code: cli_err.exit_code(),
            };
        }

        if let Some(core_err) = err
            .chain()
            .find_map(|e| e.downcast_ref::<ProtectionError>())
        {
            let message = if core_err.is_verification_failure() {
                core_err.public_message()
            } else {
                format!("{:#}", err)
            };
            return Self {
                message,
                hint: None,
                exit_code: protection_exit_code(core_err),
            };
        }

        Self {
            message: format!("{:#}", err),
            hint: None,
            exit_code: exit_codes::GENERAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldguard_core::PUBLIC_FAILURE_MESSAGE;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::not_found("x", "y").exit_code(), exit_codes::NOT_FOUND);
        assert_eq!(
            CliError::invalid_input("x").exit_code(),
            exit_codes::INVALID_INPUT
        );
        assert_eq!(
            CliError::verification_failed("x").exit_code(),
            exit_codes::INTEGRITY_FAILED
        );
    }

    #[test]
    fn test_integrity_error_is_collapsed() {
        let err = anyhow::Error::new(ProtectionError::Encoding("invalid hex in tag".into()))
            .context("Failed to decrypt");
        let report = Report::from_error(&err);
        assert_eq!(report.message, PUBLIC_FAILURE_MESSAGE);
        assert_eq!(report.exit_code, exit_codes::INTEGRITY_FAILED);
    }

    #[test]
    fn test_configuration_error_keeps_detail() {
        let err = anyhow::Error::new(ProtectionError::Configuration(
            "master secret must be at least 32 bytes (got 16)".into(),
        ));
        let report = Report::from_error(&err);
        assert!(report.message.contains("at least 32 bytes"));
        assert_eq!(report.exit_code, exit_codes::GENERAL);
    }

    #[test]
    fn test_not_found_carries_hint() {
        let err = anyhow::Error::new(CliError::not_found("No master secret", "Run init"));
        let report = Report::from_error(&err);
        assert_eq!(report.hint.as_deref(), Some("Run init"));
        assert_eq!(report.exit_code, exit_codes::NOT_FOUND);
    }
}
