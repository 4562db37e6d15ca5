//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - the query resolved to exactly one link
//! - `1`: General error - unspecified failure
//! - `3-125`: Specific recoverable errors
//! - `126-255`: Reserved by shell

use crate::error::{IndexError, ResolutionError};

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// No single link for the query: nothing matched, or several did (code 3)
    NotFound = 3,

    /// The query itself is malformed (code 4)
    InvalidQuery = 4,

    /// The artifact set could not be scanned (code 5)
    IndexBuildFailure = 5,

    /// Configuration error (code 6)
    ConfigError = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    /// Exit code for a failed resolution
    pub fn from_resolution_error(error: &ResolutionError) -> Self {
        if error.is_user_error() {
            ExitCode::InvalidQuery
        } else if error.is_not_found() {
            ExitCode::NotFound
        } else {
            ExitCode::GeneralError
        }
    }

    /// Convert an `IndexError` to the appropriate exit code.
    pub fn from_error(error: &IndexError) -> Self {
        match error {
            IndexError::ArtifactRoot { .. } => ExitCode::IndexBuildFailure,
            IndexError::ConfigError { .. } => ExitCode::ConfigError,
        }
    }

    /// Check if this exit code indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }

    /// Get a human-readable description of the exit code.
    pub fn description(&self) -> &str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::NotFound => "Link not found",
            ExitCode::InvalidQuery => "Invalid query",
            ExitCode::IndexBuildFailure => "Index build failure",
            ExitCode::ConfigError => "Configuration error",
        }
    }
}
