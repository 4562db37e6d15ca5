//! Format definitions for CLI output.
//!
//! Provides structured format types for consistent JSON responses.

use crate::error::{IndexError, ResolutionError};
use crate::io::exit_code::ExitCode;
use serde::{Deserialize, Serialize};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON for tool integration
    Json,
}

impl OutputFormat {
    /// Create format from JSON flag.
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }

    /// Check if format is JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Standard JSON response format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResponse<T = serde_json::Value>
where
    T: Serialize,
{
    /// Status: "success" or "error"
    pub status: String,

    /// Result code (e.g., "OK", "NOT_FOUND", "AMBIGUOUS_IDENTIFIER")
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Actual data payload (only for success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error details and suggestions (only for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,

    /// Exit code for shell scripts
    pub exit_code: u8,
}

/// Error details for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Recovery suggestions
    pub suggestions: Vec<String>,
    /// Candidate URLs of an ambiguous query
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    /// Create a success response with data.
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            code: "OK".to_string(),
            message: "Operation completed successfully".to_string(),
            data: Some(data),
            error: None,
            exit_code: ExitCode::Success as u8,
        }
    }
}

impl JsonResponse<serde_json::Value> {
    /// Create an error response from a failed resolution.
    pub fn from_resolution_error(error: &ResolutionError) -> Self {
        let candidates = match error {
            ResolutionError::Ambiguous { candidates, .. } => candidates.clone(),
            _ => Vec::new(),
        };
        Self::error_response(
            error.status_code(),
            error.to_string(),
            error.recovery_suggestions(),
            candidates,
            ExitCode::from_resolution_error(error),
        )
    }

    /// Create an error response from IndexError.
    pub fn from_error(error: &IndexError) -> Self {
        Self::error_response(
            error.status_code(),
            error.to_string(),
            error.recovery_suggestions(),
            Vec::new(),
            ExitCode::from_error(error),
        )
    }

    fn error_response(
        code: String,
        message: String,
        suggestions: Vec<&str>,
        candidates: Vec<String>,
        exit_code: ExitCode,
    ) -> Self {
        Self {
            status: "error".to_string(),
            code,
            message,
            data: None,
            error: Some(ErrorDetails {
                suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
                candidates,
            }),
            exit_code: exit_code as u8,
        }
    }
}
