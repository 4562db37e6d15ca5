//! Error types for the documentation link resolver
//!
//! This module provides structured error types using thiserror. Resolution
//! errors are deterministic functions of the query and the index, so none of
//! them are retried; index errors only occur while the index is being built.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while turning a query into a single documentation link
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The query did not start with an identifier
    #[error("Query does not contain an identifier")]
    EmptyIdentifier,

    /// A `type=` filter named something other than a function or property
    #[error("Unknown declaration type '{kind}', expected 'function' or 'property'")]
    InvalidFilterKind { kind: String },

    /// A member query must be exactly `ClassName#memberName`
    #[error("'{identifier}' must contain exactly one '#' separating the class and member names")]
    MalformedMemberIdentifier { identifier: String },

    /// No declaration matched
    #[error("{reason}")]
    NotFound { reason: String },

    /// More than one declaration matched
    #[error("Found multiple candidates for '{identifier}':\n{}", candidates.join("\n"))]
    Ambiguous {
        identifier: String,
        candidates: Vec<String>,
    },
}

impl ResolutionError {
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    pub fn ambiguous(identifier: impl Into<String>, candidates: Vec<String>) -> Self {
        Self::Ambiguous {
            identifier: identifier.into(),
            candidates,
        }
    }

    /// Whether this error should be reported to callers as "link not found".
    ///
    /// Ambiguity is reported the same way: callers are never asked to pick
    /// one of several candidates.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Ambiguous { .. })
    }

    /// Whether the query itself was malformed
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyIdentifier
                | Self::InvalidFilterKind { .. }
                | Self::MalformedMemberIdentifier { .. }
        )
    }

    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::EmptyIdentifier => "EMPTY_IDENTIFIER",
            Self::InvalidFilterKind { .. } => "INVALID_FILTER_KIND",
            Self::MalformedMemberIdentifier { .. } => "MALFORMED_MEMBER_IDENTIFIER",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Ambiguous { .. } => "AMBIGUOUS_IDENTIFIER",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::EmptyIdentifier => vec!["Start the query with a class, member or function name"],
            Self::InvalidFilterKind { .. } => {
                vec!["Use 'type=function', 'type=property' or 'type=function|property'"]
            }
            Self::MalformedMemberIdentifier { .. } => {
                vec!["Write member queries as 'ClassName#memberName'"]
            }
            Self::NotFound { .. } => vec![
                "Check the spelling and capitalization of the identifier",
                "Nested classes are written 'Outer.Inner'",
            ],
            Self::Ambiguous { .. } => vec![
                "Add a 'type=function' or 'type=property' filter",
                "Qualify the class with its enclosing class",
            ],
        }
    }
}

/// Errors that abort building the declaration index
#[derive(Error, Debug)]
pub enum IndexError {
    /// An artifact root could not be scanned at all
    #[error("Failed to scan artifact root '{path}': {source}")]
    ArtifactRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },
}

impl IndexError {
    pub fn status_code(&self) -> String {
        match self {
            Self::ArtifactRoot { .. } => "INDEX_BUILD_FAILURE",
            Self::ConfigError { .. } => "CONFIG_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::ArtifactRoot { .. } => vec![
                "Check that the artifact roots in settings.toml exist and are readable",
                "Build the API classes before starting the resolver",
            ],
            Self::ConfigError { .. } => vec!["Run 'doclink config' to inspect the active settings"],
        }
    }
}

/// Errors raised while decoding one class's declaration metadata.
///
/// These never escape the index builder: the class is skipped instead.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("malformed metadata: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("metadata version {found:?} is newer than the supported version {supported:?}")]
    UnsupportedVersion { found: [u32; 3], supported: [u32; 3] },

    #[error("metadata does not declare a module name")]
    MissingModule,

    #[error("class metadata does not declare a class kind")]
    MissingClassKind,

    #[error("member '{member}' references undeclared type parameter {id}")]
    UnknownTypeParameter { member: String, id: u32 },
}

/// Result type alias for resolution operations
pub type ResolutionResult<T> = Result<T, ResolutionError>;

/// Result type alias for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Result type alias for metadata decoding
pub type MetadataResult<T> = Result<T, MetadataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_class() {
        assert!(ResolutionError::not_found("missing").is_not_found());
        assert!(ResolutionError::ambiguous("foo", vec![]).is_not_found());
        assert!(!ResolutionError::EmptyIdentifier.is_not_found());
        assert!(ResolutionError::EmptyIdentifier.is_user_error());
    }

    #[test]
    fn test_ambiguous_lists_every_candidate() {
        let error = ResolutionError::ambiguous(
            "foo",
            vec!["https://a/foo.html".to_string(), "https://b/foo.html".to_string()],
        );
        assert_eq!(
            error.to_string(),
            "Found multiple candidates for 'foo':\nhttps://a/foo.html\nhttps://b/foo.html"
        );
        assert_eq!(error.status_code(), "AMBIGUOUS_IDENTIFIER");
    }
}
