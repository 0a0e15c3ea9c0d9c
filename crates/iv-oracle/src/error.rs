//! Error types for roll validation.

use thiserror::Error;

use crate::path::RollPath;
use crate::roll::RollKind;

/// Result type for textual roll operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// What was wrong at the failing location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollIssue {
    /// The value is not a JSON object.
    #[error("expected an object")]
    NotAnObject,

    /// A required field is absent.
    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),

    /// A field holds the wrong JSON type.
    #[error("expected {expected}")]
    WrongType {
        /// Description of the expected type.
        expected: &'static str,
    },

    /// The roll value is zero.
    #[error("roll must be a positive integer")]
    NotPositive,

    /// The roll is a float too large to hold an exact integer.
    #[error("roll is out of range")]
    OutOfRange,

    /// The `kind` tag names no known variant.
    #[error("unknown roll kind \"{0}\"")]
    UnknownKind(String),

    /// A field does not belong to the declared kind.
    #[error("field \"{field}\" is not allowed on a {kind} roll")]
    UnexpectedField {
        /// The offending field.
        field: String,
        /// The declared kind.
        kind: RollKind,
    },

    /// A template roll is stored under an empty name.
    #[error("template roll names must not be empty")]
    EmptyKey,
}

/// A roll payload that does not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid roll at {path}: {issue}")]
pub struct RollValidationError {
    /// Where the payload went wrong.
    pub path: RollPath,
    /// What went wrong there.
    pub issue: RollIssue,
}

impl RollValidationError {
    /// Build an error at a path.
    pub fn new(path: RollPath, issue: RollIssue) -> Self {
        Self { path, issue }
    }
}

/// Errors from the textual entry points.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON does not match the roll grammar.
    #[error(transparent)]
    Invalid(#[from] RollValidationError),
}
