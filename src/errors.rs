//! Error types for risk scoring and the surrounding command-line tooling.
//!
//! The scoring engine only ever fails with [`InvalidInputError`], raised when a
//! top-level argument is malformed. Individual follow-up outcomes that cannot be
//! recognized are data-quality issues and are skipped, not reported.
//!
//! [`Error`] wraps the engine error together with configuration, I/O and
//! serialization failures for callers that read cases from disk.

use std::path::PathBuf;
use thiserror::Error;

/// A malformed top-level argument passed to the scoring engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// The outcomes argument was a scalar or object instead of a sequence
    #[error("outcomes must be a sequence, found {found}")]
    NotASequence { found: &'static str },

    /// A case export entry that is not a JSON object
    #[error("case must be an object, found {found}")]
    NotACase { found: &'static str },

    /// Priority outside `low`, `medium`, `high`
    #[error("unknown priority '{0}' (expected low, medium or high)")]
    UnknownPriority(String),

    /// Status outside `open`, `closed`
    #[error("unknown case status '{0}' (expected open or closed)")]
    UnknownStatus(String),
}

/// Main error type for derivapp operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed scoring arguments
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Case file could not be interpreted
    #[error("Input error in {path}: {message}")]
    Input { path: PathBuf, message: String },

    /// Case export whose outer shape is not a list of cases
    #[error("Unsupported case file: {0}")]
    CaseFile(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an input error tied to the file it came from
    pub fn input(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
