//! Error types for skillport

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using skillport's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for skillport
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source root (or another required path) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A source document could not be read
    #[error("Parse error: {0}")]
    Parse(String),

    /// A profile failed to render one skill
    #[error("Transform error: {0}")]
    Transform(String),

    /// Persisting a rendered artifact failed
    #[error("Write error: {0}")]
    Write(String),

    /// Two skills resolve to the same output slug
    #[error("Conflict: {0}")]
    Conflict(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Check if the error aborts a whole run instead of one document
    pub fn is_fatal(&self) -> bool {
        self.failure_kind().is_none()
    }

    /// Classify a per-document error for the run report.
    ///
    /// Returns `None` for errors that are not scoped to a single document.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Error::Parse(_) => Some(FailureKind::Parse),
            Error::Transform(_) => Some(FailureKind::Transform),
            Error::Write(_) => Some(FailureKind::Write),
            Error::Conflict(_) => Some(FailureKind::Conflict),
            _ => None,
        }
    }
}

/// Kind of a recorded per-document failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Parse,
    Transform,
    Write,
    Conflict,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Parse => write!(f, "parse"),
            FailureKind::Transform => write!(f, "transform"),
            FailureKind::Write => write!(f, "write"),
            FailureKind::Conflict => write!(f, "conflict"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_classification() {
        assert_eq!(
            Error::Transform("x".into()).failure_kind(),
            Some(FailureKind::Transform)
        );
        assert_eq!(Error::Write("x".into()).failure_kind(), Some(FailureKind::Write));
        assert!(Error::NotFound("skills".into()).is_fatal());
        assert!(!Error::Conflict("dup".into()).is_fatal());
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::Parse.to_string(), "parse");
        assert_eq!(FailureKind::Conflict.to_string(), "conflict");
    }
}
