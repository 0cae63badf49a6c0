//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent misuse of the tree API, malformed input text
/// and records that cannot be converted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("name must not be empty or a restricted character but is '{0}'")]
    InvalidName(String),

    #[error("value must not be an empty string (line {line})")]
    EmptyValue { line: usize },

    #[error("invalid value '{value}' for '{name}': {reason}")]
    Format {
        name: String,
        value: String,
        reason: String,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("malformed structure: {0}")]
    Structure(String),

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    /// Annotate an error raised while parsing with the 1-based line number.
    ///
    /// Errors that already carry a line number are returned unchanged.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            located @ DomainError::AtLine { .. } => located,
            other => DomainError::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// Line number attached by the parser, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            DomainError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
