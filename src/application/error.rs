//! Errors of the file-level services

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;

/// Failures reading, converting or writing game files.
#[derive(Error, Debug)]
pub enum ApplicationError {
    /// Record rejected before writing, or tree API misuse.
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("file does not exist: {0}")]
    NotFound(PathBuf),

    /// Content of `path` is not valid for the requested format.
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    #[error("config error: {message}")]
    Config { message: String },

    /// Reading, writing or transcoding a file failed.
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
