//! Attaching the affected file to lower-level errors

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::DomainResult;

/// Names the file an I/O or codec failure happened on.
pub trait IoResultExt<T> {
    /// ```ignore
    /// fs.read(path).for_file("read", path)?;
    /// ```
    fn for_file(self, action: &'static str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn for_file(self, action: &'static str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Io {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Names the file whose content could not be parsed or mapped.
pub trait ParseResultExt<T> {
    fn in_file(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> ParseResultExt<T> for DomainResult<T> {
    fn in_file(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
