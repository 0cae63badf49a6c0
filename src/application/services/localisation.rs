//! Localisation table service

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::DocumentService;
use crate::application::{ApplicationResult, ParseResultExt};
use crate::domain::LocalisationFile;

/// Reads and writes semicolon separated localisation files.
pub struct LocalisationService {
    documents: Arc<DocumentService>,
}

impl LocalisationService {
    pub fn new(documents: Arc<DocumentService>) -> Self {
        Self { documents }
    }

    pub fn read(&self, path: &Path) -> ApplicationResult<LocalisationFile> {
        let text = self.documents.read_text(path)?;
        let file = LocalisationFile::parse(path, &text).in_file(path)?;
        debug!("read: {} rows from {}", file.rows().len(), path.display());
        Ok(file)
    }

    /// Write the header and all rows to the file's own path.
    pub fn write(&self, file: &LocalisationFile) -> ApplicationResult<()> {
        debug!("write: path={}, {} rows", file.path().display(), file.rows().len());
        self.documents.write_text(file.path(), &file.to_text())
    }
}
