//! Opinion modifier file service

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::DocumentService;
use crate::application::{ApplicationResult, ParseResultExt};
use crate::domain::{AttributeMap, OpinionField, OpinionModifierFile};

/// Reads and writes opinion modifier files.
pub struct OpinionModifierService {
    documents: Arc<DocumentService>,
    attributes: Arc<AttributeMap<OpinionField>>,
}

impl OpinionModifierService {
    pub fn new(documents: Arc<DocumentService>, attributes: Arc<AttributeMap<OpinionField>>) -> Self {
        Self {
            documents,
            attributes,
        }
    }

    pub fn read(&self, path: &Path) -> ApplicationResult<OpinionModifierFile> {
        debug!("read: path={}", path.display());
        let root = self.documents.parse_file(path)?;
        OpinionModifierFile::from_node(path, &self.attributes, &root).in_file(path)
    }

    /// Write the file to its own path. A file without modifiers is rejected
    /// before anything is written.
    pub fn write(&self, file: &OpinionModifierFile) -> ApplicationResult<()> {
        debug!(
            "write: path={}, {} modifiers",
            file.path().display(),
            file.modifiers().len()
        );
        let root = file.to_node()?;
        self.documents.write_tree(file.path(), &root)
    }
}
