//! Mod descriptor service
//!
//! A mod consists of a descriptor file in the game's `mod` directory and a
//! content directory named by the descriptor's `path`:
//!
//! ```text
//! <user dir>/
//!   mod/
//!     example.mod                 <- descriptor, path = "mod/example"
//!     example/
//!       common/opinion_modifiers/ <- picked up when reading the mod
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::services::{DocumentService, OpinionModifierService};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt, ParseResultExt};
use crate::domain::{AttributeMap, ModDescriptor, ModField, OpinionModifierFile};
use crate::infrastructure::traits::FileSystem;

/// Directory name holding opinion modifier files inside a mod.
pub const OPINION_MODIFIERS_DIR: &str = "opinion_modifiers";

/// Extension of descriptor files.
pub const DESCRIPTOR_EXTENSION: &str = "mod";

/// A descriptor together with the files found in its content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedMod {
    pub descriptor_file: PathBuf,
    pub descriptor: ModDescriptor,
    pub opinion_modifiers: Vec<OpinionModifierFile>,
}

/// Reads and writes mods.
pub struct ModService {
    fs: Arc<dyn FileSystem>,
    documents: Arc<DocumentService>,
    opinion_modifiers: Arc<OpinionModifierService>,
    attributes: Arc<AttributeMap<ModField>>,
}

impl ModService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        documents: Arc<DocumentService>,
        opinion_modifiers: Arc<OpinionModifierService>,
        attributes: Arc<AttributeMap<ModField>>,
    ) -> Self {
        Self {
            fs,
            documents,
            opinion_modifiers,
            attributes,
        }
    }

    /// Locate a descriptor given as path or as a name relative to `mod_dir`.
    ///
    /// `example`, `example.mod` and `/abs/example.mod` are all accepted.
    pub fn resolve(&self, name: &Path, mod_dir: &Path) -> ApplicationResult<PathBuf> {
        let mut candidates = vec![name.to_path_buf(), mod_dir.join(name)];
        if name.extension().is_none() {
            candidates.push(mod_dir.join(name).with_extension(DESCRIPTOR_EXTENSION));
        }
        candidates
            .into_iter()
            .find(|candidate| self.fs.is_file(candidate))
            .ok_or_else(|| ApplicationError::NotFound(name.to_path_buf()))
    }

    /// Descriptor files directly inside `mod_dir`, sorted by path.
    pub fn list(&self, mod_dir: &Path) -> ApplicationResult<Vec<PathBuf>> {
        if !self.fs.is_dir(mod_dir) {
            return Err(ApplicationError::NotFound(mod_dir.to_path_buf()));
        }
        let files = self
            .fs
            .list_dir_files(mod_dir)
            .for_file("list", mod_dir)?;
        Ok(files
            .into_iter()
            .filter(|f| f.extension().is_some_and(|e| e == DESCRIPTOR_EXTENSION))
            .collect())
    }

    /// Read the descriptor only.
    pub fn read_descriptor(&self, path: &Path) -> ApplicationResult<ModDescriptor> {
        let root = self.documents.parse_file(path)?;
        ModDescriptor::from_node(&self.attributes, &root).in_file(path)
    }

    /// Read the descriptor and the opinion modifier files of its content
    /// directory. A missing content directory yields no files.
    pub fn read(&self, path: &Path) -> ApplicationResult<LoadedMod> {
        debug!("read: descriptor={}", path.display());
        let descriptor = self.read_descriptor(path)?;

        let opinion_modifiers = match descriptor.content_dir(path) {
            Some(dir) if self.fs.is_dir(&dir) => self.read_opinion_modifiers(&dir)?,
            Some(dir) => {
                warn!("Content directory {} does not exist", dir.display());
                Vec::new()
            }
            None => Vec::new(),
        };

        Ok(LoadedMod {
            descriptor_file: path.to_path_buf(),
            descriptor,
            opinion_modifiers,
        })
    }

    fn read_opinion_modifiers(&self, content_dir: &Path) -> ApplicationResult<Vec<OpinionModifierFile>> {
        let files = self
            .fs
            .list_files(content_dir)
            .for_file("scan", content_dir)?;
        files
            .iter()
            .filter(|f| f.parent().is_some_and(|p| p.ends_with(OPINION_MODIFIERS_DIR)))
            .map(|f| {
                debug!("Adding opinion modifier {}", f.display());
                self.opinion_modifiers.read(f)
            })
            .collect()
    }

    /// Validate and write a descriptor. Invalid descriptors leave the file
    /// untouched.
    pub fn write(&self, path: &Path, descriptor: &ModDescriptor) -> ApplicationResult<()> {
        debug!("write: descriptor={}", path.display());
        let root = descriptor.to_node()?;
        self.documents.write_tree(path, &root)
    }
}
