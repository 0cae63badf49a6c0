//! Reading and writing game text files
//!
//! All files go through the Windows-1252 codec and are read and written
//! whole. Parse failures are reported together with the file they came from.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, ParseResultExt};
use crate::domain::{Node, Parser};
use crate::infrastructure::encoding;
use crate::infrastructure::traits::FileSystem;

/// Parses files into trees and writes trees back.
pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
    parser: Parser,
}

impl DocumentService {
    /// Create a new document service.
    pub fn new(fs: Arc<dyn FileSystem>, parser: Parser) -> Self {
        Self { fs, parser }
    }

    /// Read and decode a whole file.
    pub fn read_text(&self, path: &Path) -> ApplicationResult<String> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::NotFound(path.to_path_buf()));
        }
        let bytes = self.fs.read(path).for_file("read", path)?;
        encoding::decode(&bytes).for_file("decode", path)
    }

    /// Encode and write `text`, replacing any existing file.
    ///
    /// Nothing is written if the text cannot be encoded.
    pub fn write_text(&self, path: &Path, text: &str) -> ApplicationResult<()> {
        debug!("write_text: path={}, {} chars", path.display(), text.len());
        let bytes = encoding::encode(text).for_file("encode", path)?;
        self.fs
            .ensure_parent(path)
            .for_file("create parent directory of", path)?;
        self.fs.write(path, &bytes).for_file("write", path)
    }

    /// Parse a file into a tree below a root node.
    ///
    /// An empty file yields a leaf root.
    #[instrument(level = "debug", skip(self), fields(path = %path.display()))]
    pub fn parse_file(&self, path: &Path) -> ApplicationResult<Node> {
        let text = self.read_text(path)?;
        let root = self.parser.parse_str(&text).in_file(path)?;
        debug!("parse_file: {} top-level nodes", root.children().len());
        Ok(root)
    }

    /// Write a tree in its text form.
    ///
    /// A root without children produces an empty file.
    pub fn write_tree(&self, path: &Path, root: &Node) -> ApplicationResult<()> {
        self.write_text(path, &render(root))
    }

    /// Parse a file and render it in canonical form.
    pub fn format_file(&self, path: &Path) -> ApplicationResult<String> {
        let root = self.parse_file(path)?;
        Ok(render(&root))
    }
}

fn render(root: &Node) -> String {
    if root.is_root() && root.is_leaf() {
        String::new()
    } else {
        root.to_text()
    }
}
