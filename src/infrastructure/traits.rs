//! Filesystem boundary used by the services
//!
//! Game files are read and written whole, as bytes; the services decode
//! them. Mod content is discovered by recursive listing, descriptors by
//! listing the mod directory alone.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Operations the services need on files and directories.
pub trait FileSystem: Send + Sync {
    /// Read the whole file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate the file and write `content` in one go.
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Make sure the directory a file is about to be written to exists.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;

    /// All regular files below `dir`, recursively, sorted by path.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Regular files directly inside `dir`, sorted by path.
    fn list_dir_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// `std::fs` backed implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        regular_files(WalkDir::new(dir))
    }

    fn list_dir_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        regular_files(WalkDir::new(dir).max_depth(1))
    }
}

fn regular_files(walk: WalkDir) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walk.sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
