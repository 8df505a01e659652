//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading and writing documentation trees on the
//! local filesystem.

use std::fs;
use std::path::Path;

use crate::storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Local filesystem storage.
///
/// Paths are used as given. Directory listings are sorted by file name so
/// repeated runs over an unchanged tree see the same order on every platform.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use docsnap_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new();
/// for entry in storage.list_dir(Path::new("docs/builders"))? {
///     println!("{} ({:?})", entry.name, entry.kind);
/// }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl FsStorage {
    /// Create a new filesystem storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Classify a directory entry, following symlinks.
    fn entry_kind(path: &Path) -> EntryKind {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => EntryKind::Dir,
            Ok(meta) if meta.is_file() => EntryKind::File,
            _ => EntryKind::Other,
        }
    }

    fn error(err: std::io::Error, path: &Path) -> StorageError {
        StorageError::io(err, path).with_backend(BACKEND)
    }
}

impl Storage for FsStorage {
    fn list_dir(&self, dir: &Path) -> Result<Vec<Entry>, StorageError> {
        let read_dir = fs::read_dir(dir).map_err(|e| Self::error(e, dir))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| Self::error(e, dir))?;
            let Ok(name) = entry.file_name().into_string() else {
                return Err(StorageError::new(StorageErrorKind::InvalidPath)
                    .with_path(entry.path())
                    .with_backend(BACKEND));
            };
            entries.push(Entry {
                kind: Self::entry_kind(&entry.path()),
                name,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path).map_err(|e| Self::error(e, path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        fs::write(path, contents).map_err(|e| Self::error(e, path))
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        fs::copy(from, to).map_err(|e| Self::error(e, from))?;
        tracing::trace!(from = %from.display(), to = %to.display(), "Copied file");
        Ok(())
    }

    fn create_dir_all(&self, dir: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(dir).map_err(|e| Self::error(e, dir))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
