//! Content file replication.
//!
//! Copies every content file under a source directory to the same relative
//! location under a destination directory, dot-prefixed ones included. Other
//! files and directories without content files are not replicated.

use std::path::{Path, PathBuf};

use docsnap_storage::{EntryKind, Storage};
use rayon::prelude::*;

use crate::CONTENT_EXTENSION;
use crate::error::SnapshotError;

/// Copies content files between two directory trees of a [`Storage`].
pub struct Replicator<'a> {
    storage: &'a dyn Storage,
}

impl<'a> Replicator<'a> {
    /// Create a new replicator.
    #[must_use]
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Copy all content files from `source_dir` into `dest_dir`.
    ///
    /// Destination directories are created as needed and existing files are
    /// overwritten. Returns the number of files copied.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Storage`] on the first listing, directory
    /// creation or copy failure.
    pub fn replicate(&self, source_dir: &Path, dest_dir: &Path) -> Result<usize, SnapshotError> {
        let files = self.collect_files(source_dir, Path::new(""))?;

        files.par_iter().try_for_each(|rel_path| {
            let dest = dest_dir.join(rel_path);
            if let Some(parent) = dest.parent() {
                self.storage.create_dir_all(parent)?;
            }
            self.storage.copy(&source_dir.join(rel_path), &dest)?;
            tracing::debug!(file = %rel_path.display(), "Copied content file");
            Ok::<_, SnapshotError>(())
        })?;

        Ok(files.len())
    }

    /// Recursively collect content file paths relative to `root`.
    fn collect_files(&self, root: &Path, rel_dir: &Path) -> Result<Vec<PathBuf>, SnapshotError> {
        let dir = if rel_dir.as_os_str().is_empty() {
            root.to_path_buf()
        } else {
            root.join(rel_dir)
        };

        let nested: Vec<Vec<PathBuf>> = self
            .storage
            .list_dir(&dir)?
            .into_par_iter()
            .map(|entry| match entry.kind {
                EntryKind::Dir => self.collect_files(root, &rel_dir.join(&entry.name)),
                _ if entry.has_extension(CONTENT_EXTENSION) => Ok(vec![rel_dir.join(&entry.name)]),
                _ => Ok(Vec::new()),
            })
            .collect::<Result<_, _>>()?;

        Ok(nested.into_iter().flatten().collect())
    }
}
