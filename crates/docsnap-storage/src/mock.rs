//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};

const BACKEND: &str = "Mock";

#[derive(Debug, Clone)]
enum MockNode {
    File(String),
    Dir,
}

/// In-memory storage for testing.
///
/// Holds files and directories in insertion order; [`Storage::list_dir`]
/// returns children in that order, which lets tests pin down that callers
/// preserve listing order rather than sorting. Adding a file implicitly adds
/// its ancestor directories.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use docsnap_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("docs/builders/index.mdx", "---\nnav_title: Builders\n---\n")
///     .with_dir("docs/builders/amazon");
///
/// let entries = storage.list_dir(Path::new("docs/builders")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    nodes: RwLock<Vec<(PathBuf, MockNode)>>,
    failing: RwLock<HashSet<PathBuf>>,
    listed: RwLock<Vec<PathBuf>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content, creating missing ancestors.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.insert_ancestors(&path);
        self.upsert(path, MockNode::File(content.into()));
        self
    }

    /// Add a directory, creating missing ancestors.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.insert_ancestors(&path);
        self.upsert(path, MockNode::Dir);
        self
    }

    /// Make every operation touching `path` fail with `PermissionDenied`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, path: impl Into<PathBuf>) -> Self {
        self.failing.write().unwrap().insert(path.into());
        self
    }

    /// Content of the file at `path`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.node(path.as_ref()) {
            Some(MockNode::File(content)) => Some(content),
            _ => None,
        }
    }

    /// All file paths currently stored under `dir`, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn files_under(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = dir.as_ref();
        self.nodes
            .read()
            .unwrap()
            .iter()
            .filter(|(p, n)| matches!(n, MockNode::File(_)) && p.starts_with(dir))
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// Directories passed to [`Storage::list_dir`] so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn listed_dirs(&self) -> Vec<PathBuf> {
        self.listed.read().unwrap().clone()
    }

    fn node(&self, path: &Path) -> Option<MockNode> {
        self.nodes
            .read()
            .unwrap()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, n)| n.clone())
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(MockNode::Dir))
    }

    fn upsert(&self, path: PathBuf, node: MockNode) {
        let mut nodes = self.nodes.write().unwrap();
        if let Some(slot) = nodes.iter_mut().find(|(p, _)| *p == path) {
            slot.1 = node;
        } else {
            nodes.push((path, node));
        }
    }

    fn insert_ancestors(&self, path: &Path) {
        let mut ancestors: Vec<_> = path
            .ancestors()
            .skip(1)
            .filter(|a| !a.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect();
        ancestors.reverse();
        for ancestor in ancestors {
            if self.node(&ancestor).is_none() {
                self.upsert(ancestor, MockNode::Dir);
            }
        }
    }

    fn check_failure(&self, path: &Path) -> Result<(), StorageError> {
        if self.failing.read().unwrap().contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    fn require_parent_dir(&self, path: &Path) -> Result<(), StorageError> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.is_dir(parent) => {
                Err(Self::not_found(parent))
            }
            _ => Ok(()),
        }
    }

    fn not_found(path: &Path) -> StorageError {
        StorageError::not_found(path).with_backend(BACKEND)
    }
}

impl Storage for MockStorage {
    fn list_dir(&self, dir: &Path) -> Result<Vec<Entry>, StorageError> {
        self.check_failure(dir)?;
        if !self.is_dir(dir) {
            return Err(Self::not_found(dir));
        }
        self.listed.write().unwrap().push(dir.to_path_buf());

        let entries = self
            .nodes
            .read()
            .unwrap()
            .iter()
            .filter(|(p, _)| p.parent() == Some(dir))
            .filter_map(|(p, n)| {
                let name = p.file_name()?.to_string_lossy().into_owned();
                let kind = match n {
                    MockNode::File(_) => EntryKind::File,
                    MockNode::Dir => EntryKind::Dir,
                };
                Some(Entry { name, kind })
            })
            .collect();
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        self.check_failure(path)?;
        self.file(path).ok_or_else(|| Self::not_found(path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        self.check_failure(path)?;
        self.require_parent_dir(path)?;
        if self.is_dir(path) {
            return Err(StorageError::new(StorageErrorKind::AlreadyExists)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.upsert(path.to_path_buf(), MockNode::File(contents.to_owned()));
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        let content = self.read_to_string(from)?;
        self.write(to, &content)
    }

    fn create_dir_all(&self, dir: &Path) -> Result<(), StorageError> {
        self.check_failure(dir)?;
        if matches!(self.node(dir), Some(MockNode::File(_))) {
            return Err(StorageError::new(StorageErrorKind::AlreadyExists)
                .with_path(dir)
                .with_backend(BACKEND));
        }
        self.insert_ancestors(dir);
        self.upsert(dir.to_path_buf(), MockNode::Dir);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.node(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_list_dir_insertion_order() {
        let storage = MockStorage::new()
            .with_file("docs/builders/zeta.mdx", "z")
            .with_dir("docs/builders/amazon")
            .with_file("docs/builders/index.mdx", "i");

        let entries = storage.list_dir(Path::new("docs/builders")).unwrap();

        assert_eq!(
            entries,
            vec![
                Entry::file("zeta.mdx"),
                Entry::dir("amazon"),
                Entry::file("index.mdx"),
            ]
        );
    }

    #[test]
    fn test_with_file_creates_ancestors() {
        let storage = MockStorage::new().with_file("docs/builders/amazon/ebs.mdx", "x");

        assert!(storage.exists(Path::new("docs")));
        assert!(storage.exists(Path::new("docs/builders/amazon")));
        assert_eq!(
            storage.list_dir(Path::new("docs")).unwrap(),
            vec![Entry::dir("builders")]
        );
    }

    #[test]
    fn test_list_dir_missing() {
        let storage = MockStorage::new();

        let err = storage.list_dir(Path::new("docs")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_list_dir_on_file_fails() {
        let storage = MockStorage::new().with_file("docs/a.mdx", "a");

        assert!(storage.list_dir(Path::new("docs/a.mdx")).is_err());
    }

    #[test]
    fn test_write_requires_parent() {
        let storage = MockStorage::new();

        let err = storage.write(Path::new("out/nav-data.json"), "[]").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_create_dir_all_then_write() {
        let storage = MockStorage::new();

        storage.create_dir_all(Path::new("out/builders")).unwrap();
        storage
            .write(Path::new("out/builders/nav-data.json"), "[]")
            .unwrap();

        assert_eq!(
            storage.file("out/builders/nav-data.json"),
            Some("[]".to_owned())
        );
        assert!(storage.exists(Path::new("out")));
    }

    #[test]
    fn test_copy_overwrites() {
        let storage = MockStorage::new()
            .with_file("docs/a.mdx", "fresh")
            .with_file("out/a.mdx", "stale");

        storage
            .copy(Path::new("docs/a.mdx"), Path::new("out/a.mdx"))
            .unwrap();

        assert_eq!(storage.file("out/a.mdx"), Some("fresh".to_owned()));
    }

    #[test]
    fn test_failure_injection() {
        let storage = MockStorage::new()
            .with_file("docs/a.mdx", "a")
            .with_failure("docs/a.mdx");

        let err = storage.read_to_string(Path::new("docs/a.mdx")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_listed_dirs_records_calls() {
        let storage = MockStorage::new().with_dir("docs/builders");

        storage.list_dir(Path::new("docs")).unwrap();
        storage.list_dir(Path::new("docs/builders")).unwrap();

        assert_eq!(
            storage.listed_dirs(),
            vec![PathBuf::from("docs"), PathBuf::from("docs/builders")]
        );
    }

    #[test]
    fn test_files_under() {
        let storage = MockStorage::new()
            .with_file("docs/builders/a.mdx", "a")
            .with_file("docs/provisioners/b.mdx", "b");

        assert_eq!(
            storage.files_under("docs/builders"),
            vec![PathBuf::from("docs/builders/a.mdx")]
        );
    }
}
