//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for abstracting directory listing, file
//! reads, writes and copies, along with [`StorageError`] for unified error
//! handling across backends.
//!
//! # Path Convention
//!
//! All path parameters are backend paths. [`FsStorage`](crate::FsStorage) passes
//! them straight to the operating system; [`MockStorage`](crate::MockStorage)
//! uses them as keys exactly as given, so tests should use one consistent form
//! (e.g. `docs/builders/index.mdx`).

use std::path::{Path, PathBuf};

/// Kind of a directory entry returned by [`Storage::list_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Anything else (sockets, broken symlinks, devices).
    Other,
}

/// A single entry directly inside a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// File name of the entry (no directory component).
    pub name: String,
    /// Entry kind.
    pub kind: EntryKind,
}

impl Entry {
    /// Create a file entry.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    /// Create a directory entry.
    #[must_use]
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }

    /// True for dot-prefixed names.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// True when this is a file whose final extension equals `ext`.
    #[must_use]
    pub fn has_extension(&self, ext: &str) -> bool {
        self.kind == EntryKind::File
            && Path::new(&self.name)
                .extension()
                .is_some_and(|e| e == ext)
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Resource already exists where a directory or file was expected.
    AlreadyExists,
    /// Invalid path or identifier.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::AlreadyExists => StorageErrorKind::AlreadyExists,
            std::io::ErrorKind::InvalidInput | std::io::ErrorKind::InvalidData => {
                StorageErrorKind::InvalidPath
            }
            _ => StorageErrorKind::Other,
        };
        Self::new(kind).with_source(err).with_path(path)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::AlreadyExists => "Already exists",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Filesystem capability consumed by the snapshot job.
///
/// Every operation is fallible except [`exists`](Storage::exists); callers
/// treat any error as fatal. Implementations must be shareable across the
/// worker threads that process sibling entries in parallel.
pub trait Storage: Send + Sync {
    /// List the entries directly inside `dir`.
    ///
    /// Order is backend-defined but must be stable for unchanged input.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if `dir` does not exist or cannot be read.
    fn list_dir(&self, dir: &Path) -> Result<Vec<Entry>, StorageError>;

    /// Read a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read.
    fn read_to_string(&self, path: &Path) -> Result<String, StorageError>;

    /// Write `contents` to `path`, replacing any existing file.
    ///
    /// The parent directory must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file can't be written.
    fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError>;

    /// Copy the file at `from` to `to`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the source can't be read or the target
    /// can't be written.
    fn copy(&self, from: &Path, to: &Path) -> Result<(), StorageError>;

    /// Create `dir` and all missing ancestors. Existing directories are fine.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a directory can't be created.
    fn create_dir_all(&self, dir: &Path) -> Result<(), StorageError>;

    /// Check whether a file or directory exists at `path`.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &Path) -> bool;
}
