//! Filesystem abstraction for the docsnap documentation snapshot tool.
//!
//! This crate provides a [`Storage`] trait covering the handful of filesystem
//! operations the snapshot job needs: listing a directory, reading, writing and
//! copying files, and creating directories. This enables:
//!
//! - **Unit testing** of tree derivation against an in-memory tree
//! - **Clean separation** between navigation logic and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `list_dir()`, `read_to_string()`, `write()`,
//!   `copy()`, `create_dir_all()` and `exists()` methods
//! - [`FsStorage`] implementation for the local filesystem
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use docsnap_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new();
//! let entries = storage.list_dir(Path::new("docs/builders"))?;
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockStorage;
pub use storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};
