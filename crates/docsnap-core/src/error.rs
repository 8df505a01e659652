//! Snapshot error types.

use std::path::PathBuf;

use docsnap_config::ComponentType;
use docsnap_storage::StorageError;

use crate::frontmatter::FrontMatterError;

/// Errors that abort a snapshot run.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Filesystem read, write, listing or directory creation failed.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// A content file has malformed front matter.
    #[error("Invalid front matter in {}: {source}", .path.display())]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },

    /// An override manifest is not valid JSON, or a manifest failed to serialize.
    #[error("Invalid navigation manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A content file has no `nav_title` while titles are required.
    #[error("Missing nav_title in front matter of {}", .path.display())]
    MissingTitle { path: PathBuf },

    /// Two pages of one component resolve to the same route while unique
    /// routes are required.
    #[error("Duplicate route \"{route}\" in {component} navigation")]
    DuplicateRoute {
        component: ComponentType,
        route: String,
    },

    /// None of the configured component types produced any documentation.
    #[error(
        "No docs found. Please add a component subfolder in {} with .mdx documentation files. \
         Recognized component subfolders are: {}.",
        .source_dir.display(),
        quoted_list(.recognized)
    )]
    NoDocs {
        source_dir: PathBuf,
        recognized: Vec<&'static str>,
    },
}

/// Render names as a compact JSON-style array: `["a","b"]`.
fn quoted_list(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|name| format!("\"{name}\"")).collect();
    format!("[{}]", quoted.join(","))
}
