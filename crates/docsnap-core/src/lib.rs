//! Navigation tree derivation and content snapshotting for docsnap.
//!
//! Given a docs tree with one subfolder per component type, this crate:
//!
//! - copies every `.mdx` file into a parallel artifact tree ([`Replicator`])
//! - derives a navigation tree from the directory layout and each file's
//!   `nav_title` front matter ([`NavBuilder`])
//! - or, when a component ships its own `nav-data.json`, uses that verbatim
//!   ([`read_override`])
//! - writes the resulting tree as the component's `nav-data.json` manifest
//!   ([`Snapshot`])
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docsnap_core::{Snapshot, SnapshotConfig};
//! use docsnap_storage::FsStorage;
//!
//! let report = Snapshot::new(
//!     Arc::new(FsStorage::new()),
//!     SnapshotConfig::new("docs", ".docs-artifacts"),
//! )
//! .run()?;
//! for component in &report.components {
//!     println!("{}: {} pages", component.component, component.tree.page_count());
//! }
//! ```

mod authored;
mod builder;
mod error;
mod frontmatter;
mod nav;
mod replicator;
mod snapshot;

pub use authored::read_override;
pub use builder::NavBuilder;
pub use error::SnapshotError;
pub use frontmatter::{FrontMatter, FrontMatterError, parse_front_matter};
pub use nav::{NavBranch, NavLeaf, NavNode, NavTree};
pub use replicator::Replicator;
pub use snapshot::{ComponentReport, Snapshot, SnapshotConfig, SnapshotReport};

/// Extension of content files, without the dot.
pub const CONTENT_EXTENSION: &str = "mdx";

/// File stem whose route collapses onto its directory's route.
pub const INDEX_MARKER: &str = "index";

/// Name of both the authored override and the generated manifest.
pub const MANIFEST_FILENAME: &str = "nav-data.json";
