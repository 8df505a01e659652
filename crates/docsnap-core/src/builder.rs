//! Navigation tree derivation from a component's directory layout.
//!
//! Each directory level is listed once. Hidden entries and files without the
//! content extension are dropped; the remaining entries are processed in
//! parallel and reassembled in listing order. Content files become leaves,
//! directories become branches whose children are derived recursively.
//!
//! Route rules, for a file at route prefix `P`:
//! - `index.mdx` -> `P`
//! - `ebs.mdx`   -> `P/ebs` (or `ebs` when `P` is empty)
//! - directory `d` -> prefix `P/d` for its children, even when `d` is `index`

use std::path::Path;

use docsnap_storage::{Entry, EntryKind, Storage};
use rayon::prelude::*;

use crate::error::SnapshotError;
use crate::frontmatter::parse_front_matter;
use crate::nav::{NavBranch, NavLeaf, NavNode};
use crate::{CONTENT_EXTENSION, INDEX_MARKER};

/// Derives navigation trees from a [`Storage`] backend.
pub struct NavBuilder<'a> {
    storage: &'a dyn Storage,
    require_titles: bool,
}

impl<'a> NavBuilder<'a> {
    /// Create a builder that tolerates missing titles.
    #[must_use]
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self {
            storage,
            require_titles: false,
        }
    }

    /// Fail on content files without a `nav_title` instead of emitting an
    /// untitled leaf.
    #[must_use]
    pub fn require_titles(mut self, require: bool) -> Self {
        self.require_titles = require;
        self
    }

    /// Derive the navigation tree rooted at `component_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if any directory can't be listed, any content
    /// file can't be read or has malformed front matter, or a title is missing
    /// while titles are required.
    pub fn build(&self, component_dir: &Path) -> Result<Vec<NavNode>, SnapshotError> {
        self.build_level(component_dir, "")
    }

    fn build_level(&self, component_dir: &Path, prefix: &str) -> Result<Vec<NavNode>, SnapshotError> {
        let dir = if prefix.is_empty() {
            component_dir.to_path_buf()
        } else {
            component_dir.join(prefix)
        };

        let entries: Vec<Entry> = self
            .storage
            .list_dir(&dir)?
            .into_iter()
            .filter(|e| !e.is_hidden())
            .filter(|e| e.kind == EntryKind::Dir || e.has_extension(CONTENT_EXTENSION))
            .collect();

        entries
            .par_iter()
            .map(|entry| match entry.kind {
                EntryKind::Dir => self.build_branch(component_dir, prefix, &entry.name),
                _ => self.build_leaf(component_dir, prefix, &entry.name),
            })
            .collect()
    }

    fn build_branch(
        &self,
        component_dir: &Path,
        prefix: &str,
        name: &str,
    ) -> Result<NavNode, SnapshotError> {
        let routes = self.build_level(component_dir, &join_route(prefix, name))?;
        Ok(NavNode::Branch(NavBranch {
            title: name.to_owned(),
            routes,
        }))
    }

    fn build_leaf(
        &self,
        component_dir: &Path,
        prefix: &str,
        name: &str,
    ) -> Result<NavNode, SnapshotError> {
        let file_path = join_route(prefix, name);
        let source = component_dir.join(&file_path);

        let content = self.storage.read_to_string(&source)?;
        let front_matter =
            parse_front_matter(&content).map_err(|source_err| SnapshotError::FrontMatter {
                path: source.clone(),
                source: source_err,
            })?;

        if front_matter.nav_title.is_none() {
            if self.require_titles {
                return Err(SnapshotError::MissingTitle { path: source });
            }
            tracing::warn!(path = %source.display(), "Content file has no nav_title");
        }

        let path = leaf_route(prefix, name);
        tracing::debug!(route = %path, file = %file_path, "Derived navigation leaf");

        Ok(NavNode::Leaf(NavLeaf {
            title: front_matter.nav_title,
            path,
            file_path,
        }))
    }
}

/// Compute the route for a content file named `name` at route `prefix`.
pub(crate) fn leaf_route(prefix: &str, name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .map_or_else(|| name.to_owned(), |s| s.to_string_lossy().into_owned());

    if stem == INDEX_MARKER {
        prefix.to_owned()
    } else {
        join_route(prefix, &stem)
    }
}

/// Join a route prefix and a segment with `/`.
pub(crate) fn join_route(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}/{segment}")
    }
}
