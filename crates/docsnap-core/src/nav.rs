//! Navigation data model.
//!
//! A navigation tree is an ordered list of [`NavNode`]s. Leaves stand for
//! content files, branches for subdirectories. The manifest written for each
//! component type is the tree serialized as pretty JSON:
//!
//! ```json
//! [
//!   { "title": "Builders Overview", "path": "", "filePath": "index.mdx" },
//!   { "title": "amazon", "routes": [
//!     { "title": "EBS Builder", "path": "amazon/ebs", "filePath": "amazon/ebs.mdx" }
//!   ] }
//! ]
//! ```

use std::collections::HashSet;

use serde::Serialize;

/// Navigation entry for one content file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLeaf {
    /// Title from the file's front matter. Omitted from JSON when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Route path, relative to the component root.
    pub path: String,
    /// Source file path, relative to the component root.
    pub file_path: String,
}

/// Navigation entry for one subdirectory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavBranch {
    /// Raw directory name.
    pub title: String,
    /// Entries inside the directory, in listing order.
    pub routes: Vec<NavNode>,
}

/// Leaf or branch of a navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavNode {
    Leaf(NavLeaf),
    Branch(NavBranch),
}

/// Navigation tree for one component type.
#[derive(Clone, Debug, PartialEq)]
pub enum NavTree {
    /// Tree derived from the directory layout.
    Derived(Vec<NavNode>),
    /// Tree read from an authored manifest, kept exactly as parsed.
    Override(serde_json::Value),
}

impl NavTree {
    /// Check if the tree contributes no documentation.
    ///
    /// An override only counts when it is a non-empty JSON array.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Derived(nodes) => nodes.is_empty(),
            Self::Override(value) => value.as_array().is_none_or(Vec::is_empty),
        }
    }

    /// True when the tree came from an authored manifest.
    #[must_use]
    pub fn is_override(&self) -> bool {
        matches!(self, Self::Override(_))
    }

    /// Number of pages (leaves) in the tree.
    ///
    /// For overrides, every object carrying a `path` key is a page.
    #[must_use]
    pub fn page_count(&self) -> usize {
        match self {
            Self::Derived(nodes) => count_leaves(nodes),
            Self::Override(value) => count_json_pages(value),
        }
    }

    /// Leaf routes that occur more than once, in first-repeat order.
    ///
    /// Overrides are authored by hand and are not inspected.
    #[must_use]
    pub fn duplicate_routes(&self) -> Vec<String> {
        let Self::Derived(nodes) = self else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for_each_leaf(nodes, &mut |leaf| {
            if !seen.insert(leaf.path.as_str()) && !duplicates.contains(&leaf.path) {
                duplicates.push(leaf.path.clone());
            }
        });
        duplicates
    }

    /// Serialize as a pretty-printed manifest (two-space indent, no trailing
    /// newline).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_manifest_json(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Derived(nodes) => serde_json::to_string_pretty(nodes),
            Self::Override(value) => serde_json::to_string_pretty(value),
        }
    }
}

fn for_each_leaf<'a>(nodes: &'a [NavNode], f: &mut impl FnMut(&'a NavLeaf)) {
    for node in nodes {
        match node {
            NavNode::Leaf(leaf) => f(leaf),
            NavNode::Branch(branch) => for_each_leaf(&branch.routes, f),
        }
    }
}

fn count_leaves(nodes: &[NavNode]) -> usize {
    let mut count = 0;
    for_each_leaf(nodes, &mut |_| count += 1);
    count
}

fn count_json_pages(value: &serde_json::Value) -> usize {
    match value {
        serde_json::Value::Array(items) => items.iter().map(count_json_pages).sum(),
        serde_json::Value::Object(map) => {
            let own = usize::from(map.contains_key("path"));
            own + map.get("routes").map_or(0, count_json_pages)
        }
        _ => 0,
    }
}
