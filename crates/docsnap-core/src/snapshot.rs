//! Snapshot orchestration.
//!
//! Runs the replicate-then-navigate pipeline once per configured component
//! type and writes a `nav-data.json` manifest next to the copied content.
//!
//! # Layout
//!
//! ```text
//! <source_dir>/<component>/**/*.mdx      -> <artifact_dir>/<component>/**/*.mdx
//! <source_dir>/<component>/nav-data.json -> <artifact_dir>/<component>/nav-data.json
//! ```
//!
//! A component whose source subfolder is absent is skipped. The run fails only
//! when no component yields any navigation at all.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use docsnap_config::ComponentType;
use docsnap_storage::Storage;
use rayon::prelude::*;

use crate::MANIFEST_FILENAME;
use crate::authored::read_override;
use crate::builder::NavBuilder;
use crate::error::SnapshotError;
use crate::nav::NavTree;
use crate::replicator::Replicator;

/// Calculate elapsed time in milliseconds.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Configuration for [`Snapshot`].
#[derive(Clone, Debug)]
pub struct SnapshotConfig {
    /// Root holding one subfolder per component type.
    pub source_dir: PathBuf,
    /// Root the snapshot is written to.
    pub artifact_dir: PathBuf,
    /// Component types to process, in report order.
    pub components: Vec<ComponentType>,
    /// Fail on content files without `nav_title`.
    pub require_titles: bool,
    /// Fail on duplicate routes within one derived tree.
    pub unique_routes: bool,
}

impl SnapshotConfig {
    /// Config for every recognized component with permissive validation.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            artifact_dir: artifact_dir.into(),
            components: ComponentType::ALL.to_vec(),
            require_titles: false,
            unique_routes: false,
        }
    }
}

/// Result of snapshotting one component type.
#[derive(Debug)]
pub struct ComponentReport {
    /// Component type.
    pub component: ComponentType,
    /// Navigation tree written to the manifest.
    pub tree: NavTree,
    /// Number of content files copied.
    pub copied_files: usize,
    /// Location of the written manifest.
    pub manifest_path: PathBuf,
}

/// Result of a full snapshot run.
#[derive(Debug)]
pub struct SnapshotReport {
    /// One entry per component whose source subfolder exists, in config order.
    pub components: Vec<ComponentReport>,
}

impl SnapshotReport {
    /// Look up the report for one component type.
    #[must_use]
    pub fn get(&self, component: ComponentType) -> Option<&ComponentReport> {
        self.components.iter().find(|r| r.component == component)
    }
}

/// Snapshot job over a [`Storage`] backend.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use docsnap_core::{Snapshot, SnapshotConfig};
/// use docsnap_storage::FsStorage;
///
/// let snapshot = Snapshot::new(
///     Arc::new(FsStorage::new()),
///     SnapshotConfig::new("docs", ".docs-artifacts"),
/// );
/// let report = snapshot.run()?;
/// ```
pub struct Snapshot {
    storage: Arc<dyn Storage>,
    config: SnapshotConfig,
}

impl Snapshot {
    /// Create a new snapshot job.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: SnapshotConfig) -> Self {
        Self { storage, config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Snapshot every configured component type.
    ///
    /// Components are processed in parallel; the report keeps config order.
    ///
    /// # Errors
    ///
    /// Returns the first [`SnapshotError`] raised by any component, or
    /// [`SnapshotError::NoDocs`] when every component is absent or empty.
    pub fn run(&self) -> Result<SnapshotReport, SnapshotError> {
        let start = Instant::now();

        let results: Vec<Option<ComponentReport>> = self
            .config
            .components
            .par_iter()
            .map(|&component| self.snapshot_component(component))
            .collect::<Result<_, _>>()?;

        let components: Vec<ComponentReport> = results.into_iter().flatten().collect();

        if components.iter().all(|r| r.tree.is_empty()) {
            return Err(SnapshotError::NoDocs {
                source_dir: self.config.source_dir.clone(),
                recognized: ComponentType::names(),
            });
        }

        tracing::info!(
            component_count = components.len(),
            elapsed_ms = elapsed_ms(start),
            "Snapshot completed"
        );

        Ok(SnapshotReport { components })
    }

    /// Snapshot one component type.
    ///
    /// Returns `Ok(None)` when the component's source subfolder doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] on any filesystem, front matter, manifest or
    /// validation failure.
    pub fn snapshot_component(
        &self,
        component: ComponentType,
    ) -> Result<Option<ComponentReport>, SnapshotError> {
        let start = Instant::now();
        let source_dir = self.config.source_dir.join(component.as_str());
        let dest_dir = self.config.artifact_dir.join(component.as_str());
        let storage = self.storage.as_ref();

        if !storage.exists(&source_dir) {
            tracing::debug!(%component, source = %source_dir.display(), "No source folder, skipping");
            return Ok(None);
        }

        let copied_files = Replicator::new(storage).replicate(&source_dir, &dest_dir)?;

        let tree = match read_override(storage, &source_dir)? {
            Some(value) => NavTree::Override(value),
            None => NavTree::Derived(
                NavBuilder::new(storage)
                    .require_titles(self.config.require_titles)
                    .build(&source_dir)?,
            ),
        };
        self.check_routes(component, &tree)?;

        let manifest_path = dest_dir.join(MANIFEST_FILENAME);
        let manifest = tree
            .to_manifest_json()
            .map_err(|source| SnapshotError::Manifest {
                path: manifest_path.clone(),
                source,
            })?;
        storage.create_dir_all(&dest_dir)?;
        storage.write(&manifest_path, &manifest)?;

        tracing::info!(
            %component,
            copied_files,
            page_count = tree.page_count(),
            source = if tree.is_override() { "override" } else { "derived" },
            elapsed_ms = elapsed_ms(start),
            "Component snapshot written"
        );

        Ok(Some(ComponentReport {
            component,
            tree,
            copied_files,
            manifest_path,
        }))
    }

    /// Report duplicate routes, failing on the first one when unique routes
    /// are required.
    fn check_routes(&self, component: ComponentType, tree: &NavTree) -> Result<(), SnapshotError> {
        let duplicates = tree.duplicate_routes();
        if let Some(route) = duplicates.first()
            && self.config.unique_routes
        {
            return Err(SnapshotError::DuplicateRoute {
                component,
                route: route.clone(),
            });
        }
        for route in &duplicates {
            tracing::warn!(%component, route = %route, "Duplicate navigation route");
        }
        Ok(())
    }
}
