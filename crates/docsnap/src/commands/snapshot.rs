//! `docsnap snapshot` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use docsnap_config::{CliSettings, Config};
use docsnap_core::{ComponentReport, NavTree, Snapshot, SnapshotConfig};
use docsnap_storage::{FsStorage, Storage};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the snapshot command.
#[derive(Args)]
pub(crate) struct SnapshotArgs {
    /// Docs source directory with one subfolder per component type (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Directory the snapshot is written to (overrides config).
    #[arg(short, long)]
    artifact_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover docsnap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail when a content file has no nav_title.
    #[arg(long)]
    require_titles: bool,

    /// Fail when two pages of one component resolve to the same route.
    #[arg(long)]
    unique_routes: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl SnapshotArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            artifact_dir: self.artifact_dir,
            require_titles: self.require_titles.then_some(true),
            unique_routes: self.unique_routes.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            output.path("Config", path);
        }
        output.path("Source", &config.docs_resolved.source_dir);
        output.path("Output", &config.docs_resolved.artifact_dir);

        let storage: Arc<dyn Storage> = Arc::new(FsStorage::new());
        let snapshot_config = snapshot_config(&config);
        let artifact_dir = snapshot_config.artifact_dir.clone();

        let report = Snapshot::new(storage, snapshot_config).run()?;

        output.heading("Components:");
        for component in &report.components {
            output.component(&summary_line(component), component.tree.is_empty());
        }

        output.success(&format!("Snapshot written to {}", artifact_dir.display()));
        Ok(())
    }
}

/// Map loaded configuration onto the snapshot job configuration.
fn snapshot_config(config: &Config) -> SnapshotConfig {
    let docs = &config.docs_resolved;
    SnapshotConfig {
        source_dir: docs.source_dir.clone(),
        artifact_dir: docs.artifact_dir.clone(),
        components: docs.components.clone(),
        require_titles: config.validation.require_titles,
        unique_routes: config.validation.unique_routes,
    }
}

/// One-line summary of a component's snapshot.
fn summary_line(report: &ComponentReport) -> String {
    let source = match report.tree {
        NavTree::Derived(_) => "derived",
        NavTree::Override(_) => "override",
    };
    let pages = report.tree.page_count();
    let noun = if pages == 1 { "page" } else { "pages" };
    format!(
        "{}: {pages} {noun} ({source}), {} files copied",
        report.component, report.copied_files
    )
}

#[cfg(test)]
mod tests {
    use docsnap_config::ComponentType;
    use docsnap_core::{NavLeaf, NavNode};
    use pretty_assertions::assert_eq;

    use super::*;

    fn leaf(path: &str) -> NavNode {
        NavNode::Leaf(NavLeaf {
            title: Some(path.to_owned()),
            path: path.to_owned(),
            file_path: format!("{path}.mdx"),
        })
    }

    #[test]
    fn test_summary_line_derived() {
        let report = ComponentReport {
            component: ComponentType::Builders,
            tree: NavTree::Derived(vec![leaf("docker"), leaf("qemu")]),
            copied_files: 2,
            manifest_path: PathBuf::from("out/builders/nav-data.json"),
        };

        assert_eq!(
            summary_line(&report),
            "builders: 2 pages (derived), 2 files copied"
        );
    }

    #[test]
    fn test_summary_line_override_single_page() {
        let report = ComponentReport {
            component: ComponentType::PostProcessors,
            tree: NavTree::Override(serde_json::json!([
                {"title": "Push", "path": "push", "filePath": "push.mdx"}
            ])),
            copied_files: 4,
            manifest_path: PathBuf::from("out/post-processors/nav-data.json"),
        };

        assert_eq!(
            summary_line(&report),
            "post-processors: 1 page (override), 4 files copied"
        );
    }

    #[test]
    fn test_snapshot_config_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("docsnap.toml");
        std::fs::write(
            &config_path,
            "[docs]\nsource_dir = \"content\"\ncomponents = [\"builders\"]\n\n\
             [validation]\nunique_routes = true\n",
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();
        let snapshot_config = snapshot_config(&config);

        assert_eq!(snapshot_config.source_dir, temp_dir.path().join("content"));
        assert_eq!(
            snapshot_config.artifact_dir,
            temp_dir.path().join(".docs-artifacts")
        );
        assert_eq!(snapshot_config.components, vec![ComponentType::Builders]);
        assert!(!snapshot_config.require_titles);
        assert!(snapshot_config.unique_routes);
    }
}
