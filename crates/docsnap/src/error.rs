//! CLI error types.

use docsnap_config::ConfigError;
use docsnap_core::SnapshotError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Snapshot(#[from] SnapshotError),
}
