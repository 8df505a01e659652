//! Authored navigation manifests.
//!
//! A component directory may ship its own `nav-data.json`. When present it
//! replaces tree derivation for that component entirely.

use std::path::Path;

use docsnap_storage::Storage;

use crate::MANIFEST_FILENAME;
use crate::error::SnapshotError;

/// Read the authored manifest directly inside `component_dir`, if any.
///
/// The JSON is returned exactly as parsed (object key order included) so it
/// can be written back out unchanged.
///
/// # Errors
///
/// Returns [`SnapshotError::Storage`] if the file exists but can't be read,
/// and [`SnapshotError::Manifest`] if it is not valid JSON.
pub fn read_override(
    storage: &dyn Storage,
    component_dir: &Path,
) -> Result<Option<serde_json::Value>, SnapshotError> {
    let path = component_dir.join(MANIFEST_FILENAME);
    if !storage.exists(&path) {
        return Ok(None);
    }

    let content = storage.read_to_string(&path)?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| SnapshotError::Manifest {
            path: path.clone(),
            source,
        })?;

    if !value.is_array() {
        tracing::warn!(path = %path.display(), "Navigation override is not a JSON array");
    }

    Ok(Some(value))
}
