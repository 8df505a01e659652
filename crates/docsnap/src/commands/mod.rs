//! CLI command implementations.

pub(crate) mod components;
pub(crate) mod snapshot;

pub(crate) use snapshot::SnapshotArgs;
