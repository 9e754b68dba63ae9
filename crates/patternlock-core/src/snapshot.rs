//! Opaque gesture-state snapshot for save/restore across reconfiguration.
//!
//! The pair of the ordered selection and the per-cell status array is the
//! whole gesture-scoped state worth persisting. Encoded as JSON so hosts
//! can stash it alongside whatever generic view state they keep.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapshot errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("cell status length {found} does not match grid cell count {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

/// A saved pair of selection order and cell statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSnapshot {
    /// Cell indices in the order they were touched.
    pub selected_cells: Vec<usize>,
    /// Per-cell touched flags, row-major.
    pub cell_status: Vec<bool>,
}

impl PatternSnapshot {
    /// Encode the snapshot as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Decode a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }
}
