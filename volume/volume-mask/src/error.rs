//! Error types for mask construction.

use thiserror::Error;

/// Result type for mask construction.
pub type MaskResult<T> = Result<T, MaskError>;

/// Errors that can occur while building an occupancy mask.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaskError {
    /// Thresholding selected too few voxels to form a structure.
    #[error(
        "no structure at threshold {threshold}: {occupied} voxels occupied (minimum {required})"
    )]
    EmptyThreshold {
        /// The threshold that was applied.
        threshold: f64,
        /// Number of voxels that passed the threshold.
        occupied: usize,
        /// Minimum number of occupied voxels required.
        required: usize,
    },

    /// The requested label selected too few voxels.
    #[error("label {label} not present: {occupied} voxels occupied (minimum {required})")]
    EmptyLabel {
        /// The label that was searched for.
        label: i64,
        /// Number of voxels carrying the label.
        occupied: usize,
        /// Minimum number of occupied voxels required.
        required: usize,
    },

    /// The input volume has no samples at all.
    #[error("volume has no samples")]
    EmptyVolume,
}

impl MaskError {
    /// Whether this error means "no structure found" as opposed to a
    /// malformed input.
    #[must_use]
    pub const fn is_empty_mask(&self) -> bool {
        matches!(self, Self::EmptyThreshold { .. } | Self::EmptyLabel { .. })
    }
}
