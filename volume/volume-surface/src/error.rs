//! Error types for surface extraction.

use thiserror::Error;

/// Result type for surface extraction.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors that can occur during isosurface extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The input mask has no occupied voxels.
    #[error("occupancy mask is empty")]
    EmptyMask,

    /// A non-empty mask produced no triangles (no valid iso-crossing at
    /// the requested stride).
    #[error("no triangles extracted from {occupied} occupied voxels (stride {stride})")]
    NoTriangles {
        /// Number of occupied voxels in the input mask.
        occupied: usize,
        /// The extraction stride that was used.
        stride: usize,
    },

    /// The stride parameter was zero.
    #[error("stride must be at least 1")]
    InvalidStride,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(ExtractError::EmptyMask.to_string(), "occupancy mask is empty");
        let err = ExtractError::NoTriangles {
            occupied: 1,
            stride: 2,
        };
        assert!(err.to_string().contains("1 occupied"));
        assert!(err.to_string().contains("stride 2"));
    }
}
