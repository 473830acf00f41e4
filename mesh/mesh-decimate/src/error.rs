//! Error types for decimation.

use thiserror::Error;

/// Errors that can occur during decimation.
#[derive(Debug, Error)]
pub enum DecimateError {
    /// The input mesh has no faces to simplify.
    #[error("cannot decimate a mesh with no faces")]
    EmptyMesh,

    /// A target of zero faces would erase the mesh entirely.
    #[error("decimation target must be at least one face")]
    ZeroTarget,
}

/// Result alias for decimation operations.
pub type DecimateResult<T> = std::result::Result<T, DecimateError>;
