//! Error types for subdivision.

use thiserror::Error;

/// Errors that can occur during subdivision.
#[derive(Debug, Error)]
pub enum SubdivideError {
    /// The input mesh has no faces.
    #[error("cannot subdivide a mesh with no faces")]
    EmptyMesh,

    /// Subdividing would blow past the configured face ceiling.
    #[error("subdivision would grow the mesh past its limit ({input} -> {projected} faces, limit {limit})")]
    TooManyFaces {
        /// Face count of the input mesh.
        input: usize,
        /// Face count the requested levels would produce.
        projected: usize,
        /// Configured ceiling.
        limit: usize,
    },
}

/// Result alias for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;
