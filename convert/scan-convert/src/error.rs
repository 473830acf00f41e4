//! Error type for the conversion pipeline.

use std::path::PathBuf;

use thiserror::Error;

use mesh_obj::ObjError;
use volume_mask::MaskError;
use volume_surface::ExtractError;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that abort a conversion.
///
/// Each variant names the stage that failed; the wrapped source carries the
/// numeric context (threshold, label, voxel counts) for the log line.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source bytes could not be decoded into a volume.
    #[error("decode: {message}")]
    Decode {
        /// What went wrong, including the offending file or byte counts.
        message: String,
    },

    /// Voxel selection produced no usable structure.
    #[error("mask: {source}")]
    EmptyMask {
        /// The underlying selection failure.
        #[source]
        source: MaskError,
    },

    /// Isosurface extraction produced no triangles.
    #[error("extract: {source}")]
    Extraction {
        /// The underlying extraction failure.
        #[source]
        source: ExtractError,
    },

    /// A mesh artifact could not be written.
    #[error("write {path}: {source}")]
    Artifact {
        /// Path of the artifact that failed.
        path: PathBuf,
        /// The underlying serialization or I/O failure.
        #[source]
        source: ObjError,
    },

    /// A metadata sidecar could not be serialized.
    #[error("metadata {path}: {source}")]
    Metadata {
        /// Path of the sidecar that failed.
        path: PathBuf,
        /// The underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },

    /// A sidecar or index file could not be written.
    #[error("write {path}: {source}")]
    Io {
        /// Path of the file that failed.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl From<MaskError> for ConvertError {
    fn from(source: MaskError) -> Self {
        Self::EmptyMask { source }
    }
}

impl From<ExtractError> for ConvertError {
    fn from(source: ExtractError) -> Self {
        Self::Extraction { source }
    }
}
