//! The serialized metadata record.
//!
//! Field names are a stable external contract consumed by viewers and the
//! model index; renaming any of them is a breaking change.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounds in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsMm {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
}

/// Measurements and provenance of a finished mesh.
///
/// `volume_mm3` and `volume_ml` are `null` for non-watertight meshes, never
/// an approximation. The provenance fields at the end are omitted from the
/// serialized form when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshMetadata {
    /// Voxel spacing of the source volume, millimetres per axis.
    pub spacing_mm: [f64; 3],

    /// Axis-aligned bounding box.
    pub bounds_mm: BoundsMm,

    /// Bounding box span per axis.
    pub size_mm: [f64; 3],

    /// Mean vertex position.
    pub center_mm: [f64; 3],

    /// Enclosed volume, only for watertight meshes.
    pub volume_mm3: Option<f64>,

    /// Enclosed volume in millilitres (`volume_mm3 / 1000`).
    pub volume_ml: Option<f64>,

    /// Vertex count.
    pub num_vertices: usize,

    /// Face count.
    pub num_faces: usize,

    /// True when every edge is shared by exactly two faces.
    pub is_watertight: bool,

    /// Name of the source volume file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// Human-readable organ name for label extractions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organ_type: Option<String>,

    /// Threshold that produced the mask, for threshold extractions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Shape of the source volume before any striding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_shape: Option<[usize; 3]>,
}

impl MeshMetadata {
    /// Attach the source file name.
    #[must_use]
    pub fn with_source_file(mut self, name: impl Into<String>) -> Self {
        self.source_file = Some(name.into());
        self
    }

    /// Attach the organ name.
    #[must_use]
    pub fn with_organ_type(mut self, organ: impl Into<String>) -> Self {
        self.organ_type = Some(organ.into());
        self
    }

    /// Attach the extraction threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Attach the source volume shape.
    #[must_use]
    pub const fn with_original_shape(mut self, shape: [usize; 3]) -> Self {
        self.original_shape = Some(shape);
        self
    }
}

impl std::fmt::Display for MeshMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vertices, {} faces, {:.1}x{:.1}x{:.1} mm",
            self.num_vertices, self.num_faces, self.size_mm[0], self.size_mm[1], self.size_mm[2]
        )?;
        match self.volume_ml {
            Some(ml) => write!(f, ", {ml:.1} ml"),
            None => write!(f, ", open surface"),
        }
    }
}
