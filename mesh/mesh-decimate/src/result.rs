//! Result types for decimation.

// Face counts stay far below 2^53, so the f64 conversions are exact enough.
#![allow(clippy::cast_precision_loss)]

use mesh_types::IndexedMesh;

/// Outcome of a decimation pass.
#[derive(Debug, Clone)]
pub struct DecimateSummary {
    /// The simplified mesh.
    pub mesh: IndexedMesh,

    /// Face count of the input mesh.
    pub input_faces: usize,

    /// Face count after decimation.
    pub output_faces: usize,

    /// Number of edge collapses applied.
    pub collapses_applied: usize,

    /// Candidates rejected because collapsing them would have pinched the
    /// surface or exceeded the error limit.
    pub collapses_rejected: usize,
}

impl DecimateSummary {
    /// Fraction of faces removed, in `[0, 1]`.
    #[must_use]
    pub fn reduction(&self) -> f64 {
        if self.input_faces == 0 {
            0.0
        } else {
            1.0 - self.output_faces as f64 / self.input_faces as f64
        }
    }

    /// True when the pass reached the requested face count.
    #[must_use]
    pub fn reached_target(&self, target_faces: usize) -> bool {
        self.output_faces <= target_faces
    }

    /// True when at least one collapse was applied.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.collapses_applied > 0
    }
}

impl std::fmt::Display for DecimateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "decimate: {} -> {} faces ({:.1}% removed, {} collapses, {} rejected)",
            self.input_faces,
            self.output_faces,
            self.reduction() * 100.0,
            self.collapses_applied,
            self.collapses_rejected
        )
    }
}
