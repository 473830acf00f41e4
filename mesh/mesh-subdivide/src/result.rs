//! Result types for subdivision.

use mesh_types::IndexedMesh;

/// Outcome of a subdivision pass.
#[derive(Debug, Clone)]
pub struct SubdivideSummary {
    /// The subdivided mesh.
    pub mesh: IndexedMesh,

    /// Face count of the input mesh.
    pub input_faces: usize,

    /// Face count after subdivision.
    pub output_faces: usize,

    /// Number of midpoint vertices created.
    pub midpoints_created: usize,

    /// Levels applied.
    pub levels: u32,
}

impl std::fmt::Display for SubdivideSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "subdivide: {} -> {} faces over {} level(s), {} midpoints",
            self.input_faces, self.output_faces, self.levels, self.midpoints_created
        )
    }
}
