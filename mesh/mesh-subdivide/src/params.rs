//! Parameters for subdivision.

/// Parameters for midpoint subdivision.
#[derive(Debug, Clone, Copy)]
pub struct SubdivideParams {
    /// Number of subdivision levels. Each level quadruples the face count.
    pub levels: u32,

    /// Refuse to produce more faces than this.
    pub max_faces: usize,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            levels: 1,
            max_faces: 10_000_000,
        }
    }
}

impl SubdivideParams {
    /// Params for a given number of levels.
    #[must_use]
    pub fn with_levels(levels: u32) -> Self {
        Self {
            levels,
            ..Default::default()
        }
    }

    /// Set the face ceiling.
    #[must_use]
    pub const fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    /// Face count after applying all levels to a mesh of `input_faces`.
    #[must_use]
    pub const fn projected_faces(&self, input_faces: usize) -> usize {
        let mut faces = input_faces;
        let mut level = 0;
        while level < self.levels {
            faces *= 4;
            level += 1;
        }
        faces
    }
}
