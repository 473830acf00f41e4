//! Sanitization parameters.

/// Parameters for mesh sanitization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SanitizeParams {
    /// Faces with area below this (mm²) are removed as degenerate.
    pub degenerate_area_threshold: f64,

    /// Vertices closer than this (mm) are merged.
    pub weld_epsilon: f64,

    /// Whether to orient faces consistently and recompute vertex
    /// normals at the end of the pass.
    pub fix_normals: bool,
}

impl Default for SanitizeParams {
    fn default() -> Self {
        Self {
            degenerate_area_threshold: 1e-9,
            weld_epsilon: 1e-6,
            fix_normals: true,
        }
    }
}

impl SanitizeParams {
    /// Set the degenerate-face area threshold.
    #[must_use]
    pub const fn with_degenerate_area_threshold(mut self, threshold: f64) -> Self {
        self.degenerate_area_threshold = threshold;
        self
    }

    /// Set the vertex weld tolerance.
    #[must_use]
    pub const fn with_weld_epsilon(mut self, epsilon: f64) -> Self {
        self.weld_epsilon = epsilon;
        self
    }

    /// Skip winding repair and normal recomputation.
    #[must_use]
    pub const fn without_normal_fix(mut self) -> Self {
        self.fix_normals = false;
        self
    }
}
