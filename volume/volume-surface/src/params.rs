//! Extraction parameters.

/// Parameters for isosurface extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractParams {
    /// Iso-level between unoccupied (0) and occupied (1) samples.
    pub iso_level: f64,

    /// Sampling stride in voxels. Stride 1 extracts at full resolution;
    /// larger strides trade fidelity for speed on large volumes.
    pub stride: usize,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            iso_level: 0.5,
            stride: 1,
        }
    }
}

impl ExtractParams {
    /// Full-resolution extraction, for clean pre-segmented masks.
    #[must_use]
    pub fn full_resolution() -> Self {
        Self::default()
    }

    /// Coarse extraction for large raw-threshold volumes.
    #[must_use]
    pub fn coarse() -> Self {
        Self {
            stride: 2,
            ..Self::default()
        }
    }

    /// Set the extraction stride.
    #[must_use]
    pub const fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_full_resolution_at_half_level() {
        let params = ExtractParams::default();
        assert_eq!(params.stride, 1);
        assert!((params.iso_level - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn coarse_doubles_stride() {
        assert_eq!(ExtractParams::coarse().stride, 2);
    }
}
