//! Selection modes and cleanup parameters for mask construction.

/// Named intensity presets for common tissue boundaries.
///
/// Values are in scan intensity units (CT Hounsfield-like).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdPreset {
    /// Soft-tissue boundary.
    Soft,
    /// Bone boundary.
    Bone,
}

impl ThresholdPreset {
    /// The intensity value this preset thresholds at.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Soft => 50.0,
            Self::Bone => 300.0,
        }
    }
}

/// How the threshold value is chosen in threshold mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdPolicy {
    /// Derive the threshold from the volume's own intensity distribution:
    /// a low percentile of all samples above the background floor.
    Auto,
    /// Use a fixed numeric threshold.
    Fixed(f64),
    /// Use a named tissue preset.
    Preset(ThresholdPreset),
}

/// Voxel selection mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// Voxel is occupied iff its value equals this label exactly.
    /// For pre-segmented volumes; no morphological cleanup is applied.
    Label(i64),
    /// Voxel is occupied iff its value exceeds the resolved threshold.
    Threshold(ThresholdPolicy),
}

impl Selection {
    /// Threshold selection with an automatically derived threshold.
    #[must_use]
    pub const fn threshold_auto() -> Self {
        Self::Threshold(ThresholdPolicy::Auto)
    }

    /// Threshold selection with a fixed numeric threshold.
    #[must_use]
    pub const fn threshold_fixed(value: f64) -> Self {
        Self::Threshold(ThresholdPolicy::Fixed(value))
    }

    /// Threshold selection from a tissue preset.
    #[must_use]
    pub const fn threshold_preset(preset: ThresholdPreset) -> Self {
        Self::Threshold(ThresholdPolicy::Preset(preset))
    }
}

/// Parameters controlling auto-thresholding and morphological cleanup.
///
/// The defaults are calibrated for CT-like intensity ranges; volumes in
/// other units should override [`background_floor`](Self::background_floor)
/// and [`auto_percentile`](Self::auto_percentile).
#[derive(Debug, Clone, PartialEq)]
pub struct MaskParams {
    /// Samples at or below this value are treated as background air/void
    /// and excluded from the auto-threshold percentile.
    pub background_floor: f64,

    /// Percentile (0.0..=1.0) of the foreground distribution used as the
    /// auto threshold.
    pub auto_percentile: f64,

    /// Connected components smaller than this voxel count are removed
    /// during cleanup.
    pub min_object_size: usize,

    /// Radius in voxels of the spherical structuring element used for
    /// morphological closing.
    pub closing_radius: usize,

    /// Minimum number of occupied voxels for a mask to be considered
    /// non-empty.
    pub min_occupied: usize,

    /// Whether to run the morphological cleanup sequence after
    /// thresholding. Ignored in label mode, which never cleans up.
    pub cleanup: bool,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            background_floor: -500.0,
            auto_percentile: 0.30,
            min_object_size: 1000,
            closing_radius: 2,
            min_occupied: 100,
            cleanup: true,
        }
    }
}

impl MaskParams {
    /// Set the background floor for auto-thresholding.
    #[must_use]
    pub const fn with_background_floor(mut self, floor: f64) -> Self {
        self.background_floor = floor;
        self
    }

    /// Set the auto-threshold percentile (clamped to 0.0..=1.0).
    #[must_use]
    pub fn with_auto_percentile(mut self, percentile: f64) -> Self {
        self.auto_percentile = percentile.clamp(0.0, 1.0);
        self
    }

    /// Set the minimum connected-component size kept during cleanup.
    #[must_use]
    pub const fn with_min_object_size(mut self, size: usize) -> Self {
        self.min_object_size = size;
        self
    }

    /// Set the minimum occupied-voxel count for a valid mask.
    #[must_use]
    pub const fn with_min_occupied(mut self, count: usize) -> Self {
        self.min_occupied = count;
        self
    }

    /// Disable morphological cleanup.
    #[must_use]
    pub const fn without_cleanup(mut self) -> Self {
        self.cleanup = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_ct_calibrated() {
        let params = MaskParams::default();
        assert!((params.background_floor + 500.0).abs() < f64::EPSILON);
        assert!((params.auto_percentile - 0.30).abs() < f64::EPSILON);
        assert_eq!(params.min_object_size, 1000);
        assert_eq!(params.min_occupied, 100);
        assert!(params.cleanup);
    }

    #[test]
    fn preset_values() {
        assert!((ThresholdPreset::Soft.value() - 50.0).abs() < f64::EPSILON);
        assert!((ThresholdPreset::Bone.value() - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percentile_is_clamped() {
        let params = MaskParams::default().with_auto_percentile(1.5);
        assert!((params.auto_percentile - 1.0).abs() < f64::EPSILON);
    }
}
