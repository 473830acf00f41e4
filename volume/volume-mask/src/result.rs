//! Result summary for mask construction.

use std::fmt;

use volume_types::OccupancyMask;

/// Result of building an occupancy mask.
#[derive(Debug, Clone)]
pub struct MaskBuildResult {
    /// The final occupancy mask.
    pub mask: OccupancyMask,
    /// The threshold that was applied, if threshold mode was used.
    pub threshold: Option<f64>,
    /// Voxels occupied immediately after selection, before cleanup.
    pub occupied_before_cleanup: usize,
    /// Voxels occupied in the final mask.
    pub occupied_after_cleanup: usize,
}

impl MaskBuildResult {
    /// How many voxels cleanup removed (or, for closing/hole filling,
    /// net change; negative means cleanup grew the mask).
    #[must_use]
    pub fn cleanup_delta(&self) -> i64 {
        #[allow(clippy::cast_possible_wrap)]
        // Wrap: voxel counts are far below i64::MAX
        {
            self.occupied_before_cleanup as i64 - self.occupied_after_cleanup as i64
        }
    }
}

impl fmt::Display for MaskBuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.threshold {
            Some(t) => write!(
                f,
                "mask: {} voxels (threshold {t}, {} before cleanup)",
                self.occupied_after_cleanup, self.occupied_before_cleanup
            ),
            None => write!(f, "mask: {} voxels (label selection)", self.occupied_after_cleanup),
        }
    }
}
