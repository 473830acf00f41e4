//! Mask construction from a scalar volume.

use tracing::{debug, info};
use volume_types::{OccupancyMask, ScalarVolume};

use crate::error::{MaskError, MaskResult};
use crate::morphology::{
    binary_closing, fill_holes, keep_largest_component, remove_small_objects,
};
use crate::params::{MaskParams, Selection, ThresholdPolicy};
use crate::result::MaskBuildResult;

/// Derive the automatic threshold for a volume: the configured percentile
/// of all samples strictly above the background floor.
///
/// Falls back to the background floor itself when no sample exceeds it,
/// which yields an empty selection and a clean `EmptyThreshold` failure
/// downstream.
#[must_use]
pub fn auto_threshold(volume: &ScalarVolume, params: &MaskParams) -> f64 {
    let mut foreground: Vec<f64> = volume
        .values()
        .iter()
        .copied()
        .filter(|&v| v > params.background_floor)
        .collect();

    if foreground.is_empty() {
        return params.background_floor;
    }

    foreground.sort_by(f64::total_cmp);

    // Linear-interpolated percentile over the sorted samples.
    #[allow(clippy::cast_precision_loss)]
    let rank = params.auto_percentile * (foreground.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(foreground.len() - 1);
    #[allow(clippy::cast_precision_loss)]
    let frac = rank - lo as f64;

    foreground[lo] + (foreground[hi] - foreground[lo]) * frac
}

/// Build an occupancy mask from a scalar volume.
///
/// In threshold mode the resolved threshold is applied, then the
/// morphological cleanup sequence runs in fixed order: small-object
/// removal, spherical closing, hole filling, largest-component selection.
/// Label mode selects exact matches and applies no cleanup.
///
/// # Errors
///
/// - [`MaskError::EmptyVolume`] if the volume has no samples
/// - [`MaskError::EmptyThreshold`] / [`MaskError::EmptyLabel`] if fewer
///   than [`MaskParams::min_occupied`] voxels are selected
pub fn build_mask(
    volume: &ScalarVolume,
    selection: &Selection,
    params: &MaskParams,
) -> MaskResult<MaskBuildResult> {
    if volume.is_empty() {
        return Err(MaskError::EmptyVolume);
    }

    let (mask, threshold) = match *selection {
        Selection::Label(label) => {
            #[allow(clippy::cast_precision_loss)]
            let label_value = label as f64;
            let mask = OccupancyMask::from_fn(volume.shape(), |x, y, z| {
                (volume.get(x, y, z) - label_value).abs() < f64::EPSILON
            });
            (mask, None)
        }
        Selection::Threshold(policy) => {
            let threshold = match policy {
                ThresholdPolicy::Auto => auto_threshold(volume, params),
                ThresholdPolicy::Fixed(value) => value,
                ThresholdPolicy::Preset(preset) => preset.value(),
            };
            let mask =
                OccupancyMask::from_fn(volume.shape(), |x, y, z| volume.get(x, y, z) > threshold);
            (mask, Some(threshold))
        }
    };

    let occupied = mask.occupied_count();
    debug!(occupied, ?threshold, "selection complete");

    if occupied < params.min_occupied {
        return Err(match (*selection, threshold) {
            (Selection::Label(label), _) => MaskError::EmptyLabel {
                label,
                occupied,
                required: params.min_occupied,
            },
            (Selection::Threshold(_), t) => MaskError::EmptyThreshold {
                threshold: t.unwrap_or(params.background_floor),
                occupied,
                required: params.min_occupied,
            },
        });
    }

    let cleaned = if matches!(selection, Selection::Threshold(_)) && params.cleanup {
        let mut m = remove_small_objects(&mask, params.min_object_size);
        m = binary_closing(&m, params.closing_radius);
        m = fill_holes(&m);
        m = keep_largest_component(&m);

        // Cleanup can erase everything when the selection was all noise.
        if m.occupied_count() < params.min_occupied {
            return Err(MaskError::EmptyThreshold {
                threshold: threshold.unwrap_or(params.background_floor),
                occupied: m.occupied_count(),
                required: params.min_occupied,
            });
        }
        m
    } else {
        mask
    };

    let result = MaskBuildResult {
        occupied_before_cleanup: occupied,
        occupied_after_cleanup: cleaned.occupied_count(),
        mask: cleaned,
        threshold,
    };
    info!(%result, "mask built");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use volume_types::Spacing;

    fn bright_block_volume() -> ScalarVolume {
        // A 12x12x12 volume, -1000 background with a bright 6x6x6 block.
        ScalarVolume::from_fn((12, 12, 12), Spacing::uniform(1.0), |x, y, z| {
            if (3..9).contains(&x) && (3..9).contains(&y) && (3..9).contains(&z) {
                200.0
            } else {
                -1000.0
            }
        })
    }

    #[test]
    fn fixed_threshold_selects_block() {
        let volume = bright_block_volume();
        let params = MaskParams::default().with_min_occupied(1).without_cleanup();
        let result =
            build_mask(&volume, &Selection::threshold_fixed(100.0), &params).unwrap();
        assert_eq!(result.mask.occupied_count(), 216);
        assert_eq!(result.threshold, Some(100.0));
    }

    #[test]
    fn auto_threshold_uses_foreground_percentile() {
        let volume = bright_block_volume();
        let params = MaskParams::default();
        // All foreground samples (> -500) are exactly 200, so any
        // percentile of them is 200.
        let t = auto_threshold(&volume, &params);
        assert_relative_eq!(t, 200.0);
    }

    #[test]
    fn auto_threshold_interpolates() {
        let values: Vec<f64> = (0..11).map(f64::from).collect();
        let volume = ScalarVolume::from_values((11, 1, 1), Spacing::default(), values).unwrap();
        let params = MaskParams::default().with_background_floor(-1.0);
        // 30th percentile of 0..=10 is 3.0.
        assert_relative_eq!(auto_threshold(&volume, &params), 3.0);
    }

    #[test]
    fn label_mode_selects_exact_matches() {
        let volume = ScalarVolume::from_fn((8, 8, 8), Spacing::default(), |x, _, _| {
            if x < 4 { 2.0 } else { 3.0 }
        });
        let params = MaskParams::default().with_min_occupied(1);
        let result = build_mask(&volume, &Selection::Label(2), &params).unwrap();
        assert_eq!(result.mask.occupied_count(), 256);
        assert_eq!(result.threshold, None);
    }

    #[test]
    fn all_zero_volume_fails_with_empty_threshold() {
        let volume = ScalarVolume::from_fn((10, 10, 10), Spacing::default(), |_, _, _| 0.0);
        let err = build_mask(
            &volume,
            &Selection::threshold_fixed(0.5),
            &MaskParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MaskError::EmptyThreshold { occupied: 0, .. }));
    }

    #[test]
    fn missing_label_fails_with_empty_label() {
        let volume = ScalarVolume::from_fn((10, 10, 10), Spacing::default(), |_, _, _| 1.0);
        let err = build_mask(&volume, &Selection::Label(7), &MaskParams::default()).unwrap_err();
        assert!(matches!(err, MaskError::EmptyLabel { label: 7, .. }));
    }

    #[test]
    fn cleanup_keeps_largest_structure_only() {
        // One large block and one small distant blob, both above threshold.
        let volume = ScalarVolume::from_fn((24, 16, 16), Spacing::default(), |x, y, z| {
            let in_block =
                (2..12).contains(&x) && (2..12).contains(&y) && (2..12).contains(&z);
            let in_blob =
                (18..20).contains(&x) && (2..4).contains(&y) && (2..4).contains(&z);
            if in_block || in_blob { 100.0 } else { -1000.0 }
        });
        let params = MaskParams::default()
            .with_min_object_size(100)
            .with_min_occupied(100);
        let result = build_mask(&volume, &Selection::threshold_fixed(0.0), &params).unwrap();
        assert!(!result.mask.get(18, 2, 2));
        assert!(result.mask.get(5, 5, 5));
    }

    #[test]
    fn empty_volume_is_rejected() {
        let volume =
            ScalarVolume::from_values((0, 0, 0), Spacing::default(), Vec::new()).unwrap();
        let err = build_mask(
            &volume,
            &Selection::threshold_fixed(0.0),
            &MaskParams::default(),
        )
        .unwrap_err();
        assert_eq!(err, MaskError::EmptyVolume);
    }
}
