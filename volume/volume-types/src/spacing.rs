//! Physical voxel spacing.

use nalgebra::Vector3;

/// Per-axis physical voxel spacing in millimeters.
///
/// Every sample in a [`crate::ScalarVolume`] represents a box of
/// `x × y × z` millimeters; surface extraction multiplies index-space
/// coordinates by the spacing so meshes come out in physical units.
///
/// Invariant: all three components are strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Spacing along the x axis in mm.
    pub x: f64,
    /// Spacing along the y axis in mm.
    pub y: f64,
    /// Spacing along the z axis in mm.
    pub z: f64,
}

impl Spacing {
    /// Create a spacing from three per-axis values.
    ///
    /// Non-positive or non-finite components are clamped to a small
    /// positive epsilon rather than rejected; a degenerate spacing in a
    /// scan header should not abort the whole conversion.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        const MIN_SPACING: f64 = 1e-6;
        let sanitize = |v: f64| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                MIN_SPACING
            }
        };
        Self {
            x: sanitize(x),
            y: sanitize(y),
            z: sanitize(z),
        }
    }

    /// Create an isotropic spacing (same value on all axes).
    #[must_use]
    pub fn uniform(s: f64) -> Self {
        Self::new(s, s, s)
    }

    /// Physical volume of a single voxel in mm³.
    #[must_use]
    pub fn voxel_volume(&self) -> f64 {
        self.x * self.y * self.z
    }

    /// Spacing as a vector, in axis order.
    #[must_use]
    pub const fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// The smallest of the three per-axis spacings.
    #[must_use]
    pub fn min_component(&self) -> f64 {
        self.x.min(self.y).min(self.z)
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl From<(f64, f64, f64)> for Spacing {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[f64; 3]> for Spacing {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}
