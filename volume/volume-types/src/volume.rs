//! 3D scalar sample arrays.

use crate::Spacing;

/// A 3D array of real-valued samples with physical voxel spacing.
///
/// Samples are stored in a single contiguous buffer with x varying fastest:
/// `index = ix + iy * nx + iz * nx * ny`. The volume is immutable once
/// constructed; the pipeline derives an [`crate::OccupancyMask`] from it and
/// then drops it.
#[derive(Debug, Clone)]
pub struct ScalarVolume {
    /// Samples in x-fastest order.
    values: Vec<f64>,
    /// Array shape (nx, ny, nz).
    shape: (usize, usize, usize),
    /// Physical voxel spacing in mm.
    spacing: Spacing,
}

impl ScalarVolume {
    /// Create a volume from an existing sample buffer.
    ///
    /// Returns `None` if `values.len()` does not match the shape product.
    #[must_use]
    pub fn from_values(
        shape: (usize, usize, usize),
        spacing: Spacing,
        values: Vec<f64>,
    ) -> Option<Self> {
        let (nx, ny, nz) = shape;
        if values.len() != nx * ny * nz {
            return None;
        }
        Some(Self {
            values,
            shape,
            spacing,
        })
    }

    /// Create a volume by evaluating a function at every sample index.
    #[must_use]
    pub fn from_fn<F>(shape: (usize, usize, usize), spacing: Spacing, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> f64,
    {
        let (nx, ny, nz) = shape;
        let mut values = Vec::with_capacity(nx * ny * nz);
        for iz in 0..nz {
            for iy in 0..ny {
                for ix in 0..nx {
                    values.push(f(ix, iy, iz));
                }
            }
        }
        Self {
            values,
            shape,
            spacing,
        }
    }

    /// Array shape (nx, ny, nz).
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        self.shape
    }

    /// Physical voxel spacing.
    #[must_use]
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Total number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the volume has zero samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample value at array coordinates.
    ///
    /// Returns 0.0 for out-of-bounds coordinates.
    #[must_use]
    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> f64 {
        if ix < self.shape.0 && iy < self.shape.1 && iz < self.shape.2 {
            self.values[self.index(ix, iy, iz)]
        } else {
            0.0
        }
    }

    /// Raw sample buffer in x-fastest order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    fn index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + iy * self.shape.0 + iz * self.shape.0 * self.shape.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_values_checks_length() {
        let ok = ScalarVolume::from_values((2, 2, 2), Spacing::default(), vec![0.0; 8]);
        assert!(ok.is_some());

        let bad = ScalarVolume::from_values((2, 2, 2), Spacing::default(), vec![0.0; 7]);
        assert!(bad.is_none());
    }

    #[test]
    fn x_varies_fastest() {
        let v = ScalarVolume::from_fn((3, 2, 2), Spacing::default(), |x, y, z| {
            (x + 10 * y + 100 * z) as f64
        });
        // Buffer order: (0,0,0), (1,0,0), (2,0,0), (0,1,0), ...
        assert_relative_eq!(v.values()[0], 0.0);
        assert_relative_eq!(v.values()[1], 1.0);
        assert_relative_eq!(v.values()[3], 10.0);
        assert_relative_eq!(v.values()[6], 100.0);
    }

    #[test]
    fn out_of_bounds_reads_zero() {
        let v = ScalarVolume::from_fn((2, 2, 2), Spacing::default(), |_, _, _| 5.0);
        assert_relative_eq!(v.get(1, 1, 1), 5.0);
        assert_relative_eq!(v.get(2, 0, 0), 0.0);
    }
}
