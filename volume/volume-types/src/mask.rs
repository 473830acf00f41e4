//! Binary occupancy masks.

use crate::Spacing;

/// A 3D binary array marking which voxels belong to the structure of
/// interest.
///
/// Same storage layout as [`crate::ScalarVolume`]: one contiguous buffer,
/// x varying fastest. Produced by mask building (thresholding or label
/// selection) and consumed once by surface extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMask {
    /// Occupancy flags in x-fastest order.
    voxels: Vec<bool>,
    /// Array shape (nx, ny, nz).
    shape: (usize, usize, usize),
}

impl OccupancyMask {
    /// Create an all-empty mask of the given shape.
    #[must_use]
    pub fn empty(shape: (usize, usize, usize)) -> Self {
        let (nx, ny, nz) = shape;
        Self {
            voxels: vec![false; nx * ny * nz],
            shape,
        }
    }

    /// Create a mask by evaluating a predicate at every voxel index.
    #[must_use]
    pub fn from_fn<F>(shape: (usize, usize, usize), mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> bool,
    {
        let (nx, ny, nz) = shape;
        let mut voxels = Vec::with_capacity(nx * ny * nz);
        for iz in 0..nz {
            for iy in 0..ny {
                for ix in 0..nx {
                    voxels.push(f(ix, iy, iz));
                }
            }
        }
        Self { voxels, shape }
    }

    /// Array shape (nx, ny, nz).
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        self.shape
    }

    /// Whether the voxel at the given coordinates is occupied.
    ///
    /// Out-of-bounds coordinates read as unoccupied, which lets
    /// neighborhood sweeps run without explicit border handling.
    #[must_use]
    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> bool {
        if ix < self.shape.0 && iy < self.shape.1 && iz < self.shape.2 {
            self.voxels[self.index(ix, iy, iz)]
        } else {
            false
        }
    }

    /// Signed-coordinate variant of [`get`](Self::get); negative
    /// coordinates read as unoccupied.
    #[must_use]
    pub fn get_signed(&self, ix: isize, iy: isize, iz: isize) -> bool {
        if ix < 0 || iy < 0 || iz < 0 {
            return false;
        }
        #[allow(clippy::cast_sign_loss)] // Sign checked above
        self.get(ix as usize, iy as usize, iz as usize)
    }

    /// Set the occupancy of a voxel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, ix: usize, iy: usize, iz: usize, occupied: bool) {
        if ix < self.shape.0 && iy < self.shape.1 && iz < self.shape.2 {
            let idx = self.index(ix, iy, iz);
            self.voxels[idx] = occupied;
        }
    }

    /// Number of occupied voxels.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.voxels.iter().filter(|&&v| v).count()
    }

    /// Whether no voxel is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.voxels.iter().any(|&v| v)
    }

    /// Iterate over the coordinates of all occupied voxels.
    pub fn occupied_voxels(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let (nx, ny, _) = self.shape;
        self.voxels
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(move |(idx, _)| (idx % nx, (idx / nx) % ny, idx / (nx * ny)))
    }

    /// Occupancy as a scalar field sample: 1.0 if occupied, 0.0 otherwise.
    ///
    /// Marching cubes and gradient estimation read the mask through this.
    #[must_use]
    pub fn sample(&self, ix: isize, iy: isize, iz: isize) -> f64 {
        if self.get_signed(ix, iy, iz) {
            1.0
        } else {
            0.0
        }
    }

    #[inline]
    fn index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + iy * self.shape.0 + iz * self.shape.0 * self.shape.1
    }
}

/// Voxel volume implied by a spacing, for occupied-volume estimates.
#[must_use]
pub fn occupied_volume_mm3(mask: &OccupancyMask, spacing: Spacing) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    // Precision: voxel counts are far below 2^52
    let count = mask.occupied_count() as f64;
    count * spacing.voxel_volume()
}
