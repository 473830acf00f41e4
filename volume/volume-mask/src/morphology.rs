//! Binary morphology on occupancy masks.
//!
//! All operations use 6-connectivity for component labeling and flood
//! fills, and a spherical structuring element for closing.

use std::collections::VecDeque;

use tracing::debug;
use volume_types::OccupancyMask;

/// Face-adjacent neighbor offsets (6-connectivity).
const NEIGHBORS_6: [(isize, isize, isize); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Remove connected components smaller than `min_size` voxels.
#[must_use]
pub fn remove_small_objects(mask: &OccupancyMask, min_size: usize) -> OccupancyMask {
    let components = label_components(mask);
    let mut out = OccupancyMask::empty(mask.shape());

    let mut removed = 0usize;
    for component in &components {
        if component.len() >= min_size {
            for &(x, y, z) in component {
                out.set(x, y, z, true);
            }
        } else {
            removed += component.len();
        }
    }

    debug!(
        components = components.len(),
        removed_voxels = removed,
        "removed small objects"
    );
    out
}

/// Morphological closing with a spherical structuring element: dilation
/// followed by erosion. Bridges gaps narrower than roughly `2 * radius`
/// voxels without growing the overall structure.
#[must_use]
pub fn binary_closing(mask: &OccupancyMask, radius: usize) -> OccupancyMask {
    if radius == 0 {
        return mask.clone();
    }
    let ball = ball_offsets(radius);
    let dilated = dilate(mask, &ball);
    erode(&dilated, &ball)
}

/// Fill enclosed cavities: any unoccupied region not connected to the
/// volume border becomes occupied.
#[must_use]
pub fn fill_holes(mask: &OccupancyMask) -> OccupancyMask {
    let (nx, ny, nz) = mask.shape();
    if nx == 0 || ny == 0 || nz == 0 {
        return mask.clone();
    }

    // Flood the exterior background starting from every border voxel.
    let mut outside = vec![false; nx * ny * nz];
    let index = |x: usize, y: usize, z: usize| x + y * nx + z * nx * ny;
    let mut queue = VecDeque::new();

    let mut try_seed = |x: usize, y: usize, z: usize, outside: &mut Vec<bool>, queue: &mut VecDeque<(usize, usize, usize)>| {
        if !mask.get(x, y, z) && !outside[index(x, y, z)] {
            outside[index(x, y, z)] = true;
            queue.push_back((x, y, z));
        }
    };

    for y in 0..ny {
        for x in 0..nx {
            try_seed(x, y, 0, &mut outside, &mut queue);
            try_seed(x, y, nz - 1, &mut outside, &mut queue);
        }
    }
    for z in 0..nz {
        for x in 0..nx {
            try_seed(x, 0, z, &mut outside, &mut queue);
            try_seed(x, ny - 1, z, &mut outside, &mut queue);
        }
        for y in 0..ny {
            try_seed(0, y, z, &mut outside, &mut queue);
            try_seed(nx - 1, y, z, &mut outside, &mut queue);
        }
    }

    while let Some((x, y, z)) = queue.pop_front() {
        for (dx, dy, dz) in NEIGHBORS_6 {
            #[allow(clippy::cast_possible_wrap)]
            let (sx, sy, sz) = (x as isize + dx, y as isize + dy, z as isize + dz);
            if sx < 0 || sy < 0 || sz < 0 {
                continue;
            }
            #[allow(clippy::cast_sign_loss)]
            let (ux, uy, uz) = (sx as usize, sy as usize, sz as usize);
            if ux < nx && uy < ny && uz < nz && !mask.get(ux, uy, uz) && !outside[index(ux, uy, uz)]
            {
                outside[index(ux, uy, uz)] = true;
                queue.push_back((ux, uy, uz));
            }
        }
    }

    // Everything that is neither occupied nor exterior is an enclosed hole.
    let filled = OccupancyMask::from_fn((nx, ny, nz), |x, y, z| {
        mask.get(x, y, z) || !outside[index(x, y, z)]
    });

    debug!(
        filled_voxels = filled.occupied_count() - mask.occupied_count(),
        "filled enclosed holes"
    );
    filled
}

/// Keep only the single largest connected component.
#[must_use]
pub fn keep_largest_component(mask: &OccupancyMask) -> OccupancyMask {
    let components = label_components(mask);
    let mut out = OccupancyMask::empty(mask.shape());

    if let Some(largest) = components.iter().max_by_key(|c| c.len()) {
        for &(x, y, z) in largest {
            out.set(x, y, z, true);
        }
        debug!(
            components = components.len(),
            kept_voxels = largest.len(),
            "kept largest component"
        );
    }
    out
}

/// Label 6-connected components of occupied voxels.
fn label_components(mask: &OccupancyMask) -> Vec<Vec<(usize, usize, usize)>> {
    let (nx, ny, nz) = mask.shape();
    let mut visited = vec![false; nx * ny * nz];
    let index = |x: usize, y: usize, z: usize| x + y * nx + z * nx * ny;

    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for (sx, sy, sz) in mask.occupied_voxels() {
        if visited[index(sx, sy, sz)] {
            continue;
        }
        visited[index(sx, sy, sz)] = true;
        queue.push_back((sx, sy, sz));
        let mut component = Vec::new();

        while let Some((x, y, z)) = queue.pop_front() {
            component.push((x, y, z));
            for (dx, dy, dz) in NEIGHBORS_6 {
                #[allow(clippy::cast_possible_wrap)]
                let (ix, iy, iz) = (x as isize + dx, y as isize + dy, z as isize + dz);
                if !mask.get_signed(ix, iy, iz) {
                    continue;
                }
                #[allow(clippy::cast_sign_loss)]
                let (ux, uy, uz) = (ix as usize, iy as usize, iz as usize);
                if !visited[index(ux, uy, uz)] {
                    visited[index(ux, uy, uz)] = true;
                    queue.push_back((ux, uy, uz));
                }
            }
        }
        components.push(component);
    }
    components
}

/// Offsets of all voxels within a sphere of the given radius.
fn ball_offsets(radius: usize) -> Vec<(isize, isize, isize)> {
    #[allow(clippy::cast_possible_wrap)]
    let r = radius as isize;
    let r2 = r * r;
    let mut offsets = Vec::new();
    for dz in -r..=r {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy + dz * dz <= r2 {
                    offsets.push((dx, dy, dz));
                }
            }
        }
    }
    offsets
}

fn dilate(mask: &OccupancyMask, offsets: &[(isize, isize, isize)]) -> OccupancyMask {
    let mut out = OccupancyMask::empty(mask.shape());
    for (x, y, z) in mask.occupied_voxels() {
        for &(dx, dy, dz) in offsets {
            #[allow(clippy::cast_possible_wrap)]
            let (ix, iy, iz) = (x as isize + dx, y as isize + dy, z as isize + dz);
            if ix >= 0 && iy >= 0 && iz >= 0 {
                #[allow(clippy::cast_sign_loss)]
                out.set(ix as usize, iy as usize, iz as usize, true);
            }
        }
    }
    out
}

fn erode(mask: &OccupancyMask, offsets: &[(isize, isize, isize)]) -> OccupancyMask {
    let (nx, ny, nz) = mask.shape();
    OccupancyMask::from_fn((nx, ny, nz), |x, y, z| {
        if !mask.get(x, y, z) {
            return false;
        }
        offsets.iter().all(|&(dx, dy, dz)| {
            #[allow(clippy::cast_possible_wrap)]
            let (ix, iy, iz) = (x as isize + dx, y as isize + dy, z as isize + dz);
            mask.get_signed(ix, iy, iz)
        })
    })
}
