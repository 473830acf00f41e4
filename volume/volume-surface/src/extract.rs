//! Marching cubes over occupancy masks.

use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use tracing::debug;

use mesh_types::{IndexedMesh, Vertex};
use volume_types::{OccupancyMask, Spacing};

use crate::error::{ExtractError, ExtractResult};
use crate::params::ExtractParams;
use crate::tables::{CORNER_OFFSETS, EDGE_ANCHORS, EDGE_VERTICES, TRI_TABLE};

/// Faces with squared area below this are rejected at emit.
const MIN_FACE_AREA_SQ: f64 = 1e-20;

/// Extract a triangle mesh from an occupancy mask at physical scale.
///
/// The mask is treated as a 0/1 scalar field and polygonized at
/// [`ExtractParams::iso_level`]. The sample lattice is padded with one
/// layer of unoccupied samples on every side so structures touching the
/// volume border still produce closed surfaces; interpolated coordinates
/// are clamped back into the original sample range, so the mesh never
/// extends past the physical extent of the volume. Coordinates are scaled
/// per axis by `spacing`, producing a mesh in millimeters.
///
/// Per-vertex normals are estimated from the central-difference gradient
/// of the occupancy field and point outward (toward decreasing
/// occupancy). Vertices on crossing edges are shared between neighboring
/// cells.
///
/// # Errors
///
/// - [`ExtractError::EmptyMask`] if the mask has no occupied voxels
/// - [`ExtractError::InvalidStride`] if `params.stride` is zero
/// - [`ExtractError::NoTriangles`] if no non-degenerate triangle could be
///   formed (e.g. the structure is flatter than the stride can resolve)
pub fn extract_surface(
    mask: &OccupancyMask,
    spacing: Spacing,
    params: &ExtractParams,
) -> ExtractResult<IndexedMesh> {
    if params.stride == 0 {
        return Err(ExtractError::InvalidStride);
    }
    if mask.is_empty() {
        return Err(ExtractError::EmptyMask);
    }

    let (nx, ny, nz) = mask.shape();
    let sx = axis_samples(nx, params.stride);
    let sy = axis_samples(ny, params.stride);
    let sz = axis_samples(nz, params.stride);

    let iso = params.iso_level;
    let mut mesh = IndexedMesh::new();
    // Interpolated vertex per cut lattice edge, keyed by the edge's
    // anchor lattice point and axis.
    let mut edge_vertices: HashMap<(usize, usize, usize, usize), u32> = HashMap::new();

    for k in 0..sz.len() - 1 {
        for j in 0..sy.len() - 1 {
            for i in 0..sx.len() - 1 {
                let mut values = [0.0f64; 8];
                let mut cube_index = 0usize;
                for (corner, &(dx, dy, dz)) in CORNER_OFFSETS.iter().enumerate() {
                    let v = mask.sample(sx[i + dx], sy[j + dy], sz[k + dz]);
                    values[corner] = v;
                    if v > iso {
                        cube_index |= 1 << corner;
                    }
                }

                if cube_index == 0 || cube_index == 0xFF {
                    continue;
                }

                let row = &TRI_TABLE[cube_index];
                for triangle in row.chunks(3) {
                    if triangle[0] < 0 {
                        break;
                    }

                    let mut indices = [0u32; 3];
                    for (t, &edge) in triangle.iter().enumerate() {
                        #[allow(clippy::cast_sign_loss)]
                        let edge = edge as usize;
                        let (anchor, axis) = EDGE_ANCHORS[edge];
                        let (ax, ay, az) = CORNER_OFFSETS[anchor];
                        let key = (i + ax, j + ay, k + az, axis);

                        if let Some(&vi) = edge_vertices.get(&key) {
                            indices[t] = vi;
                        } else {
                            let vertex = interpolate_edge(
                                mask, spacing, params, &sx, &sy, &sz, (i, j, k), edge, &values,
                            );
                            #[allow(clippy::cast_possible_truncation)]
                            // Truncation: mesh indices are u32, meshes with >4B vertices unsupported
                            let vi = mesh.vertices.len() as u32;
                            mesh.vertices.push(vertex);
                            edge_vertices.insert(key, vi);
                            indices[t] = vi;
                        }
                    }

                    if is_emittable(&mesh, indices) {
                        mesh.faces.push(indices);
                    }
                }
            }
        }
    }

    if mesh.faces.is_empty() {
        return Err(ExtractError::NoTriangles {
            occupied: mask.occupied_count(),
            stride: params.stride,
        });
    }

    debug!(
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        stride = params.stride,
        "surface extracted"
    );
    Ok(mesh)
}

/// Sample indices along one axis: the padded lattice `[-1, n]` walked at
/// the given stride, always including both pad layers.
fn axis_samples(n: usize, stride: usize) -> Vec<isize> {
    let padded = n + 2;
    #[allow(clippy::cast_possible_wrap)]
    let mut samples: Vec<isize> = (0..padded).step_by(stride).map(|p| p as isize - 1).collect();
    #[allow(clippy::cast_possible_wrap)]
    let last = padded as isize - 2;
    if samples.last() != Some(&last) {
        samples.push(last);
    }
    samples
}

/// Physical coordinate of a sample index, clamped into the volume extent.
fn sample_coord(si: isize, n: usize, spacing: f64) -> f64 {
    #[allow(clippy::cast_possible_wrap)]
    let max = (n as isize - 1).max(0);
    #[allow(clippy::cast_precision_loss)]
    {
        si.clamp(0, max) as f64 * spacing
    }
}

#[allow(clippy::too_many_arguments)]
fn interpolate_edge(
    mask: &OccupancyMask,
    spacing: Spacing,
    params: &ExtractParams,
    sx: &[isize],
    sy: &[isize],
    sz: &[isize],
    cell: (usize, usize, usize),
    edge: usize,
    values: &[f64; 8],
) -> Vertex {
    let (i, j, k) = cell;
    let (c0, c1) = EDGE_VERTICES[edge];
    let (nx, ny, nz) = mask.shape();

    let corner_sample = |c: usize| {
        let (dx, dy, dz) = CORNER_OFFSETS[c];
        (sx[i + dx], sy[j + dy], sz[k + dz])
    };
    let corner_position = |c: usize| {
        let (ix, iy, iz) = corner_sample(c);
        Point3::new(
            sample_coord(ix, nx, spacing.x),
            sample_coord(iy, ny, spacing.y),
            sample_coord(iz, nz, spacing.z),
        )
    };

    let (v0, v1) = (values[c0], values[c1]);
    // Cut edges always have v0 != v1 on a 0/1 field.
    let t = (params.iso_level - v0) / (v1 - v0);

    let p0 = corner_position(c0);
    let p1 = corner_position(c1);
    let position = p0 + (p1 - p0) * t;

    let g0 = gradient(mask, spacing, params.stride, corner_sample(c0));
    let g1 = gradient(mask, spacing, params.stride, corner_sample(c1));
    let g = g0 + (g1 - g0) * t;
    // Outward is the direction of decreasing occupancy.
    let normal = -g;
    let norm = normal.norm();
    if norm > 1e-12 {
        Vertex::with_normal(position, normal / norm)
    } else {
        Vertex::new(position)
    }
}

/// Central-difference gradient of the occupancy field at a sample point.
fn gradient(
    mask: &OccupancyMask,
    spacing: Spacing,
    stride: usize,
    (ix, iy, iz): (isize, isize, isize),
) -> Vector3<f64> {
    #[allow(clippy::cast_possible_wrap)]
    let s = stride as isize;
    #[allow(clippy::cast_precision_loss)]
    let step = 2.0 * stride as f64;
    Vector3::new(
        (mask.sample(ix + s, iy, iz) - mask.sample(ix - s, iy, iz)) / (step * spacing.x),
        (mask.sample(ix, iy + s, iz) - mask.sample(ix, iy - s, iz)) / (step * spacing.y),
        (mask.sample(ix, iy, iz + s) - mask.sample(ix, iy, iz - s)) / (step * spacing.z),
    )
}

/// Reject triangles with repeated indices or (near-)zero area, which can
/// appear where coordinates were clamped onto the volume boundary.
fn is_emittable(mesh: &IndexedMesh, [a, b, c]: [u32; 3]) -> bool {
    if a == b || b == c || a == c {
        return false;
    }
    let pa = mesh.vertices[a as usize].position;
    let pb = mesh.vertices[b as usize].position;
    let pc = mesh.vertices[c as usize].position;
    (pb - pa).cross(&(pc - pa)).norm_squared() > MIN_FACE_AREA_SQ
}
