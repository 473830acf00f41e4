//! The sanitization pass.

use std::fmt;

use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;
use tracing::debug;

use mesh_types::IndexedMesh;

use crate::normals::{orient_faces_consistently, recompute_vertex_normals};
use crate::params::SanitizeParams;

/// Summary of one sanitization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeSummary {
    /// Degenerate faces removed.
    pub degenerate_faces_removed: usize,
    /// Vertices merged into a coincident neighbor.
    pub vertices_welded: usize,
    /// Duplicate faces removed.
    pub duplicate_faces_removed: usize,
    /// Unreferenced vertices removed.
    pub unreferenced_vertices_removed: usize,
    /// Faces flipped for winding consistency.
    pub faces_flipped: usize,
    /// Whether vertex normals were recomputed.
    pub normals_recomputed: bool,
}

impl SanitizeSummary {
    /// Whether the pass changed any geometry or topology.
    #[must_use]
    pub const fn had_changes(&self) -> bool {
        self.degenerate_faces_removed > 0
            || self.vertices_welded > 0
            || self.duplicate_faces_removed > 0
            || self.unreferenced_vertices_removed > 0
            || self.faces_flipped > 0
    }
}

impl fmt::Display for SanitizeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sanitize: -{} degenerate, {} welded, -{} duplicate, -{} unreferenced, {} flipped",
            self.degenerate_faces_removed,
            self.vertices_welded,
            self.duplicate_faces_removed,
            self.unreferenced_vertices_removed,
            self.faces_flipped
        )
    }
}

/// Remove faces with repeated vertex indices or area below the
/// threshold. Returns the number of faces removed.
pub fn remove_degenerate_faces(mesh: &mut IndexedMesh, area_threshold: f64) -> usize {
    let before = mesh.faces.len();
    let vertices = std::mem::take(&mut mesh.vertices);
    mesh.faces.retain(|&[a, b, c]| {
        if a == b || b == c || a == c {
            return false;
        }
        let pa = vertices[a as usize].position;
        let pb = vertices[b as usize].position;
        let pc = vertices[c as usize].position;
        (pb - pa).cross(&(pc - pa)).norm() * 0.5 > area_threshold
    });
    mesh.vertices = vertices;
    before - mesh.faces.len()
}

/// Merge vertices closer than `epsilon`, remapping faces and dropping
/// faces that collapse. Merged vertices average their normals so smooth
/// shading survives the weld. Returns the number of vertices merged away.
pub fn weld_coincident_vertices(mesh: &mut IndexedMesh, epsilon: f64) -> usize {
    if mesh.vertices.is_empty() || epsilon <= 0.0 {
        return 0;
    }

    let cell_size = epsilon * 2.0;
    let cell_of = |p: &Point3<f64>| {
        #[allow(clippy::cast_possible_truncation)]
        (
            (p.x / cell_size).floor() as i64,
            (p.y / cell_size).floor() as i64,
            (p.z / cell_size).floor() as i64,
        )
    };

    // Spatial hash so only nearby vertices are compared.
    let mut grid: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        grid.entry(cell_of(&vertex.position)).or_default().push(idx as u32);
    }

    #[allow(clippy::cast_possible_truncation)]
    let mut remap: Vec<u32> = (0..mesh.vertices.len() as u32).collect();
    let mut merged = 0usize;

    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let idx = idx as u32;
        if remap[idx as usize] != idx {
            continue;
        }
        let (cx, cy, cz) = cell_of(&vertex.position);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(candidates) = grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &other in candidates {
                        if other <= idx || remap[other as usize] != other {
                            continue;
                        }
                        let dist =
                            (vertex.position - mesh.vertices[other as usize].position).norm();
                        if dist < epsilon {
                            remap[other as usize] = idx;
                            merged += 1;
                        }
                    }
                }
            }
        }
    }

    if merged == 0 {
        return 0;
    }

    // Chase remap chains to their roots.
    for i in 0..remap.len() {
        let mut target = remap[i];
        while remap[target as usize] != target {
            target = remap[target as usize];
        }
        remap[i] = target;
    }

    // Average the normals of each merge group onto the surviving vertex.
    let mut normal_sums = vec![nalgebra::Vector3::zeros(); mesh.vertices.len()];
    for (i, vertex) in mesh.vertices.iter().enumerate() {
        if let Some(n) = vertex.normal {
            normal_sums[remap[i] as usize] += n;
        }
    }
    for (i, vertex) in mesh.vertices.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        if remap[i] == i as u32 {
            let len = normal_sums[i].norm();
            if len > f64::EPSILON {
                vertex.normal = Some(normal_sums[i] / len);
            }
        }
    }

    for face in &mut mesh.faces {
        for v in face.iter_mut() {
            *v = remap[*v as usize];
        }
    }
    mesh.faces.retain(|&[a, b, c]| a != b && b != c && a != c);

    merged
}

/// Remove faces referencing the same unordered vertex triple as an
/// earlier face, regardless of winding. Returns the number removed.
pub fn remove_duplicate_faces(mesh: &mut IndexedMesh) -> usize {
    let before = mesh.faces.len();
    let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(mesh.faces.len());
    mesh.faces.retain(|&[a, b, c]| {
        let mut key = [a, b, c];
        key.sort_unstable();
        seen.insert(key)
    });
    before - mesh.faces.len()
}

/// Drop vertices referenced by no face and renumber face indices.
/// Returns the number of vertices removed.
pub fn remove_unreferenced_vertices(mesh: &mut IndexedMesh) -> usize {
    let before = mesh.vertices.len();
    let mut referenced = vec![false; mesh.vertices.len()];
    for face in &mesh.faces {
        for &v in face {
            referenced[v as usize] = true;
        }
    }
    if referenced.iter().all(|&r| r) {
        return 0;
    }

    let mut remap = vec![0u32; mesh.vertices.len()];
    let mut kept = Vec::with_capacity(mesh.vertices.len());
    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        if referenced[idx] {
            #[allow(clippy::cast_possible_truncation)]
            {
                remap[idx] = kept.len() as u32;
            }
            kept.push(*vertex);
        }
    }
    for face in &mut mesh.faces {
        for v in face.iter_mut() {
            *v = remap[*v as usize];
        }
    }
    mesh.vertices = kept;
    before - mesh.vertices.len()
}

/// Run the full sanitization pass.
///
/// Steps run in a fixed order; each is individually idempotent and the
/// pass as a whole leaves an already-clean mesh byte-identical apart
/// from recomputed normals.
#[must_use]
pub fn sanitize_mesh(mesh: &mut IndexedMesh, params: &SanitizeParams) -> SanitizeSummary {
    let mut summary = SanitizeSummary {
        degenerate_faces_removed: remove_degenerate_faces(
            mesh,
            params.degenerate_area_threshold,
        ),
        vertices_welded: weld_coincident_vertices(mesh, params.weld_epsilon),
        ..SanitizeSummary::default()
    };
    // Welding can collapse two distinct faces onto the same triple.
    summary.duplicate_faces_removed = remove_duplicate_faces(mesh);
    summary.unreferenced_vertices_removed = remove_unreferenced_vertices(mesh);

    if params.fix_normals {
        summary.faces_flipped = orient_faces_consistently(mesh);
        recompute_vertex_normals(mesh);
        summary.normals_recomputed = true;
    }

    debug!(%summary, vertices = mesh.vertices.len(), faces = mesh.faces.len(), "sanitized");
    summary
}
