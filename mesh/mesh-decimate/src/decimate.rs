//! Edge-collapse decimation driven by quadric error.
//!
//! Candidate collapses live in a min-heap ordered by quadric cost. Every
//! vertex carries a stamp that is bumped whenever the vertex moves or absorbs
//! a neighbour, so stale heap entries are recognised and dropped on pop
//! instead of being rebuilt eagerly.

// Vertex indices fit in u32 for any mesh this pipeline produces.
#![allow(clippy::cast_possible_truncation)]

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};
use mesh_types::{IndexedMesh, Point3, Vertex};
use tracing::{debug, info};

use crate::error::{DecimateError, DecimateResult};
use crate::params::DecimateParams;
use crate::quadric::Quadric;
use crate::result::DecimateSummary;

/// A candidate edge collapse ordered by cost (smallest first).
#[derive(Debug, Clone)]
struct Candidate {
    cost: f64,
    v1: u32,
    v2: u32,
    stamp1: u32,
    stamp2: u32,
    target: Point3<f64>,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the cheapest collapse first.
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

/// Simplify `mesh` down to `params.target_faces` faces.
///
/// Returns the input unchanged (modulo clone) when it is already at or below
/// the target. The pass may stop short of the target when every remaining
/// candidate would pinch the surface into a non-manifold configuration; the
/// caller can detect this through [`DecimateSummary::reached_target`].
///
/// # Errors
///
/// [`DecimateError::EmptyMesh`] when the mesh has no faces and
/// [`DecimateError::ZeroTarget`] when `target_faces` is zero.
pub fn decimate_mesh(
    mesh: &IndexedMesh,
    params: &DecimateParams,
) -> DecimateResult<DecimateSummary> {
    if params.target_faces == 0 {
        return Err(DecimateError::ZeroTarget);
    }
    if mesh.faces.is_empty() {
        return Err(DecimateError::EmptyMesh);
    }

    let input_faces = mesh.faces.len();
    if input_faces <= params.target_faces {
        debug!(input_faces, target = params.target_faces, "mesh already at target, skipping");
        return Ok(DecimateSummary {
            mesh: mesh.clone(),
            input_faces,
            output_faces: input_faces,
            collapses_applied: 0,
            collapses_rejected: 0,
        });
    }

    info!(input_faces, target = params.target_faces, "starting decimation");

    let mut state = CollapseState::new(mesh);
    let mut heap = state.seed_candidates();
    let mut applied = 0usize;
    let mut rejected = 0usize;

    while state.live_faces > params.target_faces {
        let Some(cand) = heap.pop() else {
            break;
        };
        if !state.is_current(&cand) {
            continue;
        }
        if params.lock_boundary
            && (state.boundary[cand.v1 as usize] || state.boundary[cand.v2 as usize])
        {
            rejected += 1;
            continue;
        }
        if params.max_error.is_some_and(|max| cand.cost > max) {
            rejected += 1;
            continue;
        }
        if !state.link_condition_holds(cand.v1, cand.v2) {
            rejected += 1;
            continue;
        }

        state.collapse(cand.v1, cand.v2, &cand.target);
        applied += 1;

        for n in state.neighbours(cand.v1) {
            if let Some(next) = state.candidate(cand.v1, n) {
                heap.push(next);
            }
        }
    }

    let output = state.into_mesh();
    let output_faces = output.faces.len();
    info!(output_faces, collapses = applied, "decimation complete");

    Ok(DecimateSummary {
        mesh: output,
        input_faces,
        output_faces,
        collapses_applied: applied,
        collapses_rejected: rejected,
    })
}

/// Mutable decimation state over an indexed mesh.
struct CollapseState {
    vertices: Vec<Vertex>,
    alive: Vec<bool>,
    stamp: Vec<u32>,
    quadrics: Vec<Quadric>,
    boundary: Vec<bool>,
    faces: Vec<[u32; 3]>,
    face_alive: Vec<bool>,
    /// Face ids touching each vertex. Entries for dead faces linger and are
    /// filtered on read.
    incident: Vec<Vec<u32>>,
    live_faces: usize,
}

impl CollapseState {
    fn new(mesh: &IndexedMesh) -> Self {
        let vertex_count = mesh.vertices.len();
        let mut quadrics = vec![Quadric::default(); vertex_count];
        let mut incident: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        let mut edge_faces: HashMap<(u32, u32), u32> = HashMap::new();

        for (face_idx, face) in mesh.faces.iter().enumerate() {
            for &v in face {
                incident[v as usize].push(face_idx as u32);
            }
            for i in 0..3 {
                *edge_faces
                    .entry(ordered(face[i], face[(i + 1) % 3]))
                    .or_insert(0) += 1;
            }
            if let Some(normal) = mesh.face_normal(face_idx) {
                let anchor = mesh.vertices[face[0] as usize].position;
                let plane = Quadric::from_point_and_normal(&anchor, normal);
                for &v in face {
                    quadrics[v as usize].accumulate(&plane);
                }
            }
        }

        let mut boundary = vec![false; vertex_count];
        for (&(a, b), &count) in &edge_faces {
            if count == 1 {
                boundary[a as usize] = true;
                boundary[b as usize] = true;
            }
        }

        Self {
            vertices: mesh.vertices.clone(),
            alive: vec![true; vertex_count],
            stamp: vec![0; vertex_count],
            quadrics,
            boundary,
            faces: mesh.faces.clone(),
            face_alive: vec![true; mesh.faces.len()],
            incident,
            live_faces: mesh.faces.len(),
        }
    }

    /// Build the initial heap, one candidate per unique edge.
    fn seed_candidates(&self) -> BinaryHeap<Candidate> {
        let mut heap = BinaryHeap::new();
        let mut seen: HashSet<(u32, u32)> = HashSet::new();
        for face in &self.faces {
            for i in 0..3 {
                let edge = ordered(face[i], face[(i + 1) % 3]);
                if seen.insert(edge) {
                    if let Some(cand) = self.candidate(edge.0, edge.1) {
                        heap.push(cand);
                    }
                }
            }
        }
        heap
    }

    fn candidate(&self, v1: u32, v2: u32) -> Option<Candidate> {
        if v1 == v2 || !self.alive[v1 as usize] || !self.alive[v2 as usize] {
            return None;
        }
        let combined = self.quadrics[v1 as usize].combined(&self.quadrics[v2 as usize]);
        let p1 = self.vertices[v1 as usize].position;
        let p2 = self.vertices[v2 as usize].position;
        let target = combined
            .minimiser()
            .unwrap_or_else(|| nalgebra::center(&p1, &p2));
        Some(Candidate {
            cost: combined.error_at(&target),
            v1,
            v2,
            stamp1: self.stamp[v1 as usize],
            stamp2: self.stamp[v2 as usize],
            target,
        })
    }

    fn is_current(&self, cand: &Candidate) -> bool {
        self.alive[cand.v1 as usize]
            && self.alive[cand.v2 as usize]
            && self.stamp[cand.v1 as usize] == cand.stamp1
            && self.stamp[cand.v2 as usize] == cand.stamp2
    }

    /// Live vertices sharing a face with `v`.
    fn neighbours(&self, v: u32) -> HashSet<u32> {
        let mut out = HashSet::new();
        for &face_idx in &self.incident[v as usize] {
            if !self.face_alive[face_idx as usize] {
                continue;
            }
            for &other in &self.faces[face_idx as usize] {
                if other != v && self.alive[other as usize] {
                    out.insert(other);
                }
            }
        }
        out
    }

    /// The collapse keeps the surface manifold only if the endpoints share at
    /// most two neighbours (the apexes of the triangles on the edge).
    fn link_condition_holds(&self, v1: u32, v2: u32) -> bool {
        let n1 = self.neighbours(v1);
        let n2 = self.neighbours(v2);
        n1.intersection(&n2).count() <= 2
    }

    /// Merge `v2` into `v1`, moving `v1` to `target`.
    fn collapse(&mut self, v1: u32, v2: u32, target: &Point3<f64>) {
        self.vertices[v1 as usize].position = *target;

        let q2 = self.quadrics[v2 as usize];
        self.quadrics[v1 as usize].accumulate(&q2);
        if self.boundary[v2 as usize] {
            self.boundary[v1 as usize] = true;
        }

        self.alive[v2 as usize] = false;
        self.stamp[v1 as usize] += 1;

        let moved = std::mem::take(&mut self.incident[v2 as usize]);
        for face_idx in moved {
            if !self.face_alive[face_idx as usize] {
                continue;
            }
            let face = &mut self.faces[face_idx as usize];
            for idx in face.iter_mut() {
                if *idx == v2 {
                    *idx = v1;
                }
            }
            if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
                self.face_alive[face_idx as usize] = false;
                self.live_faces -= 1;
            } else {
                self.incident[v1 as usize].push(face_idx);
            }
        }
    }

    /// Compact live vertices and faces into a fresh mesh.
    fn into_mesh(self) -> IndexedMesh {
        let mut remap: Vec<Option<u32>> = vec![None; self.vertices.len()];
        let mut vertices = Vec::with_capacity(self.alive.iter().filter(|&&a| a).count());
        for (idx, vertex) in self.vertices.into_iter().enumerate() {
            if self.alive[idx] {
                remap[idx] = Some(vertices.len() as u32);
                vertices.push(vertex);
            }
        }

        let mut faces = Vec::with_capacity(self.live_faces);
        for (idx, face) in self.faces.iter().enumerate() {
            if !self.face_alive[idx] {
                continue;
            }
            if let (Some(a), Some(b), Some(c)) = (
                remap[face[0] as usize],
                remap[face[1] as usize],
                remap[face[2] as usize],
            ) {
                faces.push([a, b, c]);
            }
        }

        IndexedMesh { vertices, faces }
    }
}

const fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::unit_cube;

    /// Closed sphere-like mesh with poles and `rings - 1` latitude bands.
    fn uv_sphere(rings: usize, segments: usize) -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 1.0)));
        for ring in 1..rings {
            let phi = std::f64::consts::PI * ring as f64 / rings as f64;
            for seg in 0..segments {
                let theta = std::f64::consts::TAU * seg as f64 / segments as f64;
                mesh.vertices.push(Vertex::new(Point3::new(
                    phi.sin() * theta.cos(),
                    phi.sin() * theta.sin(),
                    phi.cos(),
                )));
            }
        }
        mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, -1.0)));
        let south = (mesh.vertices.len() - 1) as u32;

        let ring_start = |ring: usize| 1 + (ring - 1) * segments;
        for seg in 0..segments {
            let a = (ring_start(1) + seg) as u32;
            let b = (ring_start(1) + (seg + 1) % segments) as u32;
            mesh.faces.push([0, a, b]);
        }
        for ring in 1..rings - 1 {
            for seg in 0..segments {
                let a = (ring_start(ring) + seg) as u32;
                let b = (ring_start(ring) + (seg + 1) % segments) as u32;
                let c = (ring_start(ring + 1) + seg) as u32;
                let d = (ring_start(ring + 1) + (seg + 1) % segments) as u32;
                mesh.faces.push([a, c, d]);
                mesh.faces.push([a, d, b]);
            }
        }
        for seg in 0..segments {
            let a = (ring_start(rings - 1) + seg) as u32;
            let b = (ring_start(rings - 1) + (seg + 1) % segments) as u32;
            mesh.faces.push([a, south, b]);
        }
        mesh
    }

    /// Flat grid of `n x n` cells in the xy plane, open boundary.
    fn grid_plane(n: usize) -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        for y in 0..=n {
            for x in 0..=n {
                mesh.vertices
                    .push(Vertex::new(Point3::new(x as f64, y as f64, 0.0)));
            }
        }
        let at = |x: usize, y: usize| (y * (n + 1) + x) as u32;
        for y in 0..n {
            for x in 0..n {
                mesh.faces.push([at(x, y), at(x + 1, y), at(x + 1, y + 1)]);
                mesh.faces.push([at(x, y), at(x + 1, y + 1), at(x, y + 1)]);
            }
        }
        mesh
    }

    #[test]
    fn empty_mesh_is_an_error() {
        let result = decimate_mesh(&IndexedMesh::new(), &DecimateParams::default());
        assert!(matches!(result, Err(DecimateError::EmptyMesh)));
    }

    #[test]
    fn zero_target_is_an_error() {
        let result = decimate_mesh(&unit_cube(), &DecimateParams::to_face_count(0));
        assert!(matches!(result, Err(DecimateError::ZeroTarget)));
    }

    #[test]
    fn mesh_at_target_passes_through() {
        let cube = unit_cube();
        let result = decimate_mesh(&cube, &DecimateParams::to_face_count(12)).unwrap();
        assert_eq!(result.output_faces, 12);
        assert_eq!(result.collapses_applied, 0);
        assert!(!result.changed());
    }

    #[test]
    fn sphere_reduces_substantially() {
        let sphere = uv_sphere(8, 12);
        let input = sphere.faces.len();
        let result = decimate_mesh(&sphere, &DecimateParams::to_face_count(40)).unwrap();

        assert_eq!(result.input_faces, input);
        assert!(result.changed());
        assert!(result.output_faces < input / 2);
        // Simplified sphere keeps roughly unit radius.
        for v in &result.mesh.vertices {
            let r = v.position.coords.norm();
            assert!(r > 0.3 && r < 1.5, "vertex drifted to radius {r}");
        }
    }

    #[test]
    fn output_indices_stay_in_range() {
        let sphere = uv_sphere(6, 10);
        let result = decimate_mesh(&sphere, &DecimateParams::to_face_count(30)).unwrap();
        let n = result.mesh.vertices.len() as u32;
        for face in &result.mesh.faces {
            assert!(face.iter().all(|&v| v < n));
            assert!(face[0] != face[1] && face[1] != face[2] && face[0] != face[2]);
        }
    }

    #[test]
    fn boundary_lock_preserves_plane_extent() {
        let plane = grid_plane(6);
        let before = plane.bounds();
        let result = decimate_mesh(&plane, &DecimateParams::to_face_count(20)).unwrap();
        let after = result.mesh.bounds();

        assert_relative_eq!(before.min.coords, after.min.coords, epsilon = 1e-9);
        assert_relative_eq!(before.max.coords, after.max.coords, epsilon = 1e-9);
    }

    #[test]
    fn max_error_limits_collapses() {
        let sphere = uv_sphere(8, 12);
        let strict = DecimateParams::to_face_count(40).with_max_error(1e-12);
        let result = decimate_mesh(&sphere, &strict).unwrap();
        // A curved surface has no zero-cost collapse, so nothing much happens.
        assert!(result.output_faces > 40);
        assert!(result.collapses_rejected > 0);
    }
}
