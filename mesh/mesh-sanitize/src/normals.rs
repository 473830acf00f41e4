//! Winding consistency and vertex normal recomputation.

use std::collections::VecDeque;

use nalgebra::Vector3;
use tracing::debug;

use mesh_types::IndexedMesh;

use crate::adjacency::EdgeAdjacency;

/// Make all faces wind consistently and face outward.
///
/// Consistency is established per connected component by flood fill: two
/// faces sharing an edge must traverse it in opposite directions. After
/// that, if the mesh is watertight and its signed volume is negative, the
/// whole mesh is inside-out and every face is flipped.
///
/// Non-manifold edges (more than two incident faces) are not traversed;
/// the faces on either side keep whatever orientation their own component
/// settled on.
///
/// Returns the number of faces flipped. Vertex normals are not touched;
/// call [`recompute_vertex_normals`] afterwards.
pub fn orient_faces_consistently(mesh: &mut IndexedMesh) -> usize {
    if mesh.faces.is_empty() {
        return 0;
    }

    let adjacency = EdgeAdjacency::build(&mesh.faces);
    let mut flipped = vec![false; mesh.faces.len()];
    let mut visited = vec![false; mesh.faces.len()];
    let mut queue = VecDeque::new();
    let mut flip_count = 0usize;

    for seed in 0..mesh.faces.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        queue.push_back(seed);

        while let Some(face_idx) = queue.pop_front() {
            let face = oriented_face(&mesh.faces, &flipped, face_idx);
            for (a, b) in directed_edges(face) {
                let Some(incident) = adjacency.faces_for_edge(a, b) else {
                    continue;
                };
                // Skip non-manifold fans; orientation is ambiguous there.
                if incident.len() != 2 {
                    continue;
                }
                for &other in incident {
                    let other = other as usize;
                    if other == face_idx || visited[other] {
                        continue;
                    }
                    visited[other] = true;
                    // Consistent neighbors traverse the shared edge in the
                    // opposite direction.
                    let other_face = oriented_face(&mesh.faces, &flipped, other);
                    let same_direction = directed_edges(other_face)
                        .into_iter()
                        .any(|(x, y)| x == a && y == b);
                    if same_direction {
                        flipped[other] = true;
                        flip_count += 1;
                    }
                    queue.push_back(other);
                }
            }
        }
    }

    for (face, flip) in mesh.faces.iter_mut().zip(&flipped) {
        if *flip {
            face.swap(1, 2);
        }
    }

    // Globally outward: a watertight mesh wound inward has negative
    // signed volume. Rebuild adjacency since the flips above changed
    // edge directions.
    if EdgeAdjacency::build(&mesh.faces).is_watertight() && mesh.signed_volume() < 0.0 {
        for face in &mut mesh.faces {
            face.swap(1, 2);
        }
        flip_count += mesh.faces.len();
        debug!("mesh was inside-out, flipped all faces");
    }

    flip_count
}

/// Recompute per-vertex normals as the normalized sum of incident face
/// cross products (area weighting falls out of the unnormalized cross
/// product).
///
/// Vertices referenced by no face, or whose incident faces cancel out,
/// get no normal.
pub fn recompute_vertex_normals(mesh: &mut IndexedMesh) {
    let mut accumulated: Vec<Vector3<f64>> = vec![Vector3::zeros(); mesh.vertices.len()];

    for &[a, b, c] in &mesh.faces {
        let pa = mesh.vertices[a as usize].position;
        let pb = mesh.vertices[b as usize].position;
        let pc = mesh.vertices[c as usize].position;
        let cross = (pb - pa).cross(&(pc - pa));
        accumulated[a as usize] += cross;
        accumulated[b as usize] += cross;
        accumulated[c as usize] += cross;
    }

    for (vertex, acc) in mesh.vertices.iter_mut().zip(&accumulated) {
        let len = acc.norm();
        vertex.normal = if len > f64::EPSILON {
            Some(acc / len)
        } else {
            None
        };
    }
}

#[inline]
fn oriented_face(faces: &[[u32; 3]], flipped: &[bool], idx: usize) -> [u32; 3] {
    let [a, b, c] = faces[idx];
    if flipped[idx] { [a, c, b] } else { [a, b, c] }
}

#[inline]
fn directed_edges([a, b, c]: [u32; 3]) -> [(u32, u32); 3] {
    [(a, b), (b, c), (c, a)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::unit_cube;

    #[test]
    fn consistent_mesh_is_untouched() {
        let mut cube = unit_cube();
        let before = cube.faces.clone();
        let flips = orient_faces_consistently(&mut cube);
        assert_eq!(flips, 0);
        assert_eq!(cube.faces, before);
    }

    #[test]
    fn single_reversed_face_is_fixed() {
        let mut cube = unit_cube();
        cube.faces[5].swap(1, 2);
        let flips = orient_faces_consistently(&mut cube);
        assert!(flips >= 1);
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn reversed_seed_face_still_yields_outward_mesh() {
        // The fill propagates the first face's winding, so reversing it
        // orients the whole cube inward before the global flip runs.
        let mut cube = unit_cube();
        cube.faces[0].swap(1, 2);
        orient_faces_consistently(&mut cube);
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn inside_out_mesh_is_flipped_outward() {
        let mut cube = unit_cube();
        for face in &mut cube.faces {
            face.swap(1, 2);
        }
        orient_faces_consistently(&mut cube);
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn recomputed_normals_are_unit_and_outward() {
        let mut cube = unit_cube();
        recompute_vertex_normals(&mut cube);
        let center = cube.centroid();
        for v in &cube.vertices {
            let n = v.normal.unwrap();
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
            assert!(n.dot(&(v.position - center)) > 0.0);
        }
    }

    #[test]
    fn unreferenced_vertex_gets_no_normal() {
        let mut cube = unit_cube();
        cube.vertices.push(mesh_types::Vertex::from_coords(9.0, 9.0, 9.0));
        recompute_vertex_normals(&mut cube);
        assert!(cube.vertices.last().unwrap().normal.is_none());
    }

    #[test]
    fn orientation_is_idempotent() {
        let mut cube = unit_cube();
        cube.faces[3].swap(1, 2);
        orient_faces_consistently(&mut cube);
        let after_first = cube.faces.clone();
        let flips = orient_faces_consistently(&mut cube);
        assert_eq!(flips, 0);
        assert_eq!(cube.faces, after_first);
    }
}
