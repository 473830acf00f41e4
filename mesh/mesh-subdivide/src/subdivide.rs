//! Midpoint subdivision.
//!
//! Each triangle splits into four by inserting one vertex per edge. The edge
//! midpoint cache is keyed on the sorted vertex pair, so neighbouring faces
//! share their midpoints and a watertight input stays watertight.

// Vertex indices fit in u32 for any mesh this pipeline produces.
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Vertex};
use nalgebra::center;
use tracing::debug;

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::SubdivideParams;
use crate::result::SubdivideSummary;

/// Subdivide a mesh by `params.levels` levels of midpoint splitting.
///
/// Zero levels returns the mesh unchanged. Positions are untouched; new
/// vertices land exactly on the old edges, so the surface geometry is
/// preserved while the face count quadruples per level.
///
/// # Errors
///
/// [`SubdivideError::EmptyMesh`] when the mesh has no faces and
/// [`SubdivideError::TooManyFaces`] when the projected face count exceeds
/// `params.max_faces`.
///
/// # Examples
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_subdivide::{subdivide_mesh, SubdivideParams};
///
/// let summary = subdivide_mesh(&unit_cube(), &SubdivideParams::with_levels(1))?;
/// assert_eq!(summary.output_faces, 48);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_mesh(
    mesh: &IndexedMesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivideSummary> {
    if mesh.faces.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }

    let input_faces = mesh.faces.len();
    let projected = params.projected_faces(input_faces);
    if projected > params.max_faces {
        return Err(SubdivideError::TooManyFaces {
            input: input_faces,
            projected,
            limit: params.max_faces,
        });
    }

    let mut current = mesh.clone();
    let mut midpoints_created = 0;
    for level in 0..params.levels {
        let (next, midpoints) = split_once(&current);
        midpoints_created += midpoints;
        debug!(
            level = level + 1,
            faces = next.faces.len(),
            vertices = next.vertices.len(),
            "subdivision level applied"
        );
        current = next;
    }

    let output_faces = current.faces.len();
    Ok(SubdivideSummary {
        mesh: current,
        input_faces,
        output_faces,
        midpoints_created,
        levels: params.levels,
    })
}

/// One level of midpoint splitting. Returns the new mesh and the number of
/// midpoint vertices inserted.
fn split_once(mesh: &IndexedMesh) -> (IndexedMesh, usize) {
    let mut vertices = mesh.vertices.clone();
    let mut faces = Vec::with_capacity(mesh.faces.len() * 4);
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();

    for face in &mesh.faces {
        let [v0, v1, v2] = *face;
        let m01 = midpoint_index(v0, v1, &mesh.vertices, &mut vertices, &mut midpoints);
        let m12 = midpoint_index(v1, v2, &mesh.vertices, &mut vertices, &mut midpoints);
        let m20 = midpoint_index(v2, v0, &mesh.vertices, &mut vertices, &mut midpoints);

        faces.push([v0, m01, m20]);
        faces.push([v1, m12, m01]);
        faces.push([v2, m20, m12]);
        faces.push([m01, m12, m20]);
    }

    let created = midpoints.len();
    (IndexedMesh { vertices, faces }, created)
}

/// Look up or insert the midpoint vertex of edge `(a, b)`.
fn midpoint_index(
    a: u32,
    b: u32,
    source: &[Vertex],
    vertices: &mut Vec<Vertex>,
    midpoints: &mut HashMap<(u32, u32), u32>,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&idx) = midpoints.get(&key) {
        return idx;
    }

    let va = &source[a as usize];
    let vb = &source[b as usize];
    let mut vertex = Vertex::new(center(&va.position, &vb.position));
    if let (Some(na), Some(nb)) = (va.normal, vb.normal) {
        vertex.normal = (na + nb).try_normalize(1e-12);
    }

    let idx = vertices.len() as u32;
    vertices.push(vertex);
    midpoints.insert(key, idx);
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::unit_cube;

    #[test]
    fn empty_mesh_is_an_error() {
        let result = subdivide_mesh(&IndexedMesh::new(), &SubdivideParams::default());
        assert!(matches!(result, Err(SubdivideError::EmptyMesh)));
    }

    #[test]
    fn face_ceiling_is_enforced() {
        let cube = unit_cube();
        let params = SubdivideParams::with_levels(3).with_max_faces(100);
        let result = subdivide_mesh(&cube, &params);
        assert!(matches!(
            result,
            Err(SubdivideError::TooManyFaces { projected: 768, .. })
        ));
    }

    #[test]
    fn zero_levels_passes_through() {
        let cube = unit_cube();
        let summary = subdivide_mesh(&cube, &SubdivideParams::with_levels(0)).unwrap();
        assert_eq!(summary.output_faces, 12);
        assert_eq!(summary.midpoints_created, 0);
    }

    #[test]
    fn one_level_quadruples_faces_and_shares_midpoints() {
        let cube = unit_cube();
        let summary = subdivide_mesh(&cube, &SubdivideParams::with_levels(1)).unwrap();

        assert_eq!(summary.output_faces, 48);
        // A cube triangulation has 18 edges, one midpoint each.
        assert_eq!(summary.midpoints_created, 18);
        assert_eq!(summary.mesh.vertices.len(), 8 + 18);
    }

    #[test]
    fn geometry_is_preserved() {
        let cube = unit_cube();
        let summary = subdivide_mesh(&cube, &SubdivideParams::with_levels(2)).unwrap();

        assert_relative_eq!(
            summary.mesh.surface_area(),
            cube.surface_area(),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            summary.mesh.signed_volume(),
            cube.signed_volume(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn midpoint_normals_interpolate() {
        let mut mesh = IndexedMesh::new();
        let up = mesh_types::Vector3::z();
        mesh.vertices
            .push(Vertex::from_coords(0.0, 0.0, 0.0).normal_set(up));
        mesh.vertices
            .push(Vertex::from_coords(1.0, 0.0, 0.0).normal_set(up));
        mesh.vertices
            .push(Vertex::from_coords(0.0, 1.0, 0.0).normal_set(up));
        mesh.faces.push([0, 1, 2]);

        let summary = subdivide_mesh(&mesh, &SubdivideParams::default()).unwrap();
        for v in &summary.mesh.vertices {
            let n = v.normal.unwrap();
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
        }
    }
}
