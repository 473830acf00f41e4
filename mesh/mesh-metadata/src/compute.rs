//! Measuring a finished mesh.

use mesh_sanitize::EdgeAdjacency;
use mesh_types::IndexedMesh;
use tracing::debug;
use volume_types::Spacing;

use crate::record::{BoundsMm, MeshMetadata};

/// Measure `mesh` and assemble its metadata record.
///
/// Watertightness is decided from edge-to-face adjacency (every edge shared
/// by exactly two faces). Volume uses the signed-tetrahedron sum and is only
/// reported for watertight meshes; for anything with boundary or non-manifold
/// edges it stays `None`.
#[must_use]
pub fn compute_metadata(mesh: &IndexedMesh, spacing: &Spacing) -> MeshMetadata {
    let bounds = mesh.bounds();
    let (bounds_mm, size_mm) = if bounds.is_empty() {
        (
            BoundsMm {
                min: [0.0; 3],
                max: [0.0; 3],
            },
            [0.0; 3],
        )
    } else {
        let size = bounds.size();
        (
            BoundsMm {
                min: bounds.min.coords.into(),
                max: bounds.max.coords.into(),
            },
            size.into(),
        )
    };

    let adjacency = EdgeAdjacency::build(&mesh.faces);
    let is_watertight = adjacency.is_watertight();
    let volume_mm3 = is_watertight.then(|| mesh.signed_volume().abs());
    let volume_ml = volume_mm3.map(|v| v / 1000.0);

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        is_watertight,
        "computed mesh metadata"
    );

    MeshMetadata {
        spacing_mm: [spacing.x, spacing.y, spacing.z],
        bounds_mm,
        size_mm,
        center_mm: mesh.centroid().coords.into(),
        volume_mm3,
        volume_ml,
        num_vertices: mesh.vertex_count(),
        num_faces: mesh.face_count(),
        is_watertight,
        source_file: None,
        organ_type: None,
        threshold: None,
        original_shape: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::unit_cube;

    #[test]
    fn unit_cube_measures_out() {
        let meta = compute_metadata(&unit_cube(), &Spacing::uniform(1.0));

        assert!(meta.is_watertight);
        assert_relative_eq!(meta.volume_mm3.unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(meta.volume_ml.unwrap(), 0.001, epsilon = 1e-15);
        assert_eq!(meta.num_vertices, 8);
        assert_eq!(meta.num_faces, 12);
        assert_eq!(meta.size_mm, [1.0, 1.0, 1.0]);
        assert_eq!(meta.center_mm, [0.5, 0.5, 0.5]);
        assert_eq!(meta.bounds_mm.min, [0.0, 0.0, 0.0]);
        assert_eq!(meta.bounds_mm.max, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn open_mesh_reports_no_volume() {
        let mut cube = unit_cube();
        cube.faces.pop();
        let meta = compute_metadata(&cube, &Spacing::uniform(1.0));

        assert!(!meta.is_watertight);
        assert!(meta.volume_mm3.is_none());
        assert!(meta.volume_ml.is_none());
        assert_eq!(meta.num_faces, 11);
    }

    #[test]
    fn empty_mesh_measures_zero() {
        let meta = compute_metadata(&IndexedMesh::new(), &Spacing::uniform(0.5));
        assert_eq!(meta.num_vertices, 0);
        assert_eq!(meta.size_mm, [0.0; 3]);
        assert!(!meta.is_watertight);
        assert!(meta.volume_mm3.is_none());
        assert_eq!(meta.spacing_mm, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn spacing_is_carried_per_axis() {
        let spacing = Spacing::new(0.7, 0.7, 2.5);
        let meta = compute_metadata(&unit_cube(), &spacing);
        assert_eq!(meta.spacing_mm, [0.7, 0.7, 2.5]);
    }

    #[test]
    fn inconsistent_winding_reports_no_volume() {
        let mut cube = unit_cube();
        let [a, b, c] = cube.faces[0];
        cube.faces[0] = [a, c, b];
        let meta = compute_metadata(&cube, &Spacing::uniform(1.0));

        // Closed but mis-oriented: the signed volume would be garbage.
        assert!(!meta.is_watertight);
        assert!(meta.volume_mm3.is_none());
    }

    #[test]
    fn inverted_winding_still_yields_positive_volume() {
        let mut cube = unit_cube();
        cube.flip_winding();
        let meta = compute_metadata(&cube, &Spacing::uniform(1.0));
        assert_relative_eq!(meta.volume_mm3.unwrap(), 1.0, epsilon = 1e-12);
    }
}
