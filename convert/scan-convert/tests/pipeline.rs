//! End-to-end conversion tests on synthetic volumes.
//!
//! The volumes are small enough to run quickly but large enough to survive
//! the morphological cleanup thresholds of the default mask parameters.

use std::fs;

use approx::assert_relative_eq;

use mesh_metadata::{compute_metadata, MeshMetadata};
use mesh_refine::{refine_mesh, Stage};
use mesh_sanitize::{recompute_vertex_normals, sanitize_mesh, SanitizeParams};
use mesh_smooth::{
    smooth_humphrey, smooth_laplacian, smooth_taubin, HumphreyParams, LaplacianParams,
    TaubinParams,
};
use mesh_subdivide::{subdivide_mesh, SubdivideParams};
use mesh_types::{IndexedMesh, Point3, Vertex};
use scan_convert::{
    convert_offline, convert_on_demand, run_pipeline, ConversionRequest, ConvertError,
    RecordingSink, Selection, SourceInfo,
};
use volume_mask::{build_mask, MaskParams, Selection as MaskSelection};
use volume_surface::{extract_surface, ExtractParams};
use volume_types::{OccupancyMask, ScalarVolume, Spacing};

/// A 16^3 volume holding a 10^3 block of high-intensity samples, centred
/// away from the borders so morphological closing cannot clip it.
fn block_volume() -> ScalarVolume {
    ScalarVolume::from_fn((16, 16, 16), Spacing::uniform(1.0), |x, y, z| {
        let inside = (3..=12).contains(&x) && (3..=12).contains(&y) && (3..=12).contains(&z);
        if inside {
            1000.0
        } else {
            -1000.0
        }
    })
}

/// A 16^3 pre-segmented volume with one labelled block.
fn labelled_volume(label: f64) -> ScalarVolume {
    ScalarVolume::from_fn((16, 16, 16), Spacing::uniform(1.0), |x, y, z| {
        let inside = (4..=11).contains(&x) && (4..=11).contains(&y) && (4..=11).contains(&z);
        if inside {
            label
        } else {
            0.0
        }
    })
}

fn sphere_surface() -> IndexedMesh {
    let mask = OccupancyMask::from_fn((16, 16, 16), |x, y, z| {
        let dx = x as f64 - 8.0;
        let dy = y as f64 - 8.0;
        let dz = z as f64 - 8.0;
        (dx * dx + dy * dy + dz * dz).sqrt() <= 5.0
    });
    let mut mesh = extract_surface(
        &mask,
        Spacing::uniform(1.0),
        &ExtractParams::full_resolution(),
    )
    .unwrap();
    sanitize_mesh(&mut mesh, &SanitizeParams::default());
    mesh
}

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

#[test]
fn threshold_block_measures_true_scale() {
    let volume = block_volume();
    let result = build_mask(
        &volume,
        &MaskSelection::threshold_fixed(0.5),
        &MaskParams::default(),
    )
    .unwrap();
    assert_eq!(result.threshold, Some(0.5));
    assert_eq!(result.occupied_after_cleanup, 1000);

    let mut mesh = extract_surface(
        &result.mask,
        volume.spacing(),
        &ExtractParams::full_resolution(),
    )
    .unwrap();
    sanitize_mesh(&mut mesh, &SanitizeParams::default());

    let metadata = compute_metadata(&mesh, &volume.spacing());
    assert!(metadata.is_watertight);
    for axis in 0..3 {
        assert_relative_eq!(metadata.size_mm[axis], 10.0, epsilon = 1e-9);
    }
    // A 10 mm block with chamfered marching-cubes edges.
    let volume_mm3 = metadata.volume_mm3.unwrap();
    assert!(
        (900.0..=1000.0).contains(&volume_mm3),
        "block volume {volume_mm3} out of range"
    );
}

#[test]
fn solid_cube_mask_is_watertight_at_true_scale() {
    let mask = OccupancyMask::from_fn((10, 10, 10), |_, _, _| true);
    let spacing = Spacing::uniform(1.0);
    let mut mesh = extract_surface(&mask, spacing, &ExtractParams::full_resolution()).unwrap();
    sanitize_mesh(&mut mesh, &SanitizeParams::default());

    let metadata = compute_metadata(&mesh, &spacing);
    assert!(metadata.is_watertight);
    for axis in 0..3 {
        assert_relative_eq!(metadata.size_mm[axis], 9.0, epsilon = 1e-9);
    }
    let volume_mm3 = metadata.volume_mm3.unwrap();
    assert!(
        (729.0..=1000.0).contains(&volume_mm3),
        "cube volume {volume_mm3} out of range"
    );
}

#[test]
fn anisotropic_spacing_scales_the_block() {
    let mask = OccupancyMask::from_fn((12, 12, 12), |x, y, z| {
        (3..=8).contains(&x) && (3..=8).contains(&y) && (3..=8).contains(&z)
    });
    let spacing = Spacing::new(0.5, 1.0, 2.0);
    let mut mesh = extract_surface(&mask, spacing, &ExtractParams::full_resolution()).unwrap();
    sanitize_mesh(&mut mesh, &SanitizeParams::default());

    let metadata = compute_metadata(&mesh, &spacing);
    assert_relative_eq!(metadata.size_mm[0], 6.0 * 0.5, epsilon = 1e-9);
    assert_relative_eq!(metadata.size_mm[1], 6.0 * 1.0, epsilon = 1e-9);
    assert_relative_eq!(metadata.size_mm[2], 6.0 * 2.0, epsilon = 1e-9);
}

#[test]
fn empty_threshold_volume_fails_with_empty_mask() {
    let volume = ScalarVolume::from_fn((8, 8, 8), Spacing::uniform(1.0), |_, _, _| 0.0);
    let request = ConversionRequest::on_demand(Selection::ThresholdAuto);
    let err = run_pipeline(&volume, &request, &SourceInfo::default()).unwrap_err();
    assert!(matches!(err, ConvertError::EmptyMask { .. }));
}

#[test]
fn absent_label_fails_with_empty_mask() {
    let volume = labelled_volume(3.0);
    let request = ConversionRequest::offline(5);
    let err = run_pipeline(&volume, &request, &SourceInfo::default()).unwrap_err();
    assert!(matches!(err, ConvertError::EmptyMask { .. }));
    assert!(err.to_string().contains("label 5"));
}

#[test]
fn aggressive_refinement_bounds_a_large_surface() {
    let mesh = uv_sphere(100, 100);
    assert!(mesh.face_count() > 15_000);

    let request = ConversionRequest::on_demand(Selection::ThresholdAuto);
    let summary = refine_mesh(mesh, &request.refine_params());

    assert!(summary.ran(Stage::PreDecimate));
    assert!(summary.ran(Stage::Subdivide));
    assert!(summary.output_faces >= 1);
    if !summary.has_warnings() {
        assert!(summary.output_faces <= 50_000);
    }
}

#[test]
fn smoothing_cascade_preserves_the_centre() {
    let mut mesh = sphere_surface();
    let before = mesh.centroid();

    smooth_laplacian(&mut mesh, &LaplacianParams::new(20, 0.7));
    smooth_taubin(&mut mesh, &TaubinParams::with_iterations(20));
    smooth_humphrey(&mut mesh, &HumphreyParams::with_iterations(10));

    let after = mesh.centroid();
    // The mask sphere is symmetric, so smoothing shrinks it in place.
    assert!((after - before).norm() < 0.3);

    let subdivided = subdivide_mesh(&mesh, &SubdivideParams::default()).unwrap();
    assert!(subdivided.mesh.vertex_count() > mesh.vertex_count());
    assert_eq!(subdivided.mesh.face_count(), mesh.face_count() * 4);

    let mut final_mesh = subdivided.mesh;
    recompute_vertex_normals(&mut final_mesh);
    for vertex in &final_mesh.vertices {
        let normal = vertex.normal.unwrap();
        assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn offline_conversion_writes_a_paired_artifact() {
    let volume = labelled_volume(7.0);
    let request = ConversionRequest::offline(7);
    let source = SourceInfo::for_file("patient_007.raw").with_shape([16, 16, 16]);

    let dir = tempfile::tempdir().unwrap();
    let mut sink = RecordingSink::default();
    let artifacts = convert_offline(
        &volume,
        &request,
        &source,
        dir.path(),
        "pancreas",
        &mut sink,
    )
    .unwrap();

    assert!(artifacts.mesh_path.exists());
    assert!(artifacts.metadata_path.exists());
    assert_eq!(sink.artifacts, vec![artifacts.mesh_path.clone()]);

    let obj = fs::read_to_string(&artifacts.mesh_path).unwrap();
    assert!(obj.starts_with("v "));
    assert!(obj.contains("\nf "));

    let json = fs::read_to_string(&artifacts.metadata_path).unwrap();
    let metadata: MeshMetadata = serde_json::from_str(&json).unwrap();
    assert_eq!(metadata.organ_type.as_deref(), Some("pancreas"));
    assert_eq!(metadata.source_file.as_deref(), Some("patient_007.raw"));
    assert_eq!(metadata.original_shape, Some([16, 16, 16]));
    assert_eq!(metadata.threshold, None);
    assert!(metadata.is_watertight);
    assert!(metadata.volume_ml.is_some());
}

#[test]
fn offline_conversion_on_empty_volume_writes_nothing() {
    let volume = ScalarVolume::from_fn((8, 8, 8), Spacing::uniform(1.0), |_, _, _| 0.0);
    let request = ConversionRequest::offline(1);
    let dir = tempfile::tempdir().unwrap();
    let mut sink = RecordingSink::default();

    let err = convert_offline(
        &volume,
        &request,
        &SourceInfo::default(),
        dir.path(),
        "liver",
        &mut sink,
    )
    .unwrap_err();

    assert!(matches!(err, ConvertError::EmptyMask { .. }));
    assert!(sink.artifacts.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_output_directory_is_an_artifact_error() {
    let volume = labelled_volume(1.0);
    let request = ConversionRequest::offline(1);
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let mut sink = RecordingSink::default();

    let err = convert_offline(
        &volume,
        &request,
        &SourceInfo::default(),
        &missing,
        "liver",
        &mut sink,
    )
    .unwrap_err();

    assert!(matches!(err, ConvertError::Artifact { .. }));
    assert!(sink.artifacts.is_empty());
}

#[test]
fn on_demand_conversion_returns_obj_text_and_threshold() {
    let volume = block_volume();
    let request = ConversionRequest::on_demand(Selection::ThresholdFixed(0.5));
    let result = convert_on_demand(&volume, &request, &SourceInfo::default()).unwrap();

    assert!(result.obj.starts_with("v "));
    assert_eq!(result.metadata.threshold, Some(0.5));
    assert_eq!(result.metadata.original_shape, Some([16, 16, 16]));
    assert!(result.metadata.num_faces >= 1);
}
