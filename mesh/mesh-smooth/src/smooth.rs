//! The smoothing passes.
//!
//! All passes move vertices only; faces and vertex normals are untouched.
//! Callers recompute normals afterwards (the refinement pipeline does this in
//! its final sanitize step). Boundary vertices never move.

// Neighbour counts are small, the f64 conversions are exact.
#![allow(clippy::cast_precision_loss)]

use mesh_types::{IndexedMesh, Point3, Vector3};
use tracing::debug;

use crate::neighbours::VertexNeighbours;
use crate::params::{HumphreyParams, LaplacianParams, TaubinParams};

/// Plain Laplacian relaxation.
pub fn smooth_laplacian(mesh: &mut IndexedMesh, params: &LaplacianParams) {
    if mesh.vertices.is_empty() || params.iterations == 0 {
        return;
    }
    let nb = VertexNeighbours::build(mesh);
    let mut positions = extract_positions(mesh);
    for _ in 0..params.iterations {
        relax(&mut positions, &nb, params.lambda);
    }
    store_positions(mesh, &positions);
    debug!(
        iterations = params.iterations,
        lambda = params.lambda,
        "laplacian smoothing done"
    );
}

/// Taubin lambda-mu relaxation: a shrink step then an inflate step per
/// iteration.
pub fn smooth_taubin(mesh: &mut IndexedMesh, params: &TaubinParams) {
    if mesh.vertices.is_empty() || params.iterations == 0 {
        return;
    }
    let nb = VertexNeighbours::build(mesh);
    let mut positions = extract_positions(mesh);
    for _ in 0..params.iterations {
        relax(&mut positions, &nb, params.lambda);
        relax(&mut positions, &nb, params.mu);
    }
    store_positions(mesh, &positions);
    debug!(
        iterations = params.iterations,
        lambda = params.lambda,
        mu = params.mu,
        "taubin smoothing done"
    );
}

/// Humphrey's classes (HC) relaxation: Laplacian steps with a push-back
/// toward a blend of the original and previous positions, so the surface
/// loses noise without drifting from where it started.
pub fn smooth_humphrey(mesh: &mut IndexedMesh, params: &HumphreyParams) {
    if mesh.vertices.is_empty() || params.iterations == 0 {
        return;
    }
    let nb = VertexNeighbours::build(mesh);
    let mut positions = extract_positions(mesh);
    let original = positions.clone();
    let n = positions.len();

    for _ in 0..params.iterations {
        let previous = positions.clone();

        // Laplacian estimate.
        let mut estimate = previous.clone();
        for i in 0..n {
            if !nb.is_fixed(i) {
                estimate[i] = neighbour_centroid(&previous, nb.of(i));
            }
        }

        // How far the estimate drifted from the anchor blend.
        let drift: Vec<Vector3<f64>> = (0..n)
            .map(|i| {
                let anchor = original[i].coords * params.alpha
                    + previous[i].coords * (1.0 - params.alpha);
                estimate[i].coords - anchor
            })
            .collect();

        for i in 0..n {
            if nb.is_fixed(i) {
                continue;
            }
            let nbs = nb.of(i);
            let mut mean_drift = Vector3::zeros();
            for &j in nbs {
                mean_drift += drift[j as usize];
            }
            mean_drift /= nbs.len() as f64;
            let push_back = drift[i] * params.beta + mean_drift * (1.0 - params.beta);
            positions[i] = estimate[i] - push_back;
        }
    }

    store_positions(mesh, &positions);
    debug!(
        iterations = params.iterations,
        alpha = params.alpha,
        beta = params.beta,
        "humphrey smoothing done"
    );
}

fn extract_positions(mesh: &IndexedMesh) -> Vec<Point3<f64>> {
    mesh.vertices.iter().map(|v| v.position).collect()
}

fn store_positions(mesh: &mut IndexedMesh, positions: &[Point3<f64>]) {
    for (vertex, position) in mesh.vertices.iter_mut().zip(positions) {
        vertex.position = *position;
    }
}

fn neighbour_centroid(positions: &[Point3<f64>], nbs: &[u32]) -> Point3<f64> {
    let mut sum = Vector3::zeros();
    for &n in nbs {
        sum += positions[n as usize].coords;
    }
    Point3::from(sum / nbs.len() as f64)
}

/// One damped pull of every free vertex toward its neighbour centroid.
fn relax(positions: &mut [Point3<f64>], nb: &VertexNeighbours, factor: f64) {
    let snapshot = positions.to_vec();
    for (i, position) in positions.iter_mut().enumerate() {
        if nb.is_fixed(i) {
            continue;
        }
        let centroid = neighbour_centroid(&snapshot, nb.of(i));
        *position += (centroid - *position) * factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{unit_cube, Vertex};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Grid in the xy plane with seeded z noise on interior vertices only.
    fn noisy_grid(n: usize, amplitude: f64, seed: u64) -> IndexedMesh {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mesh = IndexedMesh::new();
        for y in 0..=n {
            for x in 0..=n {
                let interior = x > 0 && x < n && y > 0 && y < n;
                let z = if interior {
                    rng.gen_range(-amplitude..amplitude)
                } else {
                    0.0
                };
                mesh.vertices
                    .push(Vertex::from_coords(x as f64, y as f64, z));
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

    fn z_rms(mesh: &IndexedMesh) -> f64 {
        let sum: f64 = mesh.vertices.iter().map(|v| v.position.z.powi(2)).sum();
        (sum / mesh.vertices.len() as f64).sqrt()
    }

    fn displacement(a: &IndexedMesh, b: &IndexedMesh) -> f64 {
        a.vertices
            .iter()
            .zip(&b.vertices)
            .map(|(va, vb)| (va.position - vb.position).norm())
            .sum::<f64>()
            / a.vertices.len() as f64
    }

    #[test]
    fn laplacian_flattens_interior_noise() {
        let mut mesh = noisy_grid(8, 0.2, 42);
        let before = z_rms(&mesh);
        smooth_laplacian(&mut mesh, &LaplacianParams::default());
        let after = z_rms(&mesh);
        assert!(after < before * 0.3, "rms {before} -> {after}");
    }

    #[test]
    fn boundary_vertices_do_not_move() {
        let mut mesh = noisy_grid(6, 0.2, 7);
        let corner_before = mesh.vertices[0].position;
        smooth_laplacian(&mut mesh, &LaplacianParams::new(20, 0.7));
        assert_eq!(mesh.vertices[0].position, corner_before);
        assert_eq!(mesh.vertices[0].position.z, 0.0);
    }

    #[test]
    fn laplacian_shrinks_a_closed_surface() {
        let mut mesh = unit_cube();
        let before = mesh.surface_area();
        smooth_laplacian(&mut mesh, &LaplacianParams::default());
        assert!(mesh.surface_area() < before);
    }

    #[test]
    fn taubin_shrinks_less_than_laplacian() {
        let mut lap = unit_cube();
        let mut taubin = unit_cube();
        smooth_laplacian(&mut lap, &LaplacianParams::default());
        smooth_taubin(&mut taubin, &TaubinParams::with_iterations(10));
        assert!(taubin.surface_area() > lap.surface_area());
    }

    #[test]
    fn taubin_still_removes_noise() {
        let mut mesh = noisy_grid(8, 0.2, 13);
        let before = z_rms(&mesh);
        smooth_taubin(&mut mesh, &TaubinParams::with_iterations(20));
        assert!(z_rms(&mesh) < before);
    }

    #[test]
    fn humphrey_stays_closer_to_input_than_laplacian() {
        let input = noisy_grid(8, 0.2, 99);

        let mut lap = input.clone();
        smooth_laplacian(&mut lap, &LaplacianParams::new(10, 0.5));

        let mut hc = input.clone();
        smooth_humphrey(&mut hc, &HumphreyParams::with_iterations(10));

        assert!(displacement(&hc, &input) < displacement(&lap, &input));
        // And it still flattens noise.
        assert!(z_rms(&hc) < z_rms(&input));
    }

    #[test]
    fn empty_mesh_is_a_no_op() {
        let mut mesh = IndexedMesh::new();
        smooth_laplacian(&mut mesh, &LaplacianParams::default());
        smooth_taubin(&mut mesh, &TaubinParams::default());
        smooth_humphrey(&mut mesh, &HumphreyParams::default());
        assert!(mesh.is_empty());
    }
}
