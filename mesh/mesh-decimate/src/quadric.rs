//! Quadric error metric for edge collapse.
//!
//! Each vertex accumulates a quadric summarising the squared distances to the
//! planes of its incident faces. The cost of collapsing an edge is the value of
//! the combined quadric at the merged position.

use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};

/// Determinant below which the quadric's 3x3 block is treated as singular.
const SINGULAR_EPSILON: f64 = 1e-10;

/// Symmetric 4x4 quadric matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quadric {
    matrix: Matrix4<f64>,
}

impl Quadric {
    /// Build the fundamental quadric of the plane `n . x + d = 0`.
    ///
    /// `normal` must be unit length for the error to equal squared distance.
    #[must_use]
    pub fn from_plane(normal: Vector3<f64>, d: f64) -> Self {
        let p = Vector4::new(normal.x, normal.y, normal.z, d);
        Self { matrix: p * p.transpose() }
    }

    /// Quadric of the plane through `point` with the given unit `normal`.
    #[must_use]
    pub fn from_point_and_normal(point: &Point3<f64>, normal: Vector3<f64>) -> Self {
        Self::from_plane(normal, -normal.dot(&point.coords))
    }

    /// Accumulate another quadric into this one.
    pub fn accumulate(&mut self, other: &Self) {
        self.matrix += other.matrix;
    }

    /// Sum of two quadrics.
    #[must_use]
    pub fn combined(&self, other: &Self) -> Self {
        Self { matrix: self.matrix + other.matrix }
    }

    /// Evaluate `v^T Q v` for `v = [x, y, z, 1]`.
    #[must_use]
    pub fn error_at(&self, point: &Point3<f64>) -> f64 {
        let v = Vector4::new(point.x, point.y, point.z, 1.0);
        (v.transpose() * self.matrix * v).x
    }

    /// Position minimising the quadric error, if the system is well conditioned.
    ///
    /// Solves `A x = -b` where `A` is the upper-left 3x3 block and `b` the
    /// fourth column. Returns `None` when `A` is singular, which happens for
    /// flat or underconstrained neighbourhoods; callers fall back to the edge
    /// midpoint in that case.
    #[must_use]
    pub fn minimiser(&self) -> Option<Point3<f64>> {
        let a = Matrix3::new(
            self.matrix[(0, 0)],
            self.matrix[(0, 1)],
            self.matrix[(0, 2)],
            self.matrix[(1, 0)],
            self.matrix[(1, 1)],
            self.matrix[(1, 2)],
            self.matrix[(2, 0)],
            self.matrix[(2, 1)],
            self.matrix[(2, 2)],
        );
        if a.determinant().abs() < SINGULAR_EPSILON {
            return None;
        }
        let b = Vector3::new(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        );
        let inv = a.try_inverse()?;
        let x = inv * (-b);
        Some(Point3::from(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quadric_has_zero_error_everywhere() {
        let q = Quadric::default();
        assert!(q.error_at(&Point3::new(3.0, -2.0, 7.5)).abs() < f64::EPSILON);
    }

    #[test]
    fn plane_quadric_measures_squared_distance() {
        // Plane z = 0.
        let q = Quadric::from_plane(Vector3::z(), 0.0);
        assert!(q.error_at(&Point3::new(4.0, -1.0, 0.0)).abs() < 1e-12);
        assert!((q.error_at(&Point3::new(0.0, 0.0, 2.0)) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn point_and_normal_form_matches_plane_form() {
        let q = Quadric::from_point_and_normal(&Point3::new(0.0, 0.0, 5.0), Vector3::z());
        assert!(q.error_at(&Point3::new(1.0, 2.0, 5.0)).abs() < 1e-12);
        assert!((q.error_at(&Point3::new(0.0, 0.0, 6.0)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn accumulated_quadrics_share_their_intersection() {
        let mut q = Quadric::from_plane(Vector3::x(), 0.0);
        q.accumulate(&Quadric::from_plane(Vector3::y(), 0.0));
        assert!(q.error_at(&Point3::origin()).abs() < 1e-12);
        assert!(q.error_at(&Point3::new(1.0, 1.0, 0.0)) > 1.0);
    }

    #[test]
    fn minimiser_finds_corner_of_three_planes() {
        let mut q = Quadric::from_plane(Vector3::x(), -1.0);
        q.accumulate(&Quadric::from_plane(Vector3::y(), -2.0));
        q.accumulate(&Quadric::from_plane(Vector3::z(), -3.0));

        let p = q.minimiser().unwrap();
        assert!((p.x - 1.0).abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
        assert!((p.z - 3.0).abs() < 1e-9);
    }

    #[test]
    fn single_plane_is_singular() {
        let q = Quadric::from_plane(Vector3::z(), 0.0);
        assert!(q.minimiser().is_none());
    }
}
