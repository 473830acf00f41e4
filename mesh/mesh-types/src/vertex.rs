//! Mesh vertices.

use nalgebra::{Point3, Vector3};

/// A mesh vertex: a position in millimeters plus an optional unit
/// normal.
///
/// Normals are optional because freshly constructed geometry often has
/// none; sanitization and refinement recompute them from face geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in 3D space (mm).
    pub position: Point3<f64>,
    /// Unit normal, if known.
    pub normal: Option<Vector3<f64>>,
}

impl Vertex {
    /// Create a vertex at a position with no normal.
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: None,
        }
    }

    /// Create a vertex from raw coordinates.
    #[must_use]
    pub const fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Create a vertex with a normal.
    #[must_use]
    pub const fn with_normal(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            position,
            normal: Some(normal),
        }
    }

    /// This vertex with its normal replaced.
    #[must_use]
    pub const fn normal_set(mut self, normal: Vector3<f64>) -> Self {
        self.normal = Some(normal);
        self
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}
