//! Indexed triangle meshes.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, Vertex};

/// A triangle mesh with indexed faces.
///
/// Vertices are stored once and referenced by `u32` index from each
/// face. Faces wind counter-clockwise when viewed from outside the
/// surface.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Mesh vertices.
    pub vertices: Vec<Vertex>,
    /// Triangle faces as vertex index triples.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create an empty mesh with reserved capacity.
    #[must_use]
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Create a mesh from existing vertex and face lists.
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Axis-aligned bounding box over all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| v.position))
    }

    /// Mean vertex position.
    ///
    /// Returns the origin for an empty mesh.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.position.coords);
        #[allow(clippy::cast_precision_loss)]
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Largest absolute coordinate over all vertices, on any axis.
    #[must_use]
    pub fn max_abs_coordinate(&self) -> f64 {
        self.vertices.iter().fold(0.0, |m, v| {
            m.max(v.position.x.abs())
                .max(v.position.y.abs())
                .max(v.position.z.abs())
        })
    }

    /// Translate all vertices by an offset. Normals are unaffected.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for v in &mut self.vertices {
            v.position += offset;
        }
    }

    /// Uniformly scale all vertex positions about the origin.
    ///
    /// Normals are direction-only and unchanged by uniform scaling.
    pub fn scale_uniform(&mut self, factor: f64) {
        for v in &mut self.vertices {
            v.position.coords *= factor;
        }
    }

    /// Unit normal of a face, or `None` for out-of-range indices and
    /// degenerate faces.
    #[must_use]
    pub fn face_normal(&self, face_index: usize) -> Option<Vector3<f64>> {
        let &[a, b, c] = self.faces.get(face_index)?;
        let pa = self.vertices.get(a as usize)?.position;
        let pb = self.vertices.get(b as usize)?.position;
        let pc = self.vertices.get(c as usize)?.position;
        let n = (pb - pa).cross(&(pc - pa));
        let len = n.norm();
        if len > f64::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }

    /// Area of a face; 0.0 for out-of-range indices.
    #[must_use]
    pub fn face_area(&self, face_index: usize) -> f64 {
        let Some(&[a, b, c]) = self.faces.get(face_index) else {
            return 0.0;
        };
        let pa = self.vertices[a as usize].position;
        let pb = self.vertices[b as usize].position;
        let pc = self.vertices[c as usize].position;
        (pb - pa).cross(&(pc - pa)).norm() * 0.5
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        (0..self.faces.len()).map(|i| self.face_area(i)).sum()
    }

    /// Signed enclosed volume by the divergence theorem.
    ///
    /// Positive for a closed surface with outward-facing (CCW) winding;
    /// meaningless for meshes with boundary edges.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;
        for &[a, b, c] in &self.faces {
            let pa = self.vertices[a as usize].position.coords;
            let pb = self.vertices[b as usize].position.coords;
            let pc = self.vertices[c as usize].position.coords;
            volume += pa.dot(&pb.cross(&pc));
        }
        volume / 6.0
    }

    /// Reverse the winding of every face and negate all vertex normals.
    pub fn flip_winding(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
        for v in &mut self.vertices {
            if let Some(n) = v.normal.as_mut() {
                *n = -*n;
            }
        }
    }
}

/// A unit cube spanning `[0, 1]` on each axis, wound outward.
///
/// Test helper used throughout the workspace.
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let positions = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    let faces: [[u32; 3]; 12] = [
        // bottom (z = 0, viewed from below)
        [0, 2, 1],
        [0, 3, 2],
        // top (z = 1)
        [4, 5, 6],
        [4, 6, 7],
        // front (y = 0)
        [0, 1, 5],
        [0, 5, 4],
        // right (x = 1)
        [1, 2, 6],
        [1, 6, 5],
        // back (y = 1)
        [2, 3, 7],
        [2, 7, 6],
        // left (x = 0)
        [3, 0, 4],
        [3, 4, 7],
    ];
    IndexedMesh::from_parts(
        positions.iter().map(|&p| Vertex::from(p)).collect(),
        faces.to_vec(),
    )
}
