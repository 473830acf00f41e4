//! Edge-to-face adjacency.

use hashbrown::{HashMap, HashSet};

/// Edge-to-face adjacency for a triangle mesh.
///
/// Edges are keyed by their unordered vertex pair. An edge with one
/// incident face is a boundary edge; more than two incident faces means
/// the mesh is non-manifold there.
#[derive(Debug, Clone)]
pub struct EdgeAdjacency {
    edge_faces: HashMap<(u32, u32), Vec<u32>>,
    consistently_oriented: bool,
}

impl EdgeAdjacency {
    /// Build adjacency from a face list.
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut edge_faces: HashMap<(u32, u32), Vec<u32>> = HashMap::new();
        let mut directed: HashSet<(u32, u32)> = HashSet::new();
        let mut consistently_oriented = true;
        for (face_idx, &[a, b, c]) in faces.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            // Truncation: face counts are bounded by u32 mesh indices
            let face_idx = face_idx as u32;
            for edge in [(a, b), (b, c), (c, a)] {
                // Two faces traversing an edge the same way disagree on
                // winding, so the directed edge repeats.
                if !directed.insert(edge) {
                    consistently_oriented = false;
                }
                edge_faces
                    .entry(undirected(edge.0, edge.1))
                    .or_default()
                    .push(face_idx);
            }
        }
        Self {
            edge_faces,
            consistently_oriented,
        }
    }

    /// Faces incident to the edge between `v0` and `v1`, in either
    /// direction. `None` if the edge does not exist.
    #[must_use]
    pub fn faces_for_edge(&self, v0: u32, v1: u32) -> Option<&[u32]> {
        self.edge_faces.get(&undirected(v0, v1)).map(Vec::as_slice)
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_faces.len()
    }

    /// Number of edges with exactly one incident face.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_faces.values().filter(|f| f.len() == 1).count()
    }

    /// Number of edges with more than two incident faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_faces.values().filter(|f| f.len() > 2).count()
    }

    /// Every directed edge appears exactly once in each direction.
    #[must_use]
    pub const fn is_consistently_oriented(&self) -> bool {
        self.consistently_oriented
    }

    /// Every edge has exactly two incident faces that traverse it in
    /// opposite directions. Watertight meshes enclose a volume; only they
    /// get a volume in metadata.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        !self.edge_faces.is_empty()
            && self.consistently_oriented
            && self.edge_faces.values().all(|f| f.len() == 2)
    }

    /// No edge has more than two incident faces.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edge_faces.values().all(|f| f.len() <= 2)
    }

    /// Iterate over `(edge, incident faces)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = ((u32, u32), &[u32])> + '_ {
        self.edge_faces.iter().map(|(&e, f)| (e, f.as_slice()))
    }
}

#[inline]
fn undirected(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::unit_cube;

    #[test]
    fn cube_is_watertight_and_manifold() {
        let cube = unit_cube();
        let adj = EdgeAdjacency::build(&cube.faces);
        assert!(adj.is_watertight());
        assert!(adj.is_manifold());
        assert_eq!(adj.boundary_edge_count(), 0);
        // A cube triangulation has 18 edges.
        assert_eq!(adj.edge_count(), 18);
    }

    #[test]
    fn flipped_face_breaks_watertightness() {
        let mut cube = unit_cube();
        let [a, b, c] = cube.faces[0];
        cube.faces[0] = [a, c, b];
        let adj = EdgeAdjacency::build(&cube.faces);
        // Still closed, but the flipped face traverses its three edges
        // the same way as its neighbours.
        assert_eq!(adj.boundary_edge_count(), 0);
        assert!(!adj.is_consistently_oriented());
        assert!(!adj.is_watertight());
    }

    #[test]
    fn single_triangle_has_three_boundary_edges() {
        let faces = vec![[0u32, 1, 2]];
        let adj = EdgeAdjacency::build(&faces);
        assert_eq!(adj.boundary_edge_count(), 3);
        assert!(!adj.is_watertight());
        assert!(adj.is_manifold());
    }

    #[test]
    fn three_faces_on_one_edge_is_non_manifold() {
        let faces = vec![[0u32, 1, 2], [0, 1, 3], [1, 0, 4]];
        let adj = EdgeAdjacency::build(&faces);
        assert_eq!(adj.non_manifold_edge_count(), 1);
        assert!(!adj.is_manifold());
    }

    #[test]
    fn edge_lookup_ignores_direction() {
        let faces = vec![[0u32, 1, 2], [1, 0, 3]];
        let adj = EdgeAdjacency::build(&faces);
        assert_eq!(adj.faces_for_edge(0, 1), adj.faces_for_edge(1, 0));
        assert_eq!(adj.faces_for_edge(0, 1).map(<[u32]>::len), Some(2));
        assert!(adj.faces_for_edge(2, 3).is_none());
    }

    #[test]
    fn empty_mesh_is_not_watertight() {
        let adj = EdgeAdjacency::build(&[]);
        assert!(!adj.is_watertight());
    }
}
