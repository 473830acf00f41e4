//! Vertex adjacency for smoothing.

// Vertex indices fit in u32 for any mesh this pipeline produces.
#![allow(clippy::cast_possible_truncation)]

use hashbrown::{HashMap, HashSet};
use mesh_types::IndexedMesh;

/// Per-vertex neighbour lists with boundary anchoring.
///
/// Boundary vertices (those on an edge with fewer than two adjacent faces)
/// are anchored: smoothing passes leave them in place so open meshes keep
/// their outline. Closed surfaces have no anchored vertices.
#[derive(Debug)]
pub struct VertexNeighbours {
    lists: Vec<Vec<u32>>,
    anchored: Vec<bool>,
}

impl VertexNeighbours {
    /// Build adjacency from the mesh's faces.
    #[must_use]
    pub fn build(mesh: &IndexedMesh) -> Self {
        let n = mesh.vertices.len();
        let mut sets: Vec<HashSet<u32>> = vec![HashSet::new(); n];
        let mut edge_faces: HashMap<(u32, u32), u32> = HashMap::new();

        for face in &mesh.faces {
            for i in 0..3 {
                let a = face[i];
                let b = face[(i + 1) % 3];
                sets[a as usize].insert(b);
                sets[b as usize].insert(a);
                let key = if a < b { (a, b) } else { (b, a) };
                *edge_faces.entry(key).or_insert(0) += 1;
            }
        }

        let mut anchored = vec![false; n];
        for (&(a, b), &count) in &edge_faces {
            if count < 2 {
                anchored[a as usize] = true;
                anchored[b as usize] = true;
            }
        }

        let lists = sets
            .into_iter()
            .map(|s| {
                let mut v: Vec<u32> = s.into_iter().collect();
                v.sort_unstable();
                v
            })
            .collect();

        Self { lists, anchored }
    }

    /// Neighbours of vertex `v`.
    #[must_use]
    pub fn of(&self, v: usize) -> &[u32] {
        &self.lists[v]
    }

    /// True when `v` sits on a boundary edge and must not move.
    #[must_use]
    pub fn is_anchored(&self, v: usize) -> bool {
        self.anchored[v]
    }

    /// True when `v` should be skipped by smoothing passes.
    #[must_use]
    pub fn is_fixed(&self, v: usize) -> bool {
        self.anchored[v] || self.lists[v].is_empty()
    }

    /// Number of vertices covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// True when the adjacency covers no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
