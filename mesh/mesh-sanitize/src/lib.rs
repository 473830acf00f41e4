//! Mesh sanitization for freshly extracted surfaces.
//!
//! Marching cubes output is geometrically noisy: slivers where interpolated
//! coordinates were clamped, coincident vertices along cell borders, and the
//! occasional duplicate face. This crate provides an idempotent cleanup pass:
//!
//! 1. Remove degenerate faces (repeated indices or near-zero area)
//! 2. Weld coincident vertices within a small tolerance
//! 3. Remove duplicate faces (same vertex set, either winding)
//! 4. Remove vertices no remaining face references
//! 5. Orient faces consistently and recompute outward vertex normals
//!
//! Running [`sanitize_mesh`] on an already-clean mesh changes nothing.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_sanitize::{sanitize_mesh, SanitizeParams};
//!
//! let mut mesh = unit_cube();
//! let summary = sanitize_mesh(&mut mesh, &SanitizeParams::default());
//! assert!(!summary.had_changes() || summary.normals_recomputed);
//! assert_eq!(mesh.face_count(), 12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod adjacency;
mod normals;
mod params;
mod sanitize;

pub use adjacency::EdgeAdjacency;
pub use normals::{orient_faces_consistently, recompute_vertex_normals};
pub use params::SanitizeParams;
pub use sanitize::{
    remove_degenerate_faces, remove_duplicate_faces, remove_unreferenced_vertices,
    sanitize_mesh, weld_coincident_vertices, SanitizeSummary,
};
