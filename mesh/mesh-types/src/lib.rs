//! Core triangle mesh types for the scan conversion pipeline.
//!
//! Provides the indexed mesh representation threaded through every stage
//! of the pipeline:
//!
//! - [`Vertex`]: position plus optional unit normal
//! - [`IndexedMesh`]: vertex list plus faces as index triples
//! - [`Aabb`]: axis-aligned bounding box
//!
//! # Conventions
//!
//! - Coordinates are `f64` in physical millimeters
//! - Faces are counter-clockwise when viewed from outside
//! - Face indices are `u32` (meshes above 4B vertices are unsupported)
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine dependencies**. It can be
//! used in CLI tools, servers, and WASM targets.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod mesh;
mod vertex;

pub use bounds::Aabb;
pub use mesh::{unit_cube, IndexedMesh};
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
