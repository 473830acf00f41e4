//! Isosurface extraction from binary occupancy masks.
//!
//! Runs marching cubes over an [`OccupancyMask`](volume_types::OccupancyMask)
//! at the 0.5 level between unoccupied and occupied samples, producing an
//! [`IndexedMesh`](mesh_types::IndexedMesh) in physical millimeters. Key
//! properties:
//!
//! - **Physical scale**: coordinates are multiplied per axis by the voxel
//!   spacing, so downstream measurements are in mm.
//! - **Closed borders**: the lattice is padded with an unoccupied layer, so
//!   structures touching the volume border still close; interpolated
//!   coordinates are clamped back into the volume extent.
//! - **Stride**: extraction at stride `s` samples every `s`-th voxel,
//!   trading fidelity for speed on large raw-threshold volumes.
//! - **Gradient normals**: per-vertex normals come from the
//!   central-difference gradient of the occupancy field.
//!
//! # Example
//!
//! ```
//! use volume_types::{OccupancyMask, Spacing};
//! use volume_surface::{extract_surface, ExtractParams};
//!
//! let mask = OccupancyMask::from_fn((8, 8, 8), |x, y, z| {
//!     (1..7).contains(&x) && (1..7).contains(&y) && (1..7).contains(&z)
//! });
//! let mesh = extract_surface(&mask, Spacing::uniform(1.0), &ExtractParams::default()).unwrap();
//! assert!(!mesh.faces.is_empty());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod extract;
mod params;
mod tables;

pub use error::{ExtractError, ExtractResult};
pub use extract::extract_surface;
pub use params::ExtractParams;
