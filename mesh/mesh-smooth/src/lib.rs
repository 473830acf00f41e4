//! Vertex relaxation passes for extracted surfaces.
//!
//! Surfaces that come out of marching cubes carry voxel staircase artifacts.
//! This crate provides the three relaxation schemes the refinement pipeline
//! chains to remove them:
//!
//! - [`smooth_laplacian`]: plain damped pull toward the neighbour centroid.
//!   Fast, but shrinks closed surfaces.
//! - [`smooth_taubin`]: alternating shrink/inflate steps that filter noise
//!   with minimal volume loss.
//! - [`smooth_humphrey`]: Laplacian with push-back toward the original
//!   positions, for a final pass that must not drift the surface.
//!
//! All passes anchor boundary vertices and leave faces untouched.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod neighbours;
mod params;
mod smooth;

pub use neighbours::VertexNeighbours;
pub use params::{HumphreyParams, LaplacianParams, TaubinParams};
pub use smooth::{smooth_humphrey, smooth_laplacian, smooth_taubin};
