//! Mesh simplification by iterative edge collapse.
//!
//! Simplifies a triangle mesh down to a requested face count using quadric
//! error metrics: every vertex accumulates the planes of its incident faces,
//! and the cheapest edges (those whose merged position stays closest to all
//! accumulated planes) collapse first. A link-condition check rejects
//! collapses that would pinch the surface, and boundary edges can be locked
//! so open meshes keep their outline.
//!
//! Decimation runs twice in the conversion pipeline: once on the raw
//! extracted surface to make smoothing tractable, and once at the end to cap
//! the output size.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_decimate::{decimate_mesh, DecimateParams};
//!
//! let cube = unit_cube();
//! let summary = decimate_mesh(&cube, &DecimateParams::to_face_count(12))?;
//! assert_eq!(summary.output_faces, 12);
//! # Ok::<(), mesh_decimate::DecimateError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod decimate;
mod error;
mod params;
mod quadric;
mod result;

pub use decimate::decimate_mesh;
pub use error::{DecimateError, DecimateResult};
pub use params::DecimateParams;
pub use result::DecimateSummary;
