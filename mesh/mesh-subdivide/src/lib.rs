//! Midpoint subdivision for triangle meshes.
//!
//! Splits every triangle into four by inserting shared edge midpoints. The
//! refinement pipeline runs one level between its smoothing passes to give
//! the final smoothing more vertices to work with; geometry is unchanged,
//! only density increases.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod params;
mod result;
mod subdivide;

pub use error::{SubdivideError, SubdivideResult};
pub use params::SubdivideParams;
pub use result::SubdivideSummary;
pub use subdivide::subdivide_mesh;
