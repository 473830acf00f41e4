//! Measurement of finished meshes and the metadata record that travels with
//! them.
//!
//! [`compute_metadata`] derives bounds, size, centroid, counts, whether the
//! surface is watertight, and (only then) the enclosed volume. The resulting
//! [`MeshMetadata`] record serializes to the JSON sidecar written next to
//! every exported mesh; its field names are stable.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod compute;
mod record;

pub use compute::compute_metadata;
pub use record::{BoundsMm, MeshMetadata};
