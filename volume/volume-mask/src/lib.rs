//! Occupancy mask construction from scalar volumes.
//!
//! Turns a decoded [`ScalarVolume`](volume_types::ScalarVolume) into a binary
//! [`OccupancyMask`](volume_types::OccupancyMask) ready for surface
//! extraction. Two selection modes are supported:
//!
//! - **Exact label**: voxel is occupied iff its value equals an integer label.
//!   Used for pre-segmented volumes; no cleanup is applied.
//! - **Threshold**: voxel is occupied iff its value exceeds a threshold. The
//!   threshold may be fixed, chosen from a tissue preset, or derived
//!   automatically as a low percentile of the foreground intensity
//!   distribution. Thresholded masks then go through a fixed morphological
//!   cleanup sequence: small-object removal, spherical closing, hole filling,
//!   and largest-component selection.
//!
//! # Example
//!
//! ```
//! use volume_types::{ScalarVolume, Spacing};
//! use volume_mask::{build_mask, MaskParams, Selection};
//!
//! // A small volume with a bright 2x2x2 block in one corner.
//! let volume = ScalarVolume::from_fn((8, 8, 8), Spacing::uniform(1.0), |x, y, z| {
//!     if x < 2 && y < 2 && z < 2 { 200.0 } else { -1000.0 }
//! });
//!
//! let params = MaskParams::default().with_min_occupied(1).without_cleanup();
//! let result = build_mask(&volume, &Selection::threshold_fixed(100.0), &params).unwrap();
//! assert_eq!(result.mask.occupied_count(), 8);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod build;
mod error;
mod morphology;
mod params;
mod result;

pub use build::{auto_threshold, build_mask};
pub use error::{MaskError, MaskResult};
pub use morphology::{
    binary_closing, fill_holes, keep_largest_component, remove_small_objects,
};
pub use params::{MaskParams, Selection, ThresholdPolicy, ThresholdPreset};
pub use result::MaskBuildResult;
