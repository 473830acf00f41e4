//! Core volumetric data types.
//!
//! This crate provides the two array types the scan conversion pipeline is
//! built on:
//!
//! - [`ScalarVolume`]: a 3D array of real-valued samples with per-axis
//!   physical spacing in millimeters (e.g. a decoded CT or MR scan)
//! - [`OccupancyMask`]: a 3D binary array of the same shape, produced by
//!   thresholding or label selection
//!
//! Both store their samples in a single contiguous buffer with x varying
//! fastest, so morphological sweeps and marching traversals stay cache
//! friendly regardless of volume size.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine dependencies**. It can be used
//! in CLI tools, servers, and WASM targets.
//!
//! # Example
//!
//! ```
//! use volume_types::{ScalarVolume, Spacing};
//!
//! let volume = ScalarVolume::from_fn((4, 4, 4), Spacing::uniform(1.0), |x, y, z| {
//!     (x + y + z) as f64
//! });
//! assert_eq!(volume.shape(), (4, 4, 4));
//! assert!((volume.get(1, 1, 1) - 3.0).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod mask;
mod spacing;
mod volume;

pub use mask::OccupancyMask;
pub use spacing::Spacing;
pub use volume::ScalarVolume;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
