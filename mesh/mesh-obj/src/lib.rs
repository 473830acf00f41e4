//! Wavefront OBJ serialization for the conversion pipeline.
//!
//! Only the subset the pipeline needs: triangle faces, optional per-vertex
//! normals sharing the vertex index, one smoothing group so viewers
//! interpolate the welded normals. The writer is byte-deterministic and the
//! parser accepts everything the writer emits.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod obj;

pub use error::{ObjError, ObjResult};
pub use obj::{load_obj, obj_text, parse_obj, save_obj};
