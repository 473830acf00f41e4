//! Volume-to-mesh conversion orchestration.
//!
//! Ties the pipeline crates together: a [`ConversionRequest`] selects the
//! voxels, stride and refinement profile; [`run_pipeline`] produces a
//! refined mesh with metadata; [`convert_offline`] writes the OBJ/JSON
//! artifact pair and [`convert_on_demand`] returns the OBJ text directly.
//!
//! Two usage patterns map onto the two entry points. Batch extraction walks
//! the segmentation labels of a pre-segmented volume, converting each with
//! the light profile and registering the artifacts with an
//! [`ArtifactSink`]. Interactive extraction thresholds a raw volume with
//! the aggressive profile and streams the result back.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod decode;
mod error;
mod organs;
mod orchestrate;
mod pipeline;
mod request;

pub use decode::{decode_raw, load_raw_volume, RawDtype};
pub use error::{ConvertError, ConvertResult};
pub use organs::organ_name;
pub use orchestrate::{
    convert_offline, convert_on_demand, ArtifactSink, ModelIndex, OfflineArtifacts, OnDemandMesh,
    RecordingSink,
};
pub use pipeline::{run_pipeline, Conversion};
pub use request::{ConversionRequest, Preset, Profile, Selection, SourceInfo};
