//! Conversion request and source provenance.
//!
//! These are the wire-facing types: they derive serde so a request can come
//! from a job queue or a config file, and they convert into the parameter
//! structs of the individual pipeline crates, which stay serde-free.

use serde::{Deserialize, Serialize};

use mesh_refine::{RefineParams, RefineProfile};
use volume_mask::{Selection as MaskSelection, ThresholdPreset};

/// Named tissue-boundary presets, mirroring
/// [`volume_mask::ThresholdPreset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Soft-tissue boundary.
    Soft,
    /// Bone boundary.
    Bone,
}

impl From<Preset> for ThresholdPreset {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Soft => Self::Soft,
            Preset::Bone => Self::Bone,
        }
    }
}

/// Which voxels of the source volume to keep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Exact match against a segmentation label.
    Label(i64),
    /// Threshold derived from the volume's own intensity distribution.
    ThresholdAuto,
    /// Fixed numeric threshold.
    ThresholdFixed(f64),
    /// Threshold from a named tissue preset.
    ThresholdPreset(Preset),
}

impl Selection {
    /// The segmentation label, if this is a label selection.
    #[must_use]
    pub const fn label(&self) -> Option<i64> {
        match self {
            Self::Label(label) => Some(*label),
            _ => None,
        }
    }

    pub(crate) fn to_mask_selection(self) -> MaskSelection {
        match self {
            Self::Label(label) => MaskSelection::Label(label),
            Self::ThresholdAuto => MaskSelection::threshold_auto(),
            Self::ThresholdFixed(value) => MaskSelection::threshold_fixed(value),
            Self::ThresholdPreset(preset) => MaskSelection::threshold_preset(preset.into()),
        }
    }
}

/// Refinement profile selector, mirroring [`mesh_refine::RefineProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Close to the measured geometry; batch extraction default.
    Light,
    /// Heavily smoothed and bounded; interactive viewing default.
    Aggressive,
}

impl From<Profile> for RefineProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Light => Self::Light,
            Profile::Aggressive => Self::Aggressive,
        }
    }
}

/// A single volume-to-mesh conversion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Voxel selection mode.
    pub selection: Selection,

    /// Extraction stride in voxels. Stride 1 extracts at full resolution.
    #[serde(default = "default_stride")]
    pub stride: usize,

    /// Refinement profile.
    pub profile: Profile,

    /// Face count above which the surface is decimated before smoothing.
    #[serde(default = "default_pre_decimate_target")]
    pub pre_decimate_target: usize,

    /// Hard face ceiling enforced after subdivision.
    #[serde(default = "default_hard_face_ceiling")]
    pub hard_face_ceiling: usize,

    /// Maximum allowed |coordinate| before the mesh is rescaled.
    #[serde(default = "default_size_ceiling")]
    pub size_ceiling: f64,
}

const fn default_stride() -> usize {
    1
}

/// Extraction stride of the interactive path.
const ON_DEMAND_STRIDE: usize = 2;

const fn default_pre_decimate_target() -> usize {
    15_000
}

const fn default_hard_face_ceiling() -> usize {
    50_000
}

const fn default_size_ceiling() -> f64 {
    100.0
}

impl ConversionRequest {
    /// Batch-extraction request for one segmentation label: full
    /// resolution, light refinement.
    #[must_use]
    pub const fn offline(label: i64) -> Self {
        Self {
            selection: Selection::Label(label),
            stride: default_stride(),
            profile: Profile::Light,
            pre_decimate_target: default_pre_decimate_target(),
            hard_face_ceiling: default_hard_face_ceiling(),
            size_ceiling: default_size_ceiling(),
        }
    }

    /// Interactive request: stride-2 extraction with aggressive refinement.
    #[must_use]
    pub const fn on_demand(selection: Selection) -> Self {
        Self {
            selection,
            stride: ON_DEMAND_STRIDE,
            profile: Profile::Aggressive,
            pre_decimate_target: default_pre_decimate_target(),
            hard_face_ceiling: default_hard_face_ceiling(),
            size_ceiling: default_size_ceiling(),
        }
    }

    /// Set the extraction stride.
    #[must_use]
    pub const fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Override the refinement profile.
    #[must_use]
    pub const fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the hard face ceiling.
    #[must_use]
    pub const fn with_hard_face_ceiling(mut self, ceiling: usize) -> Self {
        self.hard_face_ceiling = ceiling;
        self
    }

    /// Refinement parameters for this request's profile and limits.
    #[must_use]
    pub fn refine_params(&self) -> RefineParams {
        let base = match self.profile {
            Profile::Light => RefineParams::light(),
            Profile::Aggressive => RefineParams::aggressive(),
        };
        RefineParams {
            pre_decimate_target: self.pre_decimate_target,
            hard_face_ceiling: self.hard_face_ceiling,
            size_ceiling: self.size_ceiling,
            ..base
        }
    }
}

/// Provenance of the decoded volume, carried into the metadata sidecar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Name of the file the volume was decoded from.
    pub file_name: Option<String>,

    /// Shape of the source array before any striding.
    pub original_shape: Option<[usize; 3]>,
}

impl SourceInfo {
    /// Provenance for a named source file.
    #[must_use]
    pub fn for_file(name: impl Into<String>) -> Self {
        Self {
            file_name: Some(name.into()),
            original_shape: None,
        }
    }

    /// Record the source array shape.
    #[must_use]
    pub const fn with_shape(mut self, shape: [usize; 3]) -> Self {
        self.original_shape = Some(shape);
        self
    }
}
