//! Refinement parameters and the stage plan.

use crate::stages::Stage;

/// How hard the pipeline works on the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefineProfile {
    /// Batch profile: one short Laplacian pass, normals, merge. Preserves the
    /// extracted geometry closely and never rescales.
    #[default]
    Light,
    /// Interactive profile: full cascade with decimation ceilings, a
    /// subdivision round and centering/rescaling for display.
    Aggressive,
}

/// Parameters for [`refine_mesh`](crate::refine_mesh).
#[derive(Debug, Clone)]
pub struct RefineParams {
    /// Selected profile.
    pub profile: RefineProfile,

    /// Face count above which the input is decimated before smoothing.
    pub pre_decimate_target: usize,

    /// Hard ceiling enforced after subdivision.
    pub hard_face_ceiling: usize,

    /// Maximum allowed |coordinate| before rescaling kicks in.
    pub size_ceiling: f64,

    /// |coordinate| the mesh is rescaled to when it exceeds the ceiling.
    pub rescale_to: f64,

    /// Weld tolerance for the final vertex merge.
    pub merge_epsilon: f64,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            profile: RefineProfile::Light,
            pre_decimate_target: 15_000,
            hard_face_ceiling: 50_000,
            size_ceiling: 100.0,
            rescale_to: 80.0,
            merge_epsilon: 1e-6,
        }
    }
}

impl RefineParams {
    /// The light batch profile.
    #[must_use]
    pub fn light() -> Self {
        Self::default()
    }

    /// The aggressive interactive profile.
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            profile: RefineProfile::Aggressive,
            ..Default::default()
        }
    }

    /// Set the hard face ceiling.
    #[must_use]
    pub const fn with_hard_face_ceiling(mut self, ceiling: usize) -> Self {
        self.hard_face_ceiling = ceiling;
        self
    }

    /// Set the pre-decimation target.
    #[must_use]
    pub const fn with_pre_decimate_target(mut self, target: usize) -> Self {
        self.pre_decimate_target = target;
        self
    }

    /// The ordered stage plan for this profile. Size gates are evaluated at
    /// execution time; the plan itself is fixed per profile.
    #[must_use]
    pub fn plan(&self) -> Vec<Stage> {
        match self.profile {
            RefineProfile::Light => vec![
                Stage::Laplacian,
                Stage::RecomputeNormals,
                Stage::MergeVertices,
            ],
            RefineProfile::Aggressive => vec![
                Stage::PreDecimate,
                Stage::Laplacian,
                Stage::Taubin,
                Stage::Humphrey,
                Stage::Subdivide,
                Stage::PostLaplacian,
                Stage::FinalDecimate,
                Stage::RecomputeNormals,
                Stage::CenterAndScale,
                Stage::MergeVertices,
            ],
        }
    }
}
