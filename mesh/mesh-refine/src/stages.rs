//! The named refinement stages.
//!
//! Refinement is a fixed, order-dependent sequence. The order is part of the
//! contract: smoothing before subdivision softens the coarse surface, the
//! post-subdivision pass blends the new vertices, and merging runs last so it
//! sees every duplicate the earlier stages produced. Stages are data so the
//! plan can be inspected and asserted on.

/// A single step of the refinement pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reduce an oversized input before smoothing. Size-gated.
    PreDecimate,
    /// The main Laplacian relaxation (cascaded in the aggressive profile).
    Laplacian,
    /// Non-shrinking Taubin pass.
    Taubin,
    /// Feature-preserving Humphrey pass.
    Humphrey,
    /// One level of midpoint subdivision.
    Subdivide,
    /// Short Laplacian pass to blend the subdivision vertices.
    PostLaplacian,
    /// Enforce the hard face ceiling. Size-gated.
    FinalDecimate,
    /// Recompute vertex normals after all topology changes.
    RecomputeNormals,
    /// Move the centroid to the origin and rescale oversized meshes.
    CenterAndScale,
    /// Weld coincident vertices, averaging their normals.
    MergeVertices,
}

impl Stage {
    /// Stable name used in logs and warnings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PreDecimate => "pre-decimate",
            Self::Laplacian => "laplacian",
            Self::Taubin => "taubin",
            Self::Humphrey => "humphrey",
            Self::Subdivide => "subdivide",
            Self::PostLaplacian => "post-laplacian",
            Self::FinalDecimate => "final-decimate",
            Self::RecomputeNormals => "recompute-normals",
            Self::CenterAndScale => "center-and-scale",
            Self::MergeVertices => "merge-vertices",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
