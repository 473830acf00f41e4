//! The mesh refinement pipeline.
//!
//! Turns a sanitized marching-cubes surface into a bounded, organic-looking
//! mesh through a fixed, order-dependent stage sequence: optional
//! pre-decimation, a smoothing cascade (Laplacian, Taubin, Humphrey), one
//! midpoint subdivision with a blending pass, a hard face ceiling, normal
//! recomputation, centering/rescaling and a final vertex merge. Reordering
//! the stages changes the output, so the plan is explicit data
//! ([`RefineParams::plan`]) and the summary records exactly which stages ran.
//!
//! Two profiles exist: [`RefineProfile::Light`] for batch extraction that
//! should stay close to the measured geometry, and
//! [`RefineProfile::Aggressive`] for interactive viewing where smoothness and
//! bounded size matter more than fidelity.
//!
//! Refinement never fails. Stage-internal errors become
//! [`RefinementWarning`]s and the pipeline continues with the pre-stage mesh.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod params;
mod refine;
mod result;
mod stages;

pub use params::{RefineParams, RefineProfile};
pub use refine::refine_mesh;
pub use result::{RefineSummary, RefinementWarning};
pub use stages::Stage;
