//! The refinement pipeline executor.

use mesh_types::IndexedMesh;
use mesh_decimate::{decimate_mesh, DecimateParams};
use mesh_sanitize::{recompute_vertex_normals, weld_coincident_vertices};
use mesh_smooth::{
    smooth_humphrey, smooth_laplacian, smooth_taubin, HumphreyParams, LaplacianParams,
    TaubinParams,
};
use mesh_subdivide::{subdivide_mesh, SubdivideParams};
use tracing::{debug, info, warn};

use crate::params::{RefineParams, RefineProfile};
use crate::result::{RefineSummary, RefinementWarning};
use crate::stages::Stage;

// Aggressive-profile smoothing cascade.
const CASCADE_ROUNDS: usize = 5;
const CASCADE_ITERATIONS: usize = 20;
const CASCADE_LAMBDA: f64 = 0.7;

// Light-profile and post-subdivision Laplacian.
const SHORT_ITERATIONS: usize = 10;
const SHORT_LAMBDA: f64 = 0.5;

const SUBDIVIDE_LEVELS: u32 = 1;

/// Run the refinement plan for `params.profile` over `mesh`.
///
/// Never fails: stages whose size gate does not trigger are skipped, and
/// stage-internal failures (decimation on degenerate geometry, subdivision
/// past its face limit) are recorded as [`RefinementWarning`]s while the
/// pipeline continues with the pre-stage mesh.
#[must_use]
pub fn refine_mesh(mesh: IndexedMesh, params: &RefineParams) -> RefineSummary {
    let input_faces = mesh.face_count();
    let plan = params.plan();

    if mesh.is_empty() {
        debug!("refine called on empty mesh, nothing to do");
        return RefineSummary {
            mesh,
            input_faces,
            output_faces: 0,
            executed: Vec::new(),
            skipped: plan,
            warnings: Vec::new(),
        };
    }

    info!(
        input_faces,
        profile = ?params.profile,
        "starting mesh refinement"
    );

    let mut mesh = mesh;
    let mut executed = Vec::new();
    let mut skipped = Vec::new();
    let mut warnings = Vec::new();

    for stage in plan {
        let ran = run_stage(stage, &mut mesh, params, &mut warnings);
        if ran {
            debug!(stage = stage.name(), faces = mesh.face_count(), "stage done");
            executed.push(stage);
        } else {
            skipped.push(stage);
        }
    }

    let output_faces = mesh.face_count();
    info!(output_faces, warnings = warnings.len(), "refinement complete");

    RefineSummary {
        mesh,
        input_faces,
        output_faces,
        executed,
        skipped,
        warnings,
    }
}

/// Execute one stage. Returns false when the stage's size gate left it
/// skipped; failures are pushed onto `warnings` and count as executed.
fn run_stage(
    stage: Stage,
    mesh: &mut IndexedMesh,
    params: &RefineParams,
    warnings: &mut Vec<RefinementWarning>,
) -> bool {
    match stage {
        Stage::PreDecimate => {
            if mesh.face_count() <= params.pre_decimate_target {
                return false;
            }
            decimate_into(mesh, params.pre_decimate_target, stage, warnings);
            true
        }
        Stage::Laplacian => {
            match params.profile {
                RefineProfile::Aggressive => {
                    let pass = LaplacianParams::new(CASCADE_ITERATIONS, CASCADE_LAMBDA);
                    for _ in 0..CASCADE_ROUNDS {
                        smooth_laplacian(mesh, &pass);
                    }
                }
                RefineProfile::Light => {
                    smooth_laplacian(mesh, &LaplacianParams::new(SHORT_ITERATIONS, SHORT_LAMBDA));
                }
            }
            true
        }
        Stage::Taubin => {
            smooth_taubin(mesh, &TaubinParams::default());
            true
        }
        Stage::Humphrey => {
            smooth_humphrey(mesh, &HumphreyParams::default());
            true
        }
        Stage::Subdivide => {
            match subdivide_mesh(mesh, &SubdivideParams::with_levels(SUBDIVIDE_LEVELS)) {
                Ok(summary) => *mesh = summary.mesh,
                Err(err) => push_warning(stage, &err.to_string(), warnings),
            }
            true
        }
        Stage::PostLaplacian => {
            smooth_laplacian(mesh, &LaplacianParams::new(SHORT_ITERATIONS, SHORT_LAMBDA));
            true
        }
        Stage::FinalDecimate => {
            if mesh.face_count() <= params.hard_face_ceiling {
                return false;
            }
            decimate_into(mesh, params.hard_face_ceiling, stage, warnings);
            true
        }
        Stage::RecomputeNormals => {
            recompute_vertex_normals(mesh);
            true
        }
        Stage::CenterAndScale => {
            mesh.translate(-mesh.centroid().coords);
            let extent = mesh.max_abs_coordinate();
            if extent > params.size_ceiling {
                mesh.scale_uniform(params.rescale_to / extent);
            }
            true
        }
        Stage::MergeVertices => {
            let welded = weld_coincident_vertices(mesh, params.merge_epsilon);
            debug!(welded, "merged coincident vertices");
            true
        }
    }
}

/// Decimate in place, downgrading failure to a warning.
fn decimate_into(
    mesh: &mut IndexedMesh,
    target_faces: usize,
    stage: Stage,
    warnings: &mut Vec<RefinementWarning>,
) {
    match decimate_mesh(mesh, &DecimateParams::to_face_count(target_faces)) {
        Ok(summary) => {
            if !summary.reached_target(target_faces) {
                push_warning(
                    stage,
                    &format!(
                        "stopped at {} faces, target was {target_faces}",
                        summary.output_faces
                    ),
                    warnings,
                );
            }
            *mesh = summary.mesh;
        }
        Err(err) => push_warning(stage, &err.to_string(), warnings),
    }
}

fn push_warning(stage: Stage, detail: &str, warnings: &mut Vec<RefinementWarning>) {
    warn!(stage = stage.name(), detail, "refinement stage failed, continuing");
    warnings.push(RefinementWarning {
        stage,
        detail: detail.to_string(),
    });
}
