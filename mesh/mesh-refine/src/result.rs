//! Result types for refinement.

use mesh_types::IndexedMesh;

use crate::stages::Stage;

/// A non-fatal refinement failure. The stage's effect was skipped and the
/// pipeline continued with the mesh as it stood before the stage.
#[derive(Debug, Clone)]
pub struct RefinementWarning {
    /// The stage that failed.
    pub stage: Stage,
    /// What went wrong.
    pub detail: String,
}

impl std::fmt::Display for RefinementWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "refinement stage {} skipped: {}", self.stage, self.detail)
    }
}

/// Outcome of a refinement run.
#[derive(Debug, Clone)]
pub struct RefineSummary {
    /// The refined mesh.
    pub mesh: IndexedMesh,

    /// Face count of the input mesh.
    pub input_faces: usize,

    /// Face count after refinement.
    pub output_faces: usize,

    /// Stages that ran, in order.
    pub executed: Vec<Stage>,

    /// Stages whose size gate did not trigger.
    pub skipped: Vec<Stage>,

    /// Non-fatal failures recorded along the way.
    pub warnings: Vec<RefinementWarning>,
}

impl RefineSummary {
    /// True when `stage` actually ran.
    #[must_use]
    pub fn ran(&self, stage: Stage) -> bool {
        self.executed.contains(&stage)
    }

    /// True when any stage recorded a warning.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl std::fmt::Display for RefineSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "refine: {} -> {} faces, {} stages run, {} gated off, {} warning(s)",
            self.input_faces,
            self.output_faces,
            self.executed.len(),
            self.skipped.len(),
            self.warnings.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_queries() {
        let summary = RefineSummary {
            mesh: IndexedMesh::new(),
            input_faces: 100,
            output_faces: 90,
            executed: vec![Stage::Laplacian, Stage::MergeVertices],
            skipped: vec![Stage::PreDecimate],
            warnings: vec![],
        };
        assert!(summary.ran(Stage::Laplacian));
        assert!(!summary.ran(Stage::PreDecimate));
        assert!(!summary.has_warnings());
        assert!(format!("{summary}").contains("100 -> 90"));
    }

    #[test]
    fn warning_display_names_the_stage() {
        let warning = RefinementWarning {
            stage: Stage::FinalDecimate,
            detail: "solver was singular".into(),
        };
        let text = format!("{warning}");
        assert!(text.contains("final-decimate"));
        assert!(text.contains("singular"));
    }
}
