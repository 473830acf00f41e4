//! The volume-to-mesh pipeline.
//!
//! One call runs the full sequence: voxel selection, isosurface extraction,
//! sanitization, refinement and metadata computation. Only the first two
//! stages can fail; everything downstream degrades to warnings.

use tracing::{debug, info};

use mesh_metadata::{compute_metadata, MeshMetadata};
use mesh_refine::{refine_mesh, RefinementWarning};
use mesh_sanitize::{sanitize_mesh, SanitizeParams};
use mesh_types::IndexedMesh;
use volume_mask::{build_mask, MaskParams};
use volume_surface::{extract_surface, ExtractParams};
use volume_types::ScalarVolume;

use crate::error::ConvertResult;
use crate::organs::organ_name;
use crate::request::{ConversionRequest, Selection, SourceInfo};

/// Output of a completed conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The refined mesh, in millimetres.
    pub mesh: IndexedMesh,

    /// Descriptive record for the mesh, ready to serialize.
    pub metadata: MeshMetadata,

    /// Threshold that was applied, for threshold selections.
    pub threshold: Option<f64>,

    /// Non-fatal refinement failures.
    pub warnings: Vec<RefinementWarning>,
}

impl Conversion {
    /// Whether refinement recorded any non-fatal failure.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the full conversion pipeline on a decoded volume.
///
/// # Errors
///
/// Returns an error if the selection matches no usable structure or if
/// extraction produces no triangles. Refinement failures do not abort;
/// they surface as [`Conversion::warnings`].
pub fn run_pipeline(
    volume: &ScalarVolume,
    request: &ConversionRequest,
    source: &SourceInfo,
) -> ConvertResult<Conversion> {
    let spacing = volume.spacing();
    info!(
        shape = ?volume.shape(),
        selection = ?request.selection,
        profile = ?request.profile,
        "starting conversion"
    );

    let mask_result = build_mask(
        volume,
        &request.selection.to_mask_selection(),
        &MaskParams::default(),
    )?;
    debug!(
        occupied = mask_result.occupied_after_cleanup,
        threshold = ?mask_result.threshold,
        "mask built"
    );

    let extract_params = ExtractParams::full_resolution().with_stride(request.stride);
    let mut mesh = extract_surface(&mask_result.mask, spacing, &extract_params)?;

    let sanitized = sanitize_mesh(&mut mesh, &SanitizeParams::default());
    debug!(%sanitized, "surface sanitized");

    let refined = refine_mesh(mesh, &request.refine_params());
    info!(%refined, "refinement finished");

    let mut metadata = compute_metadata(&refined.mesh, &spacing);
    if let Some(threshold) = mask_result.threshold {
        metadata = metadata.with_threshold(threshold);
    }
    if let Selection::Label(label) = request.selection {
        if let Some(name) = organ_name(label) {
            metadata = metadata.with_organ_type(name);
        }
    }
    if let Some(name) = &source.file_name {
        metadata = metadata.with_source_file(name.clone());
    }
    let (nx, ny, nz) = volume.shape();
    metadata = metadata.with_original_shape(source.original_shape.unwrap_or([nx, ny, nz]));

    Ok(Conversion {
        mesh: refined.mesh,
        metadata,
        threshold: mask_result.threshold,
        warnings: refined.warnings,
    })
}
