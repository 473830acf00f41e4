//! Offline and on-demand conversion entry points.
//!
//! The offline path writes a mesh artifact plus a JSON metadata sidecar and
//! reports the artifact to an [`ArtifactSink`]; the on-demand path returns
//! the serialized mesh directly to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use mesh_metadata::MeshMetadata;
use mesh_obj::{obj_text, save_obj};
use mesh_refine::RefinementWarning;
use volume_types::ScalarVolume;

use crate::error::{ConvertError, ConvertResult};
use crate::pipeline::run_pipeline;
use crate::request::{ConversionRequest, SourceInfo};

/// Receives the path of each successfully written mesh artifact.
///
/// Registration happens after the artifact and its sidecar are both on
/// disk, so a sink never sees a half-written pair.
pub trait ArtifactSink {
    /// Record one written artifact.
    fn register_artifact(&mut self, path: &Path);
}

/// Sink that remembers registered paths in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Paths in registration order.
    pub artifacts: Vec<PathBuf>,
}

impl ArtifactSink for RecordingSink {
    fn register_artifact(&mut self, path: &Path) {
        self.artifacts.push(path.to_path_buf());
    }
}

/// Sink that maintains a `models.json` index of artifact file names in the
/// output directory.
#[derive(Debug)]
pub struct ModelIndex {
    path: PathBuf,
}

impl ModelIndex {
    /// Index stored as `models.json` inside `dir`.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join("models.json"),
        }
    }

    /// Path of the index file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArtifactSink for ModelIndex {
    fn register_artifact(&mut self, path: &Path) {
        let Some(name) = path.file_name() else {
            return;
        };
        let name = name.to_string_lossy().into_owned();

        let mut entries: Vec<String> = fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        if !entries.contains(&name) {
            entries.push(name);
        }

        match serde_json::to_string_pretty(&entries) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    warn!(path = %self.path.display(), %err, "model index not updated");
                }
            }
            Err(err) => warn!(%err, "model index not serialized"),
        }
    }
}

/// Result of an offline conversion: paths of the written pair.
#[derive(Debug, Clone)]
pub struct OfflineArtifacts {
    /// Path of the written mesh file.
    pub mesh_path: PathBuf,

    /// Path of the written metadata sidecar.
    pub metadata_path: PathBuf,

    /// The metadata that was written.
    pub metadata: MeshMetadata,

    /// Non-fatal refinement failures.
    pub warnings: Vec<RefinementWarning>,
}

/// Result of an on-demand conversion: the mesh as OBJ text.
#[derive(Debug, Clone)]
pub struct OnDemandMesh {
    /// The mesh serialized as OBJ.
    pub obj: String,

    /// Descriptive record for the mesh.
    pub metadata: MeshMetadata,

    /// Non-fatal refinement failures.
    pub warnings: Vec<RefinementWarning>,
}

/// Convert a volume and write `<stem>.obj` plus `<stem>.json` into
/// `output_dir`, registering the mesh with `sink` once both are on disk.
///
/// If the sidecar write fails the mesh file is removed again; the output
/// directory never holds an unpaired artifact.
///
/// # Errors
///
/// Returns an error if the pipeline fails or either file cannot be written.
pub fn convert_offline(
    volume: &ScalarVolume,
    request: &ConversionRequest,
    source: &SourceInfo,
    output_dir: &Path,
    stem: &str,
    sink: &mut dyn ArtifactSink,
) -> ConvertResult<OfflineArtifacts> {
    let conversion = run_pipeline(volume, request, source)?;

    let mesh_path = output_dir.join(format!("{stem}.obj"));
    let metadata_path = output_dir.join(format!("{stem}.json"));

    save_obj(&conversion.mesh, &mesh_path).map_err(|source| ConvertError::Artifact {
        path: mesh_path.clone(),
        source,
    })?;

    let json = match serde_json::to_string_pretty(&conversion.metadata) {
        Ok(json) => json,
        Err(source) => {
            let _ = fs::remove_file(&mesh_path);
            return Err(ConvertError::Metadata {
                path: metadata_path,
                source,
            });
        }
    };
    if let Err(source) = fs::write(&metadata_path, json) {
        let _ = fs::remove_file(&mesh_path);
        return Err(ConvertError::Io {
            path: metadata_path,
            source,
        });
    }

    sink.register_artifact(&mesh_path);
    info!(
        mesh = %mesh_path.display(),
        faces = conversion.metadata.num_faces,
        "artifact written"
    );

    Ok(OfflineArtifacts {
        mesh_path,
        metadata_path,
        metadata: conversion.metadata,
        warnings: conversion.warnings,
    })
}

/// Convert a volume and return the mesh as OBJ text without touching disk.
///
/// # Errors
///
/// Returns an error if the pipeline fails.
pub fn convert_on_demand(
    volume: &ScalarVolume,
    request: &ConversionRequest,
    source: &SourceInfo,
) -> ConvertResult<OnDemandMesh> {
    let conversion = run_pipeline(volume, request, source)?;
    Ok(OnDemandMesh {
        obj: obj_text(&conversion.mesh),
        metadata: conversion.metadata,
        warnings: conversion.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::default();
        sink.register_artifact(Path::new("a.obj"));
        sink.register_artifact(Path::new("b.obj"));
        assert_eq!(sink.artifacts.len(), 2);
        assert_eq!(sink.artifacts[0], PathBuf::from("a.obj"));
    }

    #[test]
    fn model_index_appends_without_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = ModelIndex::new(dir.path());
        index.register_artifact(&dir.path().join("liver.obj"));
        index.register_artifact(&dir.path().join("spleen.obj"));
        index.register_artifact(&dir.path().join("liver.obj"));

        let text = fs::read_to_string(index.path()).unwrap();
        let entries: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(entries, vec!["liver.obj", "spleen.obj"]);
    }
}
