//! Command-line volume-to-mesh conversion.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use scan_convert::{
    convert_offline, load_raw_volume, ConversionRequest, ModelIndex, Preset, Profile, RawDtype,
    Selection, SourceInfo,
};
use volume_types::Spacing;

#[derive(Parser)]
#[command(
    name = "scan-convert",
    about = "Convert a raw scalar volume into a surface mesh",
    version
)]
struct Cli {
    /// Headerless little-endian volume file.
    input: PathBuf,

    /// Volume shape as NX,NY,NZ (x varies fastest in the file).
    #[arg(long, value_delimiter = ',', num_args = 3)]
    shape: Vec<usize>,

    /// Voxel spacing in mm as SX,SY,SZ.
    #[arg(long, value_delimiter = ',', num_args = 3, default_value = "1.0,1.0,1.0")]
    spacing: Vec<f64>,

    /// Scalar sample type of the input file.
    #[arg(long, value_enum, default_value_t = DtypeArg::I16)]
    dtype: DtypeArg,

    /// Extract the surface of this segmentation label.
    #[arg(long, conflicts_with_all = ["threshold", "preset"])]
    label: Option<i64>,

    /// Extract at a fixed intensity threshold.
    #[arg(long)]
    threshold: Option<f64>,

    /// Extract at a named tissue preset.
    #[arg(long, value_enum, conflicts_with = "threshold")]
    preset: Option<PresetArg>,

    /// Sampling stride in voxels. Defaults to 1 for label extraction and
    /// 2 for threshold extraction.
    #[arg(long)]
    stride: Option<usize>,

    /// Refinement profile. Defaults to light for label extraction and
    /// aggressive for threshold extraction.
    #[arg(long, value_enum)]
    profile: Option<ProfileArg>,

    /// Directory the mesh and metadata are written into.
    #[arg(long, short, default_value = ".")]
    out_dir: PathBuf,

    /// Output file stem. Defaults to the input file stem.
    #[arg(long)]
    name: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DtypeArg {
    I16,
    F32,
    F64,
}

impl From<DtypeArg> for RawDtype {
    fn from(arg: DtypeArg) -> Self {
        match arg {
            DtypeArg::I16 => Self::I16,
            DtypeArg::F32 => Self::F32,
            DtypeArg::F64 => Self::F64,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Soft,
    Bone,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Soft => Self::Soft,
            PresetArg::Bone => Self::Bone,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    Light,
    Aggressive,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Light => Self::Light,
            ProfileArg::Aggressive => Self::Aggressive,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let &[nx, ny, nz] = cli.shape.as_slice() else {
        bail!("--shape takes exactly three values");
    };
    let &[sx, sy, sz] = cli.spacing.as_slice() else {
        bail!("--spacing takes exactly three values");
    };
    let spacing = Spacing::new(sx, sy, sz);

    let selection = match (cli.label, cli.threshold, cli.preset) {
        (Some(label), _, _) => Selection::Label(label),
        (None, Some(value), _) => Selection::ThresholdFixed(value),
        (None, None, Some(preset)) => Selection::ThresholdPreset(preset.into()),
        (None, None, None) => Selection::ThresholdAuto,
    };

    let mut request = match selection {
        Selection::Label(label) => ConversionRequest::offline(label),
        _ => ConversionRequest::on_demand(selection),
    };
    if let Some(stride) = cli.stride {
        request = request.with_stride(stride);
    }
    if let Some(profile) = cli.profile {
        request = request.with_profile(profile.into());
    }

    let volume = load_raw_volume(&cli.input, cli.dtype.into(), (nx, ny, nz), spacing)
        .with_context(|| format!("loading {}", cli.input.display()))?;

    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let source = SourceInfo {
        file_name,
        original_shape: Some([nx, ny, nz]),
    };

    let stem = match cli.name {
        Some(name) => name,
        None => cli
            .input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .context("input path has no file stem; pass --name")?,
    };

    let mut sink = ModelIndex::new(&cli.out_dir);
    let artifacts = convert_offline(&volume, &request, &source, &cli.out_dir, &stem, &mut sink)
        .context("conversion failed")?;

    println!("{}", artifacts.metadata);
    println!("wrote {}", artifacts.mesh_path.display());
    println!("wrote {}", artifacts.metadata_path.display());
    for warning in &artifacts.warnings {
        eprintln!("warning: {warning}");
    }

    Ok(())
}
