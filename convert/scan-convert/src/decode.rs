//! Raw volume decoding.
//!
//! The CLI feeds the pipeline from headerless little-endian sample dumps;
//! shape and spacing arrive out of band. Anything richer (compressed or
//! self-describing formats) is decoded upstream and handed over as raw
//! samples.

use std::fs;
use std::path::Path;

use tracing::debug;

use volume_types::{ScalarVolume, Spacing};

use crate::error::{ConvertError, ConvertResult};

/// Scalar sample type of a raw volume dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDtype {
    /// 16-bit signed integers (CT Hounsfield exports).
    I16,
    /// 32-bit floats.
    F32,
    /// 64-bit floats.
    F64,
}

impl RawDtype {
    /// Size of one sample in bytes.
    #[must_use]
    pub const fn sample_size(self) -> usize {
        match self {
            Self::I16 => 2,
            Self::F32 => 4,
            Self::F64 => 8,
        }
    }
}

/// Decode a little-endian sample buffer into a volume.
///
/// The buffer length must be exactly `nx * ny * nz` samples of `dtype`.
pub fn decode_raw(
    bytes: &[u8],
    dtype: RawDtype,
    shape: (usize, usize, usize),
    spacing: Spacing,
) -> ConvertResult<ScalarVolume> {
    let (nx, ny, nz) = shape;
    let expected = nx * ny * nz * dtype.sample_size();
    if bytes.len() != expected {
        return Err(ConvertError::Decode {
            message: format!(
                "expected {expected} bytes for shape {nx}x{ny}x{nz} ({dtype:?}), got {}",
                bytes.len()
            ),
        });
    }

    let values = match dtype {
        RawDtype::I16 => samples(bytes, |b: [u8; 2]| f64::from(i16::from_le_bytes(b))),
        RawDtype::F32 => samples(bytes, |b: [u8; 4]| f64::from(f32::from_le_bytes(b))),
        RawDtype::F64 => samples(bytes, f64::from_le_bytes),
    };

    debug!(samples = values.len(), ?dtype, "decoded raw volume");
    ScalarVolume::from_values(shape, spacing, values).ok_or_else(|| ConvertError::Decode {
        message: "sample count does not match shape".to_string(),
    })
}

/// Read and decode a raw volume file.
pub fn load_raw_volume(
    path: &Path,
    dtype: RawDtype,
    shape: (usize, usize, usize),
    spacing: Spacing,
) -> ConvertResult<ScalarVolume> {
    let bytes = fs::read(path).map_err(|err| ConvertError::Decode {
        message: format!("{}: {err}", path.display()),
    })?;
    decode_raw(&bytes, dtype, shape, spacing)
}

fn samples<const N: usize>(bytes: &[u8], convert: impl Fn([u8; N]) -> f64) -> Vec<f64> {
    bytes
        .chunks_exact(N)
        .filter_map(|chunk| chunk.try_into().ok().map(&convert))
        .collect()
}
