use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::core::raster::RasterImage;
use crate::core::tensor::{ProbabilityTensor, contiguous_strides};
use crate::error::{Error, Result};

/// Decode any image format supported by the `image` crate.
pub fn load_raster(path: &Path) -> Result<RasterImage> {
    let img = image::open(path)?;
    let raster = RasterImage::from_dynamic(img);
    info!(
        "Loaded {:?}: {}x{} {:?}",
        path,
        raster.width(),
        raster.height(),
        raster.format()
    );
    Ok(raster)
}

/// Parse raw little-endian `f32` samples.
pub fn decode_f32_le(bytes: &[u8]) -> Result<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(Error::ShapeMismatch(format!(
            "raw tensor length {} is not a multiple of 4 bytes",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Load a raw little-endian `f32` probability map laid out as `shape`.
///
/// Without explicit `strides` the file is taken as row-major contiguous.
pub fn load_probability_tensor(
    path: &Path,
    shape: [usize; 3],
    strides: Option<[usize; 3]>,
) -> Result<ProbabilityTensor> {
    let bytes = fs::read(path)?;
    let data = decode_f32_le(&bytes)?;
    let strides = strides.unwrap_or_else(|| contiguous_strides(shape));
    debug!(
        "Raw tensor {:?}: {} values, shape {:?}, strides {:?}",
        path,
        data.len(),
        shape,
        strides
    );
    ProbabilityTensor::with_strides(data, shape, strides)
}
