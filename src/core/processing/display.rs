use tracing::debug;

use crate::core::mask::BinaryMask;
use crate::core::params::DisplayRange;
use crate::core::raster::RasterImage;
use crate::error::{Error, Result};
use crate::types::PixelFormat;

/// Linear `[min, max] -> [0, 255]` remap of one value, rounded and clamped.
#[inline]
pub fn remap_to_u8(value: f64, min: f64, max: f64) -> u8 {
    let scaled = ((value - min) / (max - min) * 255.0).round();
    scaled.clamp(0.0, 255.0) as u8
}

/// Render `mask` as an 8-bit grayscale image with the same dimensions.
///
/// With the default `0..1` range background is black and foreground white.
pub fn to_display_image(mask: &BinaryMask, min: f64, max: f64) -> Result<RasterImage> {
    DisplayRange { min, max }.validate()?;

    let (rows, cols) = mask.dim();
    let width = u32::try_from(cols).map_err(|_| Error::ShapeMismatch(format!("{} columns", cols)))?;
    let height = u32::try_from(rows).map_err(|_| Error::ShapeMismatch(format!("{} rows", rows)))?;

    debug!("Display remap [{}, {}] -> [0, 255] for {}x{}", min, max, cols, rows);

    let data: Vec<u8> = mask
        .as_array()
        .iter()
        .map(|&v| remap_to_u8(f64::from(v), min, max))
        .collect();
    RasterImage::new(width, height, PixelFormat::Luma8, data)
}
