use std::path::Path;

use image::{ExtendedColorType, ImageFormat};

use crate::core::raster::RasterImage;
use crate::error::Result;
use crate::types::PixelFormat;

pub fn write_png(output: &Path, image: &RasterImage) -> Result<()> {
    let color = match image.format() {
        PixelFormat::Luma8 => ExtendedColorType::L8,
        PixelFormat::Rgb8 => ExtendedColorType::Rgb8,
        PixelFormat::Rgba8 => ExtendedColorType::Rgba8,
    };
    image::save_buffer_with_format(
        output,
        image.data(),
        image.width(),
        image.height(),
        color,
        ImageFormat::Png,
    )?;
    Ok(())
}
