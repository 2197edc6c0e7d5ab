use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::raster::RasterImage;
use crate::error::{Error, Result};
use crate::types::PixelFormat;

fn jpeg_dimensions(image: &RasterImage) -> Result<(u16, u16)> {
    let (w, h) = image.dimensions();
    match (u16::try_from(w), u16::try_from(h)) {
        (Ok(w16), Ok(h16)) => Ok((w16, h16)),
        _ => Err(Error::dimensions(w, h)),
    }
}

pub fn write_jpeg(output: &Path, image: &RasterImage) -> Result<()> {
    let (cols, rows) = jpeg_dimensions(image)?;
    let color = match image.format() {
        PixelFormat::Luma8 => ColorType::Luma,
        PixelFormat::Rgb8 => ColorType::Rgb,
        PixelFormat::Rgba8 => ColorType::Rgba,
    };
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, 100);
    encoder
        .encode(image.data(), cols, rows, color)
        .map_err(Error::external)?;
    writer.flush()?;
    Ok(())
}
