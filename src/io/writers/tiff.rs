use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tiff::encoder::{TiffEncoder, colortype};

use crate::core::raster::RasterImage;
use crate::error::Result;
use crate::types::PixelFormat;

pub fn write_tiff(output: &Path, image: &RasterImage) -> Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let (cols, rows) = image.dimensions();
    {
        let mut encoder = TiffEncoder::new(&mut writer)?;
        match image.format() {
            PixelFormat::Luma8 => encoder.write_image::<colortype::Gray8>(cols, rows, image.data())?,
            PixelFormat::Rgb8 => encoder.write_image::<colortype::RGB8>(cols, rows, image.data())?,
            PixelFormat::Rgba8 => {
                encoder.write_image::<colortype::RGBA8>(cols, rows, image.data())?
            }
        }
    }
    writer.flush()?;
    Ok(())
}
