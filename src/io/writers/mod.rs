//! Mask and image writers: TIFF (`tiff` encoder), JPEG (`jpeg-encoder`),
//! PNG (`image`), plus JSON metadata sidecars.
use std::path::Path;

use tracing::info;

use crate::core::raster::RasterImage;
use crate::error::Result;
use crate::types::OutputFormat;

pub mod jpeg;
pub mod metadata;
pub mod png;
pub mod tiff;

pub fn save_raster(image: &RasterImage, output: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::TIFF => tiff::write_tiff(output, image)?,
        OutputFormat::JPEG => jpeg::write_jpeg(output, image)?,
        OutputFormat::PNG => png::write_png(output, image)?,
    }
    info!(
        "Saved {}x{} {:?} image to {:?}",
        image.width(),
        image.height(),
        format,
        output
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelFormat;

    fn checkerboard() -> RasterImage {
        let data = (0..16 * 8)
            .map(|i| if (i % 16 + i / 16) % 2 == 0 { 255 } else { 0 })
            .collect();
        RasterImage::new(16, 8, PixelFormat::Luma8, data).unwrap()
    }

    #[test]
    fn lossless_formats_decode_to_the_same_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let img = checkerboard();
        for format in [OutputFormat::PNG, OutputFormat::TIFF] {
            let path = dir.path().join(format!("mask.{}", format.extension()));
            save_raster(&img, &path, format).unwrap();
            let decoded = image::open(&path).unwrap().to_luma8();
            assert_eq!(decoded.dimensions(), (16, 8));
            assert_eq!(decoded.as_raw(), img.data());
        }
    }

    #[test]
    fn jpeg_preview_is_decodable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.jpg");
        let img = RasterImage::filled(32, 16, PixelFormat::Rgb8, 255);
        save_raster(&img, &path, OutputFormat::JPEG).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_final_write_is_reported() {
        // Every write to /dev/full fails with ENOSPC once the buffer is flushed.
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let img = RasterImage::filled(16, 16, PixelFormat::Luma8, 255);
        assert!(matches!(
            save_raster(&img, full, OutputFormat::JPEG),
            Err(crate::error::Error::Io(_))
        ));
        assert!(save_raster(&img, full, OutputFormat::TIFF).is_err());
    }
}
