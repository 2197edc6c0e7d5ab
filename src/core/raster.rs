use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::error::{Error, Result};
use crate::types::PixelFormat;

/// Row-major, channel-interleaved 8-bit raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap an existing pixel buffer; its length must match the dimensions and format.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * format.channels();
        if data.len() != expected {
            return Err(Error::dimensions(width, height));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Image of the given size with every sample set to `value`.
    pub fn filled(width: u32, height: u32, format: PixelFormat, value: u8) -> Self {
        let len = width as usize * height as usize * format.channels();
        Self {
            width,
            height,
            format,
            data: vec![value; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Samples of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.format.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        Some(&self.data[start..start + channels])
    }

    /// Convert a decoded image. Formats other than 8-bit gray/RGB/RGBA become RGB8.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (format, data) = match img {
            DynamicImage::ImageLuma8(buf) => (PixelFormat::Luma8, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (PixelFormat::Rgb8, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (PixelFormat::Rgba8, buf.into_raw()),
            other => (PixelFormat::Rgb8, other.to_rgb8().into_raw()),
        };
        Self {
            width,
            height,
            format,
            data,
        }
    }

    pub fn to_dynamic(&self) -> Result<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let data = self.data.clone();
        let img = match self.format {
            PixelFormat::Luma8 => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
            PixelFormat::Rgb8 => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
            PixelFormat::Rgba8 => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        };
        img.ok_or_else(|| Error::dimensions(w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_buffer_of_wrong_length() {
        let err = RasterImage::new(4, 4, PixelFormat::Rgb8, vec![0; 47]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDimensions {
                width: 4,
                height: 4
            }
        ));
    }

    #[test]
    fn pixel_addresses_interleaved_samples() {
        let data = (0u8..12).collect::<Vec<_>>();
        let img = RasterImage::new(2, 2, PixelFormat::Rgb8, data).unwrap();
        assert_eq!(img.pixel(1, 0), Some(&[3u8, 4, 5][..]));
        assert_eq!(img.pixel(0, 1), Some(&[6u8, 7, 8][..]));
        assert_eq!(img.pixel(2, 0), None);
    }

    #[test]
    fn dynamic_conversion_keeps_gray_and_promotes_others() {
        let gray = RasterImage::from_dynamic(DynamicImage::new_luma8(3, 2));
        assert_eq!(gray.format(), PixelFormat::Luma8);
        assert_eq!(gray.dimensions(), (3, 2));

        let la = RasterImage::from_dynamic(DynamicImage::new_luma_a8(3, 2));
        assert_eq!(la.format(), PixelFormat::Rgb8);
        assert_eq!(la.data().len(), 3 * 2 * 3);

        let back = gray.to_dynamic().unwrap();
        assert_eq!(back.width(), 3);
        assert_eq!(back.height(), 2);
    }
}
