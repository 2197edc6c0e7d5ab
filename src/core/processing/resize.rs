use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use tracing::{debug, info};

use crate::core::raster::RasterImage;
use crate::error::{Error, Result};
use crate::types::PixelFormat;

/// Source-space rectangle `(left, top, width, height)` to sample from.
pub type CropBox = (f64, f64, f64, f64);

/// Aspect-preserving fit: scale both axes by the smaller of the two ratios.
///
/// The result is not padded, so one axis may end up shorter than the target.
pub fn calculate_fit_dimensions(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> (u32, u32) {
    let width_ratio = target_width as f64 / source_width as f64;
    let height_ratio = target_height as f64 / source_height as f64;
    let ratio = width_ratio.min(height_ratio);

    let new_width = ((source_width as f64 * ratio).round() as u32).max(1);
    let new_height = ((source_height as f64 * ratio).round() as u32).max(1);

    debug!(
        "Fit ratios: width={:.4}, height={:.4}, chosen={:.4}",
        width_ratio, height_ratio, ratio
    );
    (new_width, new_height)
}

/// Region of the source that, scaled by the larger axis ratio, exactly covers
/// the target box. The overflow on the other axis is cropped evenly.
pub fn calculate_fill_crop(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> CropBox {
    let width_ratio = target_width as f64 / source_width as f64;
    let height_ratio = target_height as f64 / source_height as f64;
    let ratio = width_ratio.max(height_ratio);

    let crop_width = (target_width as f64 / ratio).min(source_width as f64);
    let crop_height = (target_height as f64 / ratio).min(source_height as f64);
    let left = (source_width as f64 - crop_width) / 2.0;
    let top = (source_height as f64 - crop_height) / 2.0;
    (left, top, crop_width, crop_height)
}

fn pixel_type(format: PixelFormat) -> PixelType {
    match format {
        PixelFormat::Luma8 => PixelType::U8,
        PixelFormat::Rgb8 => PixelType::U8x3,
        PixelFormat::Rgba8 => PixelType::U8x4,
    }
}

/// Resample `image` to `target_width x target_height` with Lanczos3,
/// optionally sampling only the `crop` region of the source.
pub fn resize_raster(
    image: &RasterImage,
    target_width: u32,
    target_height: u32,
    crop: Option<CropBox>,
) -> Result<RasterImage> {
    if target_width == 0 || target_height == 0 {
        return Err(Error::dimensions(target_width, target_height));
    }
    if crop.is_none() && image.dimensions() == (target_width, target_height) {
        return Ok(image.clone());
    }

    info!(
        "Resizing {}x{} -> {}x{}",
        image.width(),
        image.height(),
        target_width,
        target_height
    );

    let mut resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    if let Some((left, top, width, height)) = crop {
        resize_options = resize_options.crop(left, top, width, height);
    }
    let mut resizer = Resizer::new();

    let format = image.format();
    let src_image = Image::from_vec_u8(
        image.width(),
        image.height(),
        image.data().to_vec(),
        pixel_type(format),
    )
    .map_err(Error::external)?;
    let mut dst_image = Image::new(target_width, target_height, pixel_type(format));
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::external)?;

    RasterImage::new(target_width, target_height, format, dst_image.into_vec())
}
