use tracing::info;

use crate::core::processing::resize::{calculate_fit_dimensions, resize_raster};
use crate::core::raster::RasterImage;
use crate::error::{Error, Result};
use crate::types::{CropAndScale, ResizePolicy};

/// Model-ready image plus the crop/scale option to forward with the inference request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImage {
    pub image: RasterImage,
    pub crop_and_scale: CropAndScale,
}

/// Bring `source` towards `target_size` (width, height) according to `policy`.
///
/// `CenterCropAfterFill` returns the source untouched; the engine performs the
/// fill-and-crop at request time. `ScaleToFitExact` scales by the smaller axis
/// ratio, so a 512x256 source with a 256x256 target yields 256x128.
pub fn prepare(
    source: RasterImage,
    target_size: (u32, u32),
    policy: ResizePolicy,
) -> Result<PreparedImage> {
    let (source_width, source_height) = source.dimensions();
    if source_width == 0 || source_height == 0 {
        return Err(Error::dimensions(source_width, source_height));
    }
    let (target_width, target_height) = target_size;
    if target_width == 0 || target_height == 0 {
        return Err(Error::dimensions(target_width, target_height));
    }

    let crop_and_scale = policy.crop_and_scale();
    let image = match policy {
        ResizePolicy::CenterCropAfterFill => {
            info!(
                "Passing {}x{} through; engine will {}",
                source_width, source_height, crop_and_scale
            );
            source
        }
        ResizePolicy::ScaleToFitExact => {
            let (new_width, new_height) =
                calculate_fit_dimensions(source_width, source_height, target_width, target_height);
            info!(
                "Original size: {}x{}, New size: {}x{} (target {}x{})",
                source_width, source_height, new_width, new_height, target_width, target_height
            );
            resize_raster(&source, new_width, new_height, None)?
        }
    };

    Ok(PreparedImage {
        image,
        crop_and_scale,
    })
}
