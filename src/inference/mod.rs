//! Boundary to the external segmentation model.
//!
//! DeepTor does not run models itself. An [`InferenceEngine`] receives the
//! prepared image together with the request-time [`CropAndScale`] option and
//! returns the raw probability tensor. Engines that cannot apply the option
//! natively can call [`apply_crop_and_scale`] before feeding their runtime.
use tracing::{debug, warn};

use crate::core::processing::resize::{calculate_fill_crop, resize_raster};
use crate::core::raster::RasterImage;
use crate::core::tensor::ProbabilityTensor;
use crate::error::{Error, Result};
use crate::types::CropAndScale;

pub trait InferenceEngine {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Run the model on `image`, cropping/scaling it as `crop_and_scale` requests.
    fn predict(
        &mut self,
        image: &RasterImage,
        crop_and_scale: CropAndScale,
    ) -> Result<ProbabilityTensor>;
}

impl<E: InferenceEngine + ?Sized> InferenceEngine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict(
        &mut self,
        image: &RasterImage,
        crop_and_scale: CropAndScale,
    ) -> Result<ProbabilityTensor> {
        (**self).predict(image, crop_and_scale)
    }
}

/// Engine that replays a probability map computed ahead of time.
///
/// The tensor is handed out once; a second request reports `InferenceFailed`.
#[derive(Debug, Clone)]
pub struct PrecomputedEngine {
    name: String,
    tensor: Option<ProbabilityTensor>,
}

impl PrecomputedEngine {
    pub fn new(name: impl Into<String>, tensor: ProbabilityTensor) -> Self {
        Self {
            name: name.into(),
            tensor: Some(tensor),
        }
    }
}

impl InferenceEngine for PrecomputedEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(
        &mut self,
        image: &RasterImage,
        crop_and_scale: CropAndScale,
    ) -> Result<ProbabilityTensor> {
        debug!(
            "{}: serving precomputed result for {}x{} input ({})",
            self.name,
            image.width(),
            image.height(),
            crop_and_scale
        );
        self.tensor.take().ok_or_else(|| {
            warn!("{}: no precomputed result left", self.name);
            Error::InferenceFailed(format!("{} has no result for this request", self.name))
        })
    }
}

/// Bring `image` to exactly `target` the way the engine option describes.
///
/// `CenterCrop` scales by the larger ratio and crops the centered overflow;
/// `ScaleToFill` stretches both axes independently.
pub fn apply_crop_and_scale(
    image: &RasterImage,
    target: (u32, u32),
    crop_and_scale: CropAndScale,
) -> Result<RasterImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::dimensions(width, height));
    }
    let (target_width, target_height) = target;
    match crop_and_scale {
        CropAndScale::CenterCrop => {
            let crop = calculate_fill_crop(width, height, target_width, target_height);
            resize_raster(image, target_width, target_height, Some(crop))
        }
        CropAndScale::ScaleToFill => resize_raster(image, target_width, target_height, None),
    }
}
