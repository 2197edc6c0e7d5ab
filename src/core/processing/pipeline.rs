use tracing::{info, warn};

use crate::core::mask::BinaryMask;
use crate::core::params::SegmentationParams;
use crate::core::processing::display::to_display_image;
use crate::core::processing::prepare::prepare;
use crate::core::processing::threshold::threshold;
use crate::core::raster::RasterImage;
use crate::core::tensor::Tensor3D;
use crate::error::{Error, Result};
use crate::inference::InferenceEngine;
use crate::types::CropAndScale;

/// Result of one segmentation request.
#[derive(Debug, Clone)]
pub struct SegmentationOutput {
    pub mask: BinaryMask,
    pub display: RasterImage,
    pub crop_and_scale: CropAndScale,
}

/// Threshold a probability tensor and render it, checking its spatial shape
/// against `params.expected_output` first.
pub fn extract_mask(
    tensor: &Tensor3D<'_>,
    params: &SegmentationParams,
) -> Result<(BinaryMask, RasterImage)> {
    if let Some((rows, cols)) = params.expected_output {
        if (tensor.height(), tensor.width()) != (rows, cols) {
            return Err(Error::ShapeMismatch(format!(
                "expected {}x{} probability map, got {}x{}",
                rows,
                cols,
                tensor.height(),
                tensor.width()
            )));
        }
    }
    let mask = threshold(tensor, params.cutoff)?;
    let display = to_display_image(&mask, params.display.min, params.display.max)?;
    Ok((mask, display))
}

/// Caller-owned pairing of an inference engine with fixed parameters.
///
/// Each call to [`segment`](Self::segment) is independent; the session keeps
/// no per-request state.
pub struct SegmentationSession<E: InferenceEngine> {
    engine: E,
    params: SegmentationParams,
}

impl<E: InferenceEngine> SegmentationSession<E> {
    pub fn new(engine: E, params: SegmentationParams) -> Result<Self> {
        params.validate()?;
        info!(
            "Session ready: engine={}, policy={}, target={}, cutoff={}",
            engine.name(),
            params.policy,
            params.target_size,
            params.cutoff
        );
        Ok(Self { engine, params })
    }

    pub fn params(&self) -> &SegmentationParams {
        &self.params
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn segment(&mut self, source: RasterImage) -> Result<SegmentationOutput> {
        let size = self.params.target_size;
        let prepared = prepare(source, (size, size), self.params.policy)?;

        let tensor = self
            .engine
            .predict(&prepared.image, prepared.crop_and_scale)
            .map_err(|e| match e {
                Error::InferenceFailed(_) => e,
                other => Error::InferenceFailed(format!("{}: {}", self.engine.name(), other)),
            })?;
        if tensor.is_empty() {
            warn!("{} returned an empty tensor", self.engine.name());
            return Err(Error::InferenceFailed(format!(
                "{} returned an empty tensor {:?}",
                self.engine.name(),
                tensor.shape()
            )));
        }

        let (mask, display) = extract_mask(&tensor.view(), &self.params)?;
        info!(
            "Segmented: {}x{} mask, {:.2}% foreground",
            mask.width(),
            mask.height(),
            mask.foreground_ratio() * 100.0
        );
        Ok(SegmentationOutput {
            mask,
            display,
            crop_and_scale: prepared.crop_and_scale,
        })
    }
}
