//! Shared types and enums used across DeepTor.
//! Includes `ResizePolicy`, the matching engine-side `CropAndScale` option,
//! `PixelFormat` and `OutputFormat`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Spatial resolution the segmentation model consumes.
pub const MODEL_INPUT_SIZE: u32 = 256;

/// Spatial resolution of the probability map the model produces.
pub const MODEL_OUTPUT_SIZE: usize = 256;

/// Foreground decision threshold used when none is configured.
pub const DEFAULT_CUTOFF: f64 = 0.5;

/// How source images are brought to the model input size.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum,
    Debug,
    Default,
    Serialize,
    Deserialize,
)]
pub enum ResizePolicy {
    /// Pass the image through; the inference engine fills the box and center-crops.
    #[default]
    CenterCropAfterFill,
    /// Uniformly scale by the smaller axis ratio before inference. No padding.
    ScaleToFitExact,
}

impl ResizePolicy {
    /// Request-time option forwarded to the inference engine.
    pub fn crop_and_scale(self) -> CropAndScale {
        match self {
            ResizePolicy::CenterCropAfterFill => CropAndScale::CenterCrop,
            ResizePolicy::ScaleToFitExact => CropAndScale::ScaleToFill,
        }
    }
}

impl std::fmt::Display for ResizePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizePolicy::CenterCropAfterFill => write!(f, "CenterCropAfterFill"),
            ResizePolicy::ScaleToFitExact => write!(f, "ScaleToFitExact"),
        }
    }
}

/// Crop/scale behaviour requested from the inference engine per call.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum CropAndScale {
    CenterCrop,
    ScaleToFill,
}

impl std::fmt::Display for CropAndScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropAndScale::CenterCrop => write!(f, "CenterCrop"),
            CropAndScale::ScaleToFill => write!(f, "ScaleToFill"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum PixelFormat {
    Luma8,
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Luma8 => 1,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Default,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum OutputFormat {
    TIFF,
    JPEG, // Lossy, preview only
    #[default]
    PNG,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::TIFF => "tiff",
            OutputFormat::JPEG => "jpg",
            OutputFormat::PNG => "png",
        }
    }
}
