//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Covers the pipeline conditions (dimensions, tensor shape, display range,
//! inference) and converts underlying I/O, image codec, TIFF and JSON errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u64, height: u64 },

    #[error("Tensor shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid display range: min={min}, max={max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }

    pub(crate) fn dimensions(width: impl Into<u64>, height: impl Into<u64>) -> Self {
        Error::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        }
    }
}
