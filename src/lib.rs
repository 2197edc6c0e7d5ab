#![doc = r#"
DeepTor — binary segmentation mask toolkit.

This crate sits on both sides of an external segmentation model (a sclera
U-Net in the reference setup). Before inference it brings source images to
the model input size; after inference it turns the model's probability map
into a clean 0/1 mask and a displayable black/white image. The model itself
is reached through the [`InferenceEngine`] trait and is never run by this
crate.

Add dependency
--------------
```toml
[dependencies]
deeptor = "0.1"
```

Prepare an image for the model
------------------------------
```rust
use deeptor::{prepare, PixelFormat, RasterImage, ResizePolicy};

fn main() -> deeptor::Result<()> {
    let source = RasterImage::filled(512, 256, PixelFormat::Rgb8, 0);
    let prepared = prepare(source, (256, 256), ResizePolicy::ScaleToFitExact)?;

    // Aspect ratio is kept and the short axis is not padded.
    assert_eq!(prepared.image.dimensions(), (256, 128));
    Ok(())
}
```

Threshold a probability map
---------------------------
```rust
use deeptor::{threshold, to_display_image, Tensor3D};

fn main() -> deeptor::Result<()> {
    let probs = vec![0.7_f32; 256 * 256];
    let tensor = Tensor3D::new(&probs, [1, 256, 256], [256 * 256, 256, 1])?;

    let mask = threshold(&tensor, 0.5)?;
    let display = to_display_image(&mask, 0.0, 1.0)?;
    assert!(display.data().iter().all(|&p| p == 255));
    Ok(())
}
```

Full request through a session
------------------------------
```rust
use deeptor::{
    PixelFormat, PrecomputedEngine, ProbabilityTensor, RasterImage, SegmentationParams,
    SegmentationSession,
};

fn main() -> deeptor::Result<()> {
    let engine = PrecomputedEngine::new("replay", ProbabilityTensor::filled([1, 256, 256], 0.9));
    let mut session = SegmentationSession::new(engine, SegmentationParams::default())?;

    let out = session.segment(RasterImage::filled(640, 480, PixelFormat::Rgb8, 0))?;
    assert_eq!(out.mask.foreground_count(), 256 * 256);
    Ok(())
}
```

Error handling
--------------
All public functions return `deeptor::Result<T>`; match on `deeptor::Error`
to handle specific cases.

```rust
use deeptor::{threshold, Error, Tensor3D};

let tensor = Tensor3D::new(&[], [1, 0, 256], [0, 256, 1]).unwrap();
match threshold(&tensor, 0.5) {
    Err(Error::ShapeMismatch(msg)) => eprintln!("bad tensor: {msg}"),
    Err(other) => eprintln!("other error: {other}"),
    Ok(_) => unreachable!(),
}
```

Useful modules
--------------
- [`api`] — file-based entry points and batch helpers.
- [`core`] — value types and the preparation/extraction stages.
- [`inference`] — the model boundary.
- [`io`] — readers and TIFF/JPEG/PNG writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod inference;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::mask::BinaryMask;
pub use crate::core::params::{DisplayRange, SegmentationParams};
pub use crate::core::raster::RasterImage;
pub use crate::core::tensor::{ProbabilityTensor, Tensor3D};
pub use error::{Error, Result};
pub use types::{
    CropAndScale, DEFAULT_CUTOFF, MODEL_INPUT_SIZE, MODEL_OUTPUT_SIZE, OutputFormat,
    PixelFormat, ResizePolicy,
};

// Stages
pub use crate::core::processing::display::to_display_image;
pub use crate::core::processing::pipeline::{SegmentationOutput, SegmentationSession, extract_mask};
pub use crate::core::processing::prepare::{PreparedImage, prepare};
pub use crate::core::processing::threshold::threshold;

// Inference boundary
pub use inference::{InferenceEngine, PrecomputedEngine, apply_crop_and_scale};

// High-level API re-exports
pub use api::{
    BatchReport, TensorLayout, mask_directory_to_path, mask_tensor_file_to_path,
    mask_tensor_to_path, prepare_image_to_path, segment_with_engine_to_path,
};
