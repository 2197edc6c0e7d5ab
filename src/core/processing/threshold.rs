use ndarray::Array2;
use tracing::debug;

use crate::core::mask::BinaryMask;
use crate::core::tensor::Tensor3D;
use crate::error::{Error, Result};

/// Binarize channel 0 of `tensor`: a cell is foreground when its value is
/// `>= cutoff`, so a value exactly at the cutoff counts as foreground.
///
/// The comparison runs in the tensor's `f32` precision: `cutoff` is rounded to
/// the nearest `f32` first, so a cell stored as `0.7f32` is foreground at a
/// cutoff of `0.7`.
///
/// Cells are read through the tensor strides; the source may be a
/// non-contiguous view.
pub fn threshold(tensor: &Tensor3D<'_>, cutoff: f64) -> Result<BinaryMask> {
    let [channels, rows, cols] = tensor.shape();
    if rows == 0 || cols == 0 {
        return Err(Error::ShapeMismatch(format!(
            "spatial dimensions must be positive, got {}x{}",
            rows, cols
        )));
    }
    if channels != 1 {
        return Err(Error::ShapeMismatch(format!(
            "expected a single probability channel, got {}",
            channels
        )));
    }

    let cutoff32 = cutoff as f32;
    let mut cells = Array2::<u8>::zeros((rows, cols));
    for ((i, j), cell) in cells.indexed_iter_mut() {
        let value = tensor.get(0, i, j).ok_or_else(|| {
            Error::ShapeMismatch(format!("cell ({}, {}) is outside the tensor buffer", i, j))
        })?;
        if value >= cutoff32 {
            *cell = 1;
        }
    }

    let mask = BinaryMask::from_binary_unchecked(cells);
    debug!(
        "Thresholded {}x{} at {}: {} foreground cells",
        rows,
        cols,
        cutoff,
        mask.foreground_count()
    );
    Ok(mask)
}
