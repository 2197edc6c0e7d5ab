//! Probability tensors as produced by the segmentation model.
//!
//! The model hands back a `(C, H, W)` array that is not guaranteed to be
//! contiguous: it may be a view into a larger buffer with padded rows or a
//! transposed layout. Every read therefore goes through [`Tensor3D::offset`],
//! which applies the explicit per-axis strides.
use crate::error::{Error, Result};

/// Borrowed, strided, read-only `(C, H, W)` view over `f32` samples.
#[derive(Debug, Clone, Copy)]
pub struct Tensor3D<'a> {
    data: &'a [f32],
    shape: [usize; 3],
    strides: [usize; 3],
}

impl<'a> Tensor3D<'a> {
    /// View `data` with the given shape and element strides.
    ///
    /// Fails with `ShapeMismatch` if any addressable cell lies past the end of `data`.
    pub fn new(data: &'a [f32], shape: [usize; 3], strides: [usize; 3]) -> Result<Self> {
        if let Some(last) = max_offset(shape, strides)? {
            if last >= data.len() {
                return Err(Error::ShapeMismatch(format!(
                    "shape {:?} with strides {:?} addresses offset {} but buffer holds {} values",
                    shape,
                    strides,
                    last,
                    data.len()
                )));
            }
        }
        Ok(Self {
            data,
            shape,
            strides,
        })
    }

    /// View `data` as a row-major contiguous tensor.
    pub fn contiguous(data: &'a [f32], shape: [usize; 3]) -> Result<Self> {
        Self::new(data, shape, contiguous_strides(shape))
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn strides(&self) -> [usize; 3] {
        self.strides
    }

    pub fn channels(&self) -> usize {
        self.shape[0]
    }

    pub fn height(&self) -> usize {
        self.shape[1]
    }

    pub fn width(&self) -> usize {
        self.shape[2]
    }

    #[inline]
    pub fn offset(&self, c: usize, i: usize, j: usize) -> usize {
        c * self.strides[0] + i * self.strides[1] + j * self.strides[2]
    }

    /// Sample at channel `c`, row `i`, column `j`.
    pub fn get(&self, c: usize, i: usize, j: usize) -> Option<f32> {
        if c >= self.shape[0] || i >= self.shape[1] || j >= self.shape[2] {
            return None;
        }
        self.data.get(self.offset(c, i, j)).copied()
    }
}

/// Owned probability buffer with its layout, as returned by an inference engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTensor {
    data: Vec<f32>,
    shape: [usize; 3],
    strides: [usize; 3],
}

impl ProbabilityTensor {
    pub fn contiguous(data: Vec<f32>, shape: [usize; 3]) -> Result<Self> {
        Self::with_strides(data, shape, contiguous_strides(shape))
    }

    pub fn with_strides(data: Vec<f32>, shape: [usize; 3], strides: [usize; 3]) -> Result<Self> {
        Tensor3D::new(&data, shape, strides)?;
        Ok(Self {
            data,
            shape,
            strides,
        })
    }

    /// Tensor of the given shape with every cell set to `value`.
    pub fn filled(shape: [usize; 3], value: f32) -> Self {
        Self {
            data: vec![value; shape.iter().product()],
            shape,
            strides: contiguous_strides(shape),
        }
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn is_empty(&self) -> bool {
        self.shape.iter().any(|&d| d == 0)
    }

    pub fn view(&self) -> Tensor3D<'_> {
        Tensor3D {
            data: &self.data,
            shape: self.shape,
            strides: self.strides,
        }
    }
}

pub fn contiguous_strides(shape: [usize; 3]) -> [usize; 3] {
    [shape[1] * shape[2], shape[2], 1]
}

/// Largest offset any cell of `shape` maps to, or `None` for an empty shape.
fn max_offset(shape: [usize; 3], strides: [usize; 3]) -> Result<Option<usize>> {
    if shape.iter().any(|&d| d == 0) {
        return Ok(None);
    }
    let mut last = 0usize;
    for (dim, stride) in shape.iter().zip(strides.iter()) {
        last = (dim - 1)
            .checked_mul(*stride)
            .and_then(|v| last.checked_add(v))
            .ok_or_else(|| {
                Error::ShapeMismatch(format!(
                    "shape {:?} with strides {:?} overflows addressable memory",
                    shape, strides
                ))
            })?;
    }
    Ok(Some(last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_offsets_are_row_major() {
        let data: Vec<f32> = (0..24).map(|v| v as f32).collect();
        let t = Tensor3D::contiguous(&data, [2, 3, 4]).unwrap();
        assert_eq!(t.strides(), [12, 4, 1]);
        assert_eq!(t.offset(1, 2, 3), 23);
        assert_eq!(t.get(0, 1, 2), Some(6.0));
        assert_eq!(t.get(0, 3, 0), None);
    }

    #[test]
    fn padded_rows_skip_the_padding() {
        // 2x3 spatial grid stored with rows of stride 5
        let mut data = vec![-1.0f32; 10];
        for i in 0..2 {
            for j in 0..3 {
                data[i * 5 + j] = (i * 10 + j) as f32;
            }
        }
        let t = Tensor3D::new(&data, [1, 2, 3], [10, 5, 1]).unwrap();
        assert_eq!(t.get(0, 1, 2), Some(12.0));
        assert_eq!(t.get(0, 0, 1), Some(1.0));
    }

    #[test]
    fn transposed_layout_is_addressed_by_strides() {
        // column-major storage of a 2x3 grid
        let data = vec![0.0f32, 10.0, 1.0, 11.0, 2.0, 12.0];
        let t = Tensor3D::new(&data, [1, 2, 3], [6, 1, 2]).unwrap();
        assert_eq!(t.get(0, 0, 2), Some(2.0));
        assert_eq!(t.get(0, 1, 0), Some(10.0));
    }

    #[test]
    fn out_of_bounds_layout_is_rejected() {
        let data = vec![0.0f32; 8];
        let err = Tensor3D::new(&data, [1, 3, 3], [9, 3, 1]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn empty_shape_needs_no_storage() {
        let t = Tensor3D::contiguous(&[], [1, 0, 256]).unwrap();
        assert_eq!(t.height(), 0);
        assert!(ProbabilityTensor::contiguous(vec![], [1, 0, 4]).unwrap().is_empty());
    }

    #[test]
    fn filled_tensor_has_contiguous_layout() {
        let t = ProbabilityTensor::filled([1, 4, 5], 0.25);
        let v = t.view();
        assert_eq!(v.strides(), [20, 5, 1]);
        assert_eq!(v.get(0, 3, 4), Some(0.25));
    }
}
