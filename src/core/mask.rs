use ndarray::Array2;

use crate::error::{Error, Result};

/// `H x W` grid of 0 (background) and 1 (foreground) cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    cells: Array2<u8>,
}

impl BinaryMask {
    /// Wrap an array whose values are all 0 or 1.
    pub fn from_array(cells: Array2<u8>) -> Result<Self> {
        if let Some(((i, j), v)) = cells.indexed_iter().find(|(_, v)| **v > 1) {
            return Err(Error::ShapeMismatch(format!(
                "mask cell ({}, {}) holds {} but must be 0 or 1",
                i, j, v
            )));
        }
        Ok(Self { cells })
    }

    pub(crate) fn from_binary_unchecked(cells: Array2<u8>) -> Self {
        Self { cells }
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// `(rows, cols)`
    pub fn dim(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<u8> {
        self.cells.get((i, j)).copied()
    }

    pub fn as_array(&self) -> &Array2<u8> {
        &self.cells
    }

    pub fn into_array(self) -> Array2<u8> {
        self.cells
    }

    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 1).count()
    }

    /// Share of foreground cells in `[0, 1]`; 0 for an empty mask.
    pub fn foreground_ratio(&self) -> f64 {
        let total = self.cells.len();
        if total == 0 {
            return 0.0;
        }
        self.foreground_count() as f64 / total as f64
    }
}
