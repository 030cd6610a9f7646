//! N-dimensional grid storage.
//!
//! A flat `Vec<T>` in row-major order (last axis varies fastest), the same
//! layout for the 2D Life board and the 3D temperature volume. Indexing is
//! `idx = ((c0 * s1 + c1) * s2 + c2) ...` for shape `[s0, s1, s2, ...]`.

use crate::error::{Result, StencilError};

/// A fixed-shape rectangular array of cells.
///
/// The shape is validated at construction: every dimension must be nonzero
/// and the total cell count must not overflow `usize`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T, const N: usize> {
    shape: [usize; N],
    data: Vec<T>,
}

impl<T: Copy, const N: usize> Grid<T, N> {
    /// Create a grid with every cell set to `fill`.
    pub fn new(shape: [usize; N], fill: T) -> Result<Self> {
        let len = checked_len(&shape)?;
        Ok(Self {
            shape,
            data: vec![fill; len],
        })
    }

    /// Create a grid from existing row-major data.
    ///
    /// Fails with `InvalidGridShape` when the data length does not match
    /// the shape.
    pub fn from_vec(shape: [usize; N], data: Vec<T>) -> Result<Self> {
        let len = checked_len(&shape)?;
        if data.len() != len {
            return Err(StencilError::invalid_shape(format!(
                "shape {:?} requires {} cells, got {}",
                shape,
                len,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Grid shape, one extent per axis.
    #[inline]
    pub fn shape(&self) -> [usize; N] {
        self.shape
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid holds no cells. Never true for a constructed grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Convert coordinates to a linear index.
    #[inline]
    pub fn index_of(&self, coords: [usize; N]) -> usize {
        let mut idx = 0;
        for axis in 0..N {
            debug_assert!(coords[axis] < self.shape[axis]);
            idx = idx * self.shape[axis] + coords[axis];
        }
        idx
    }

    /// Read the cell at `coords`.
    #[inline]
    pub fn get(&self, coords: [usize; N]) -> T {
        self.data[self.index_of(coords)]
    }

    /// Write the cell at `coords`.
    #[inline]
    pub fn set(&mut self, coords: [usize; N], value: T) {
        let idx = self.index_of(coords);
        self.data[idx] = value;
    }

    /// The underlying row-major cell buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the underlying cell buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Length of the fastest-varying (last) axis.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.shape[N - 1]
    }
}

fn checked_len<const N: usize>(shape: &[usize; N]) -> Result<usize> {
    let mut len: usize = 1;
    for &extent in shape.iter() {
        if extent == 0 {
            return Err(StencilError::invalid_shape(format!(
                "zero-sized dimension in shape {:?}",
                shape
            )));
        }
        len = len.checked_mul(extent).ok_or_else(|| {
            StencilError::invalid_shape(format!("shape {:?} overflows usize", shape))
        })?;
    }
    Ok(len)
}
