//! The Life board.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use stencilbench_core::{Grid, Result};

/// A toroidal Game of Life board.
///
/// Cells are `u8` holding 0 (dead) or 1 (alive), stored row-major as
/// `[height, width]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeGrid {
    grid: Grid<u8, 2>,
}

impl LifeGrid {
    /// Create an all-dead board.
    pub fn dead(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            grid: Grid::new([height, width], 0)?,
        })
    }

    /// Create a board populated by independent Bernoulli draws.
    ///
    /// Each cell starts alive with probability `p_alive` (clamped to
    /// `0.0..=1.0`). A fixed `seed` makes the board reproducible; `None`
    /// seeds from system entropy.
    pub fn random(width: usize, height: usize, p_alive: f64, seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let p = p_alive.clamp(0.0, 1.0);
        let mut grid = Grid::new([height, width], 0u8)?;
        for cell in grid.as_mut_slice() {
            *cell = u8::from(rng.gen_bool(p));
        }
        Ok(Self { grid })
    }

    /// Build a board from explicit rows, for fixtures and tests.
    ///
    /// Every row must have the same length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        for row in rows {
            if row.len() != width {
                return Err(stencilbench_core::StencilError::invalid_shape(format!(
                    "ragged rows: expected width {}, got {}",
                    width,
                    row.len()
                )));
            }
        }
        let data = rows.iter().flatten().copied().collect();
        Ok(Self {
            grid: Grid::from_vec([height, width], data)?,
        })
    }

    /// Board width (number of columns).
    #[inline]
    pub fn width(&self) -> usize {
        self.grid.shape()[1]
    }

    /// Board height (number of rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.grid.shape()[0]
    }

    /// Read a cell.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.grid.get([y, x])
    }

    /// Write a cell (any nonzero value counts as alive).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        self.grid.set([y, x], u8::from(alive));
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.grid.as_slice().iter().map(|&c| c as usize).sum()
    }

    /// Iterate over the board rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.grid.as_slice().chunks(self.width())
    }

    /// Borrow the underlying grid.
    #[inline]
    pub fn as_grid(&self) -> &Grid<u8, 2> {
        &self.grid
    }

    /// Unwrap into the underlying grid.
    #[inline]
    pub fn into_grid(self) -> Grid<u8, 2> {
        self.grid
    }

    /// Wrap an existing grid.
    #[inline]
    pub fn from_grid(grid: Grid<u8, 2>) -> Self {
        Self { grid }
    }
}
