//! The temperature volume.
//!
//! A depth x lat x lon scalar field where NaN marks land (or sea floor);
//! NaN cells are excluded from diffusion and never change.

use std::fmt;

use stencilbench_core::{Grid, Result};

/// A 3D ocean temperature field, shape `[depth, lat, lon]`.
#[derive(Debug, Clone)]
pub struct TemperatureField {
    grid: Grid<f64, 3>,
}

impl TemperatureField {
    /// Build a field from an externally supplied snapshot in row-major
    /// `[depth, lat, lon]` order. NaN values mark invalid (land) points.
    pub fn from_snapshot(depth: usize, lat: usize, lon: usize, values: Vec<f64>) -> Result<Self> {
        Ok(Self {
            grid: Grid::from_vec([depth, lat, lon], values)?,
        })
    }

    /// Generate a synthetic ocean basin for demos and benchmarks.
    ///
    /// Temperature falls off with depth from a warm surface toward a cold
    /// abyss. A coastal shelf along the low-longitude edge and a sloping
    /// sea floor are marked as land (NaN), giving the masked stencil a
    /// realistic mix of interior, coastline, and floor cells.
    pub fn synthetic_basin(depth: usize, lat: usize, lon: usize) -> Result<Self> {
        let mut grid = Grid::new([depth, lat, lon], f64::NAN)?;
        for d in 0..depth {
            // 16C at the surface decaying toward 2C at depth.
            let frac = d as f64 / depth.max(1) as f64;
            let base = 2.0 + 14.0 * (1.0 - frac).powi(2);
            for i in 0..lat {
                for j in 0..lon {
                    // Coastal shelf: land occupies the low-longitude edge,
                    // widening with latitude.
                    let shelf = 1 + (i * lon) / (lat * 8);
                    if j < shelf {
                        continue;
                    }
                    // Sloping sea floor: deeper cells exist only away from
                    // the coast.
                    let max_depth = depth * (j - shelf + 1) / lon.max(1) + depth / 2;
                    if d >= max_depth.min(depth) {
                        continue;
                    }
                    // Mild latitudinal gradient.
                    let value = base + 2.0 * (i as f64 / lat.max(1) as f64);
                    grid.set([d, i, j], value);
                }
            }
        }
        Ok(Self { grid })
    }

    /// Number of depth layers.
    #[inline]
    pub fn depth(&self) -> usize {
        self.grid.shape()[0]
    }

    /// Number of latitude rows.
    #[inline]
    pub fn lat(&self) -> usize {
        self.grid.shape()[1]
    }

    /// Number of longitude columns.
    #[inline]
    pub fn lon(&self) -> usize {
        self.grid.shape()[2]
    }

    /// Read one cell; NaN means land.
    #[inline]
    pub fn get(&self, d: usize, i: usize, j: usize) -> f64 {
        self.grid.get([d, i, j])
    }

    /// Write one cell.
    #[inline]
    pub fn set(&mut self, d: usize, i: usize, j: usize, value: f64) {
        self.grid.set([d, i, j], value);
    }

    /// Number of valid (non-NaN) cells.
    pub fn valid_count(&self) -> usize {
        self.grid.as_slice().iter().filter(|v| !v.is_nan()).count()
    }

    /// Summary statistics over the valid cells.
    pub fn summary(&self) -> FieldSummary {
        let mut values: Vec<f64> = self
            .grid
            .as_slice()
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .collect();
        if values.is_empty() {
            return FieldSummary::default();
        }
        values.sort_by(|a, b| a.total_cmp(b));
        let n = values.len();
        FieldSummary {
            mean: values.iter().sum::<f64>() / n as f64,
            min: values[0],
            max: values[n - 1],
            median: values[n / 2],
            valid_cells: n,
        }
    }

    /// Borrow the underlying grid.
    #[inline]
    pub fn as_grid(&self) -> &Grid<f64, 3> {
        &self.grid
    }

    /// Unwrap into the underlying grid.
    #[inline]
    pub fn into_grid(self) -> Grid<f64, 3> {
        self.grid
    }

    /// Wrap an existing grid.
    #[inline]
    pub fn from_grid(grid: Grid<f64, 3>) -> Self {
        Self { grid }
    }
}

/// Mean/min/max/median over the valid cells of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub valid_cells: usize,
}

impl fmt::Display for FieldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean {:.4}, min {:.4}, max {:.4}, median {:.4} over {} ocean cells",
            self.mean, self.min, self.max, self.median, self.valid_cells
        )
    }
}
