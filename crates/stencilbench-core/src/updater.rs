//! The stencil updater: one generic pass shared by every simulation.
//!
//! A step reads only the previous grid and writes only the next grid, so
//! cells within a step have no ordering dependency. The parallel path
//! splits the output buffer into last-axis rows and hands each row to
//! rayon; the source grid is shared read-only across workers.

use rayon::prelude::*;

use crate::boundary::BoundaryPolicy;
use crate::error::{Result, StencilError};
use crate::grid::Grid;
use crate::offsets::NeighborOffsets;
use crate::rule::LocalRule;

/// How the cell loop of a single step is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Plain nested loops on the calling thread.
    Sequential,
    /// Rayon row-parallel cell loop.
    Parallel,
    /// Sequential below [`PARALLEL_THRESHOLD`] total cells, parallel above.
    #[default]
    Auto,
}

/// Grid size at which `Auto` switches to the parallel path.
///
/// 512x512 = 262K cells, a good balance of work vs. thread overhead.
pub const PARALLEL_THRESHOLD: usize = 1 << 18;

/// Produces `grid[t+1]` from `grid[t]` in one synchronous pass.
///
/// The updater is stateless between calls; the only state is the external
/// grid sequence it is applied to.
#[derive(Debug, Clone)]
pub struct StencilUpdater<const N: usize> {
    offsets: NeighborOffsets<N>,
    boundary: BoundaryPolicy,
    mode: ExecutionMode,
}

impl<const N: usize> StencilUpdater<N> {
    /// Create an updater with the default `Auto` execution mode.
    pub fn new(offsets: NeighborOffsets<N>, boundary: BoundaryPolicy) -> Self {
        Self {
            offsets,
            boundary,
            mode: ExecutionMode::default(),
        }
    }

    /// Select a fixed execution mode.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// The boundary policy this updater applies.
    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// The neighbor offsets this updater applies.
    pub fn offsets(&self) -> &NeighborOffsets<N> {
        &self.offsets
    }

    /// Compute one step from `src` into the caller-provided `dst` buffer.
    ///
    /// `src` is never mutated; every cell of `dst` is overwritten. The two
    /// grids must have identical shapes.
    pub fn step_into<R>(&self, src: &Grid<R::Cell, N>, dst: &mut Grid<R::Cell, N>, rule: &R) -> Result<()>
    where
        R: LocalRule + Sync,
    {
        if src.shape() != dst.shape() {
            return Err(StencilError::invalid_shape(format!(
                "source shape {:?} does not match destination shape {:?}",
                src.shape(),
                dst.shape()
            )));
        }

        let row_len = src.row_len();
        let parallel = match self.mode {
            ExecutionMode::Sequential => false,
            ExecutionMode::Parallel => true,
            ExecutionMode::Auto => src.len() >= PARALLEL_THRESHOLD,
        };

        if parallel {
            dst.as_mut_slice()
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(row, out_row)| {
                    self.process_row(src, out_row, row, rule);
                });
        } else {
            for (row, out_row) in dst.as_mut_slice().chunks_mut(row_len).enumerate() {
                self.process_row(src, out_row, row, rule);
            }
        }
        Ok(())
    }

    /// Allocating convenience wrapper around [`step_into`].
    ///
    /// [`step_into`]: StencilUpdater::step_into
    pub fn step<R>(&self, grid: &Grid<R::Cell, N>, rule: &R) -> Result<Grid<R::Cell, N>>
    where
        R: LocalRule + Sync,
    {
        let mut next = grid.clone();
        self.step_into(grid, &mut next, rule)?;
        Ok(next)
    }

    /// Run `steps` consecutive passes, double-buffered.
    ///
    /// Steps are strictly serialized: step `t+1` reads nothing until step
    /// `t` is fully committed. Zero steps is the identity.
    pub fn run<R>(&self, grid: Grid<R::Cell, N>, steps: usize, rule: &R) -> Result<Grid<R::Cell, N>>
    where
        R: LocalRule + Sync,
    {
        tracing::debug!(steps, mode = ?self.mode, shape = ?grid.shape(), "running stencil");
        let mut current = grid;
        let mut next = current.clone();
        for _ in 0..steps {
            self.step_into(&current, &mut next, rule)?;
            std::mem::swap(&mut current, &mut next);
        }
        Ok(current)
    }

    /// Like [`run`], but also records the grid before each step.
    ///
    /// The returned history holds states `0..steps`; the final grid is
    /// returned separately.
    ///
    /// [`run`]: StencilUpdater::run
    pub fn run_recorded<R>(
        &self,
        grid: Grid<R::Cell, N>,
        steps: usize,
        rule: &R,
    ) -> Result<(Grid<R::Cell, N>, Vec<Grid<R::Cell, N>>)>
    where
        R: LocalRule + Sync,
    {
        let mut history = Vec::with_capacity(steps);
        let mut current = grid;
        let mut next = current.clone();
        for _ in 0..steps {
            history.push(current.clone());
            self.step_into(&current, &mut next, rule)?;
            std::mem::swap(&mut current, &mut next);
        }
        Ok((current, history))
    }

    /// Recompute one output row.
    fn process_row<R>(&self, src: &Grid<R::Cell, N>, out_row: &mut [R::Cell], row: usize, rule: &R)
    where
        R: LocalRule,
    {
        let shape = src.shape();
        let row_len = shape[N - 1];
        let base = row * row_len;
        let freeze_edges = self.boundary.freezes_outer_layer();
        let masked = self.boundary == BoundaryPolicy::Masked;

        // Decompose the row index into the leading N-1 coordinates.
        let mut coords = [0usize; N];
        let mut r = row;
        for axis in (0..N - 1).rev() {
            coords[axis] = r % shape[axis];
            r /= shape[axis];
        }
        let row_on_edge = (0..N - 1).any(|axis| coords[axis] == 0 || coords[axis] == shape[axis] - 1);

        for (x, out) in out_row.iter_mut().enumerate() {
            coords[N - 1] = x;
            let center = src.as_slice()[base + x];

            // The masked variant freezes the outermost layer and every
            // invalid cell: both keep their input value bit-identical.
            if freeze_edges
                && (row_on_edge || x == 0 || x == row_len - 1 || !rule.is_valid(center))
            {
                *out = center;
                continue;
            }

            let mut sum = R::Cell::default();
            let mut count = 0u32;
            for offset in self.offsets.iter() {
                if let Some(neighbor) = self.boundary.resolve(coords, *offset, shape) {
                    let value = src.get(neighbor);
                    if masked && !rule.is_valid(value) {
                        continue;
                    }
                    sum += value;
                    count += 1;
                }
            }
            *out = rule.apply(center, sum, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleTable;

    fn life_updater(mode: ExecutionMode) -> StencilUpdater<2> {
        StencilUpdater::new(NeighborOffsets::moore_2d(), BoundaryPolicy::Periodic).with_mode(mode)
    }

    fn grid_from(rows: &[[u8; 8]; 8]) -> Grid<u8, 2> {
        Grid::from_vec([8, 8], rows.iter().flatten().copied().collect()).unwrap()
    }

    /// Shift a grid on the torus by (dy, dx).
    fn shifted(grid: &Grid<u8, 2>, dy: usize, dx: usize) -> Grid<u8, 2> {
        let [h, w] = grid.shape();
        let mut out = Grid::new([h, w], 0u8).unwrap();
        for y in 0..h {
            for x in 0..w {
                out.set([(y + dy) % h, (x + dx) % w], grid.get([y, x]));
            }
        }
        out
    }

    #[test]
    fn test_zero_steps_is_identity() {
        let updater = life_updater(ExecutionMode::Sequential);
        let rule = RuleTable::conway();
        let mut grid = Grid::new([8, 8], 0u8).unwrap();
        grid.set([2, 3], 1);
        grid.set([4, 4], 1);

        let result = updater.run(grid.clone(), 0, &rule).unwrap();
        assert_eq!(result, grid);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let updater = life_updater(ExecutionMode::Sequential);
        let rule = RuleTable::conway();
        let src = Grid::new([4, 4], 0u8).unwrap();
        let mut dst = Grid::new([4, 5], 0u8).unwrap();

        let err = updater.step_into(&src, &mut dst, &rule).unwrap_err();
        assert!(matches!(err, StencilError::InvalidGridShape(_)));
    }

    #[test]
    fn test_periodic_translation_invariance() {
        // Stepping commutes with shifting on the torus.
        let updater = life_updater(ExecutionMode::Sequential);
        let rule = RuleTable::conway();
        let glider = grid_from(&[
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 1, 0, 0, 0, 0, 0],
            [0, 0, 0, 1, 0, 0, 0, 0],
            [0, 1, 1, 1, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
        ]);

        for &(dy, dx) in &[(1, 0), (0, 1), (3, 5), (7, 7)] {
            let step_then_shift = shifted(&updater.step(&glider, &rule).unwrap(), dy, dx);
            let shift_then_step = updater.step(&shifted(&glider, dy, dx), &rule).unwrap();
            assert_eq!(step_then_shift, shift_then_step, "shift ({dy}, {dx})");
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rule = RuleTable::conway();
        let mut grid = Grid::new([16, 16], 0u8).unwrap();
        // An arbitrary deterministic speckle.
        for y in 0..16 {
            for x in 0..16 {
                if (y * 31 + x * 17) % 5 == 0 {
                    grid.set([y, x], 1);
                }
            }
        }

        let sequential = life_updater(ExecutionMode::Sequential)
            .run(grid.clone(), 8, &rule)
            .unwrap();
        let parallel = life_updater(ExecutionMode::Parallel)
            .run(grid, 8, &rule)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_run_recorded_history() {
        let updater = life_updater(ExecutionMode::Sequential);
        let rule = RuleTable::conway();
        let mut grid = Grid::new([8, 8], 0u8).unwrap();
        grid.set([1, 1], 1);

        let (final_grid, history) = updater.run_recorded(grid.clone(), 3, &rule).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0], grid);
        // A lone cell dies after one step, and stays dead.
        assert!(history[1].as_slice().iter().all(|&c| c == 0));
        assert!(final_grid.as_slice().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_open_boundary_corner_has_three_neighbors() {
        // A 2x2 block in the corner survives under the open policy: each
        // cell sees exactly its 3 block companions, nothing wraps.
        let updater = StencilUpdater::new(NeighborOffsets::moore_2d(), BoundaryPolicy::Open)
            .with_mode(ExecutionMode::Sequential);
        let rule = RuleTable::conway();
        let mut grid = Grid::new([4, 4], 0u8).unwrap();
        for &c in &[[0, 0], [0, 1], [1, 0], [1, 1]] {
            grid.set(c, 1);
        }

        let next = updater.step(&grid, &rule).unwrap();
        assert_eq!(next, grid);
    }
}
