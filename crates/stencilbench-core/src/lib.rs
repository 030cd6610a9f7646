//! # stencilbench-core
//!
//! Generic stencil updater for grid simulations: recompute each cell of a
//! grid from a fixed local neighborhood pattern, under periodic (toroidal),
//! masked (NaN-excluding), or open boundary semantics.
//!
//! The same pass drives both simulations in this workspace: the discrete
//! Game of Life rule table and the continuous temperature diffusion rule
//! are two implementations of [`LocalRule`], so neighbor gathering, the
//! boundary policies, and the rayon-parallel cell loop exist exactly once.
//!
//! ## Example
//!
//! ```
//! use stencilbench_core::{
//!     BoundaryPolicy, Grid, NeighborOffsets, RuleTable, StencilUpdater,
//! };
//!
//! # fn main() -> stencilbench_core::Result<()> {
//! let updater = StencilUpdater::new(NeighborOffsets::moore_2d(), BoundaryPolicy::Periodic);
//! let rule = RuleTable::conway();
//!
//! let mut grid = Grid::new([8, 8], 0u8)?;
//! grid.set([3, 3], 1);
//!
//! let next = updater.step(&grid, &rule)?;
//! assert!(next.as_slice().iter().all(|&c| c == 0)); // a lone cell dies
//! # Ok(())
//! # }
//! ```

mod boundary;
mod error;
mod grid;
mod offsets;
mod rule;
mod updater;

pub use boundary::BoundaryPolicy;
pub use error::{Result, StencilError};
pub use grid::Grid;
pub use offsets::NeighborOffsets;
pub use rule::{LocalRule, RuleTable};
pub use updater::{ExecutionMode, StencilUpdater, PARALLEL_THRESHOLD};
