//! # stencilbench-life
//!
//! Conway's Game of Life on the stencilbench core: a toroidal board, the
//! canonical rule table, Bernoulli random initialization, and classic seed
//! patterns.
//!
//! ## Binaries
//!
//! - `life` — run a simulation from the command line, optionally writing
//!   the final board as text.
//! - `life-benchmark` — compare sequential and parallel execution across
//!   grid sizes.
//!
//! ```bash
//! cargo run -p stencilbench-life --bin life --release -- --size 500 --timesteps 100
//! ```

pub mod grid;
pub mod patterns;
pub mod sim;

pub use grid::LifeGrid;
pub use patterns::{stamp, Pattern};
pub use sim::LifeSimulation;
