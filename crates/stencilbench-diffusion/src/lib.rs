//! # stencilbench-diffusion
//!
//! Masked 3D ocean-temperature diffusion on the stencilbench core. Each
//! timestep moves every ocean cell toward the average of its valid face
//! neighbors; NaN cells (land, sea floor) and the outermost grid layer are
//! never touched.
//!
//! ## Binaries
//!
//! - `diffuse` — run the model over a synthetic basin, optionally writing
//!   the final volume as text.
//! - `diffusion-benchmark` — compare sequential and parallel execution
//!   across volume sizes.
//!
//! ```bash
//! cargo run -p stencilbench-diffusion --bin diffuse --release -- --timesteps 300
//! ```

pub mod engine;
pub mod field;

pub use engine::{DiffusionEngine, DiffusionRule, DEFAULT_DIFFUSION_COEFF};
pub use field::{FieldSummary, TemperatureField};
