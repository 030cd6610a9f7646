//! Ocean temperature diffusion CLI.
//!
//! Run with: cargo run -p stencilbench-diffusion --bin diffuse --release

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use stencilbench_diffusion::{DiffusionEngine, TemperatureField, DEFAULT_DIFFUSION_COEFF};

/// 3D masked temperature diffusion over a synthetic ocean basin
#[derive(Parser)]
#[command(name = "diffuse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of timesteps
    #[arg(long, default_value_t = 300)]
    timesteps: usize,

    /// Diffusion coefficient
    #[arg(long, default_value_t = DEFAULT_DIFFUSION_COEFF)]
    coeff: f64,

    /// Depth layers of the basin
    #[arg(long, default_value_t = 32)]
    depth: usize,

    /// Latitude rows of the basin
    #[arg(long, default_value_t = 64)]
    lat: usize,

    /// Longitude columns of the basin
    #[arg(long, default_value_t = 64)]
    lon: usize,

    /// Execution strategy for the cell loop
    #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
    mode: ModeArg,

    /// Write the final volume as text (shape header, one value per line)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Sequential,
    Parallel,
    Auto,
}

impl From<ModeArg> for stencilbench_core::ExecutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => Self::Sequential,
            ModeArg::Parallel => Self::Parallel,
            ModeArg::Auto => Self::Auto,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let field = TemperatureField::synthetic_basin(args.depth, args.lat, args.lon)?;
    tracing::info!(
        depth = args.depth,
        lat = args.lat,
        lon = args.lon,
        coeff = args.coeff,
        "initial field: {}",
        field.summary()
    );

    let mut engine = DiffusionEngine::new(field, args.coeff).with_mode(args.mode.into());

    let pb = ProgressBar::new(args.timesteps as u64);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({per_sec})")?
            .progress_chars("=> "),
    );
    pb.set_message("timesteps");

    let start = std::time::Instant::now();
    for _ in 0..args.timesteps {
        engine.step()?;
        pb.inc(1);
    }
    pb.finish();

    let elapsed = start.elapsed();
    let final_field = engine.field();
    tracing::info!(
        timesteps = args.timesteps,
        total_secs = elapsed.as_secs_f64(),
        avg_step_secs = elapsed.as_secs_f64() / args.timesteps.max(1) as f64,
        "final field: {}",
        final_field.summary()
    );

    if let Some(path) = &args.output {
        write_field(&final_field, path)
            .with_context(|| format!("writing final field to {}", path.display()))?;
        tracing::info!(path = %path.display(), "final field written");
    }

    Ok(())
}

fn write_field(field: &TemperatureField, path: &PathBuf) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{} {} {}", field.depth(), field.lat(), field.lon())?;
    for value in field.as_grid().as_slice() {
        writeln!(out, "{value}")?;
    }
    out.flush()
}
