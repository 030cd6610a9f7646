//! Game of Life CLI.
//!
//! Run with: cargo run -p stencilbench-life --bin life --release

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use stencilbench_life::{stamp, LifeGrid, LifeSimulation, Pattern};

/// Conway's Game of Life on a toroidal grid
#[derive(Parser)]
#[command(name = "life")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid dimension (N x N)
    #[arg(long, default_value_t = 100)]
    size: usize,

    /// Number of generations
    #[arg(long, default_value_t = 50)]
    timesteps: usize,

    /// Initial alive probability (0-1), ignored when --pattern is given
    #[arg(long, default_value_t = 0.2)]
    p_alive: f64,

    /// RNG seed for a reproducible board
    #[arg(long)]
    seed: Option<u64>,

    /// Seed the board with a single pattern instead of random cells
    #[arg(long, value_enum)]
    pattern: Option<PatternArg>,

    /// Execution strategy for the cell loop
    #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
    mode: ModeArg,

    /// Write the final board as 0/1 text rows
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

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PatternArg {
    Block,
    Blinker,
    Glider,
}

impl From<PatternArg> for Pattern {
    fn from(pattern: PatternArg) -> Self {
        match pattern {
            PatternArg::Block => Self::Block,
            PatternArg::Blinker => Self::Blinker,
            PatternArg::Glider => Self::Glider,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let grid = match args.pattern {
        Some(pattern) => {
            let mut grid = LifeGrid::dead(args.size, args.size)?;
            stamp(&mut grid, pattern.into(), args.size / 2, args.size / 2);
            grid
        }
        None => LifeGrid::random(args.size, args.size, args.p_alive, args.seed)?,
    };

    tracing::info!(
        size = args.size,
        timesteps = args.timesteps,
        population = grid.population(),
        mode = ?args.mode,
        "starting simulation"
    );

    let mut sim = LifeSimulation::new(grid).with_mode(args.mode.into());

    let pb = ProgressBar::new(args.timesteps as u64);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({per_sec})")?
            .progress_chars("=> "),
    );
    pb.set_message("generations");

    let start = std::time::Instant::now();
    for _ in 0..args.timesteps {
        sim.step()?;
        pb.inc(1);
    }
    pb.finish();

    let elapsed = start.elapsed();
    tracing::info!(
        generations = sim.generation(),
        population = sim.population(),
        total_secs = elapsed.as_secs_f64(),
        avg_step_ms = elapsed.as_secs_f64() * 1000.0 / args.timesteps.max(1) as f64,
        "simulation finished"
    );

    if let Some(path) = &args.output {
        write_board(&sim.grid(), path)
            .with_context(|| format!("writing final board to {}", path.display()))?;
        tracing::info!(path = %path.display(), "final board written");
    }

    Ok(())
}

fn write_board(grid: &LifeGrid, path: &PathBuf) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for row in grid.rows() {
        let line: String = row.iter().map(|&c| if c == 1 { '1' } else { '0' }).collect();
        writeln!(out, "{line}")?;
    }
    out.flush()
}
