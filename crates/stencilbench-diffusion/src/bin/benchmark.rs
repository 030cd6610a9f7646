//! Performance benchmark for the diffusion stencil.
//!
//! Run with: cargo run -p stencilbench-diffusion --bin diffusion-benchmark --release

use std::time::Instant;

use colored::Colorize;

use stencilbench_core::ExecutionMode;
use stencilbench_diffusion::{DiffusionEngine, TemperatureField, DEFAULT_DIFFUSION_COEFF};

fn main() {
    println!("{}", "Temperature Diffusion - Stencil Performance".bold());
    println!();

    let volumes = [(16, 32, 32), (24, 48, 48), (32, 64, 64), (48, 96, 96)];
    let steps = 50usize;
    let modes = [
        ("Sequential", ExecutionMode::Sequential),
        ("Parallel", ExecutionMode::Parallel),
        ("Auto", ExecutionMode::Auto),
    ];

    println!(
        "{:<16} {:>10} {:>12} {:>14} {:>12} {:>14}",
        "Volume", "Cells", "Ocean", "Mode", "Total (ms)", "Steps/sec"
    );
    println!("{}", "-".repeat(84));

    for &(depth, lat, lon) in &volumes {
        let field = TemperatureField::synthetic_basin(depth, lat, lon).expect("basin");
        let ocean = field.valid_count();

        for (name, mode) in modes {
            let mut engine =
                DiffusionEngine::new(field.clone(), DEFAULT_DIFFUSION_COEFF).with_mode(mode);

            let start = Instant::now();
            engine.run(steps).expect("run");
            let elapsed = start.elapsed();

            println!(
                "{:<16} {:>10} {:>12} {:>14} {:>12.1} {:>14.0}",
                format!("{}x{}x{}", depth, lat, lon),
                depth * lat * lon,
                ocean,
                name,
                elapsed.as_secs_f64() * 1000.0,
                steps as f64 / elapsed.as_secs_f64()
            );
        }
        println!();
    }
}
