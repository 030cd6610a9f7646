//! Performance benchmark for the Life stencil.
//!
//! Run with: cargo run -p stencilbench-life --bin life-benchmark --release

use std::time::Instant;

use colored::Colorize;

use stencilbench_core::ExecutionMode;
use stencilbench_life::{LifeGrid, LifeSimulation};

fn main() {
    println!("{}", "Game of Life - Stencil Performance".bold());
    println!();

    // =========================================================================
    // Part 1: Steps/sec per execution strategy
    // =========================================================================
    println!("{}", "PART 1: Execution strategy comparison (100 steps)".bold());
    println!();

    let sizes = [50, 100, 250, 500, 1000];
    let steps = 100usize;
    let modes = [
        ("Sequential", ExecutionMode::Sequential),
        ("Parallel", ExecutionMode::Parallel),
        ("Auto", ExecutionMode::Auto),
    ];

    println!(
        "{:<12} {:>12} {:>14} {:>12} {:>12}",
        "Grid Size", "Cells", "Mode", "Total (ms)", "Steps/sec"
    );
    println!("{}", "-".repeat(66));

    for &size in &sizes {
        for (name, mode) in modes {
            let grid = LifeGrid::random(size, size, 0.2, Some(1234)).expect("grid");
            let mut sim = LifeSimulation::new(grid).with_mode(mode);

            let start = Instant::now();
            sim.run(steps).expect("run");
            let elapsed = start.elapsed();

            println!(
                "{:<12} {:>12} {:>14} {:>12.1} {:>12.0}",
                format!("{}x{}", size, size),
                size * size,
                name,
                elapsed.as_secs_f64() * 1000.0,
                steps as f64 / elapsed.as_secs_f64()
            );
        }
        println!();
    }

    // =========================================================================
    // Part 2: Cell throughput at a fixed large size
    // =========================================================================
    println!("{}", "PART 2: Cell throughput (1000x1000, 50 steps)".bold());
    println!();

    let size = 1000usize;
    let steps = 50usize;

    println!("{:<14} {:>18} {:>14}", "Mode", "Cells*Steps/sec", "Speedup");
    println!("{}", "-".repeat(48));

    let mut baseline = None;
    for (name, mode) in modes {
        let grid = LifeGrid::random(size, size, 0.2, Some(1234)).expect("grid");
        let mut sim = LifeSimulation::new(grid).with_mode(mode);

        let start = Instant::now();
        sim.run(steps).expect("run");
        let elapsed = start.elapsed().as_secs_f64();

        let throughput = (size * size * steps) as f64 / elapsed;
        let speedup = match baseline {
            None => {
                baseline = Some(elapsed);
                1.0
            }
            Some(base) => base / elapsed,
        };

        println!("{:<14} {:>18.0} {:>13.2}x", name, throughput, speedup);
    }
}
