//! Vivarium Simulator CLI
//!
//! Run deterministic multi-agent simulations of the action/reaction core.

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use vivarium_sim::{RunResult, Runner, SimConfig};

#[derive(Parser, Debug)]
#[command(name = "vivarium-sim")]
#[command(about = "Run deterministic Vivarium simulations", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of cells (polarizable nodes)
    #[arg(short, long, default_value = "6")]
    cells: usize,

    /// Number of inert particles
    #[arg(short, long, default_value = "2")]
    particles: usize,

    /// Ticks to run
    #[arg(short, long, default_value = "100")]
    ticks: u64,

    /// Divide one cell every N ticks (0 = never)
    #[arg(short, long, default_value = "0")]
    division_interval: u64,

    /// Number of consecutive seeds to test (for CI mode)
    #[arg(long, default_value = "1")]
    seeds: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    // Determine base seed
    let base_seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos() as u64
    } else {
        args.seed
    };

    let mut results: Vec<RunResult> = Vec::new();
    let mut failed_count = 0;

    for seed_offset in 0..args.seeds {
        let seed = base_seed.wrapping_add(seed_offset as u64);
        let config = SimConfig {
            seed,
            num_cells: args.cells,
            num_particles: args.particles,
            ticks: args.ticks,
            division_interval: args.division_interval,
            ..Default::default()
        };

        let result = Runner::new(config).run();
        if result.passed {
            info!(
                "✓ seed={} PASSED (fired={}, dropped={}, divisions={})",
                seed, result.fired, result.dropped, result.divisions
            );
        } else {
            error!(
                "✗ seed={} FAILED: {}",
                seed,
                result.failure_reason.as_deref().unwrap_or("unknown")
            );
            failed_count += 1;
        }
        results.push(result);
    }

    let total = results.len();
    if failed_count == 0 {
        info!("✅ All {} runs passed!", total);
    } else {
        error!("❌ {}/{} runs failed!", failed_count, total);
        for result in &results {
            if !result.passed {
                error!(
                    "  - seed={}: {}",
                    result.seed,
                    result.failure_reason.as_deref().unwrap_or("unknown")
                );
            }
        }
    }

    // Exit with proper code for CI
    if failed_count > 0 {
        std::process::exit(1);
    }
}
