use anyhow::{Context, Result};
use boidbench::benchmark::{self, BenchmarkResult, Outcome};
use boidbench::{BenchmarkConfig, IndexKind, SimulationConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Boids spatial index microbenchmark", long_about = None)]
struct Args {
    /// World width
    #[arg(long, default_value_t = 1200.0)]
    width: f64,

    /// World height
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Neighbor radius
    #[arg(short, long, default_value_t = 50.0)]
    radius: f64,

    /// Unmeasured steps before timing starts
    #[arg(long, default_value_t = 50)]
    warmup: usize,

    /// Measured steps per configuration
    #[arg(long, default_value_t = 200)]
    steps: usize,

    /// Boid counts to benchmark, comma separated
    #[arg(short, long, value_delimiter = ',', default_values_t = [100, 500, 1000, 2500, 5000])]
    counts: Vec<usize>,

    /// Spatial index to benchmark (naive, quadtree, kdtree, spatial-hash); repeat for several, all by default
    #[arg(short, long)]
    index: Vec<IndexKind>,

    /// Skip the naive index above this boid count
    #[arg(long, default_value_t = 1000)]
    naive_limit: usize,

    /// Seed for boid spawning and random walkers
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Print results as JSON instead of a markdown table
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn print_row(result: &BenchmarkResult) {
    match result.outcome {
        Outcome::Measured { avg_iteration_ms } => println!(
            "| {:<15} | {:<10} | {:<24.4} |",
            result.index, result.boid_count, avg_iteration_ms
        ),
        Outcome::Skipped => println!(
            "| {:<15} | {:<10} | {:<24} |",
            result.index, result.boid_count, "SKIPPED (Too slow)"
        ),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let config = BenchmarkConfig {
        width: args.width,
        height: args.height,
        warmup_steps: args.warmup,
        benchmark_steps: args.steps,
        neighbor_radius: args.radius,
        boid_counts: args.counts,
        naive_limit: args.naive_limit,
        simulation: SimulationConfig {
            seed: args.seed,
            ..SimulationConfig::default()
        },
    };
    let kinds = if args.index.is_empty() {
        IndexKind::ALL.to_vec()
    } else {
        args.index
    };

    log::info!("Starting Boids Microbenchmark...");
    log::info!(
        "Dimensions: {}x{}, Radius: {:.1}",
        config.width,
        config.height,
        config.neighbor_radius
    );
    log::info!(
        "Warmup: {} steps, Benchmark: {} steps",
        config.warmup_steps,
        config.benchmark_steps
    );

    if args.json {
        let results = benchmark::run_suite(&config, &kinds, |_| {})
            .context("invalid benchmark configuration")?;
        println!(
            "{}",
            serde_json::to_string_pretty(&results).context("failed to serialize results")?
        );
        return Ok(());
    }

    println!("| Spatial Index   | Boid Count | Avg. Iteration Time (ms) |");
    println!("|-----------------|------------|--------------------------|");
    benchmark::run_suite(&config, &kinds, print_row).context("invalid benchmark configuration")?;

    Ok(())
}
