//! Benchmark driver: warm up a simulation, then average the tick time over a
//! fixed number of measured steps for each index and boid count.

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::index::IndexKind;
use crate::simulation::FlockSimulation;
use serde::{Deserialize, Serialize};

/// Parameters of a benchmark suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub width: f64,
    pub height: f64,
    pub warmup_steps: usize,
    pub benchmark_steps: usize,
    pub neighbor_radius: f64,
    pub boid_counts: Vec<usize>,
    /// The brute-force index is skipped above this boid count.
    pub naive_limit: usize,
    pub simulation: SimulationConfig,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            warmup_steps: 50,
            benchmark_steps: 200,
            neighbor_radius: 50.0,
            boid_counts: vec![100, 500, 1000, 2500, 5000],
            naive_limit: 1000,
            simulation: SimulationConfig::default(),
        }
    }
}

impl BenchmarkConfig {
    /// Whether the driver leaves out `kind` at `boid_count` because it would
    /// take too long, not because it is wrong.
    pub fn should_skip(&self, kind: IndexKind, boid_count: usize) -> bool {
        kind == IndexKind::Naive && boid_count > self.naive_limit
    }
}

/// Result of one (index, boid count) configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Measured { avg_iteration_ms: f64 },
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub index: String,
    pub boid_count: usize,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Runs one configuration and returns the average iteration time in ms:
/// total measured time divided by the number of measured steps.
pub fn run_benchmark(
    config: &BenchmarkConfig,
    kind: IndexKind,
    boid_count: usize,
) -> Result<f64, ConfigError> {
    if config.benchmark_steps == 0 {
        return Err(ConfigError::InvalidLimit {
            name: "benchmark_steps",
            value: 0.0,
        });
    }

    let mut simulation = FlockSimulation::with_config(config.width, config.height, config.simulation)?;
    simulation.set_spatial_index(kind.create(config.width, config.height, config.neighbor_radius)?)?;
    simulation.set_neighbor_radius(config.neighbor_radius)?;
    simulation.set_boid_count(boid_count)?;

    for _ in 0..config.warmup_steps {
        simulation.update();
    }

    let mut total_ms = 0.0;
    for _ in 0..config.benchmark_steps {
        simulation.update();
        total_ms += simulation.last_iteration_time_ms();
    }

    let avg = total_ms / config.benchmark_steps as f64;
    log::debug!("{kind} with {boid_count} boids: {avg:.4} ms per iteration");
    Ok(avg)
}

/// Runs every `kinds` x `config.boid_counts` combination in order, calling
/// `on_result` as each finishes.
pub fn run_suite<F>(
    config: &BenchmarkConfig,
    kinds: &[IndexKind],
    mut on_result: F,
) -> Result<Vec<BenchmarkResult>, ConfigError>
where
    F: FnMut(&BenchmarkResult),
{
    let mut results = Vec::with_capacity(kinds.len() * config.boid_counts.len());

    for &kind in kinds {
        for &boid_count in &config.boid_counts {
            let outcome = if config.should_skip(kind, boid_count) {
                log::info!("skipping {kind} at {boid_count} boids (limit {})", config.naive_limit);
                Outcome::Skipped
            } else {
                Outcome::Measured {
                    avg_iteration_ms: run_benchmark(config, kind, boid_count)?,
                }
            };

            let result = BenchmarkResult {
                index: kind.name().to_string(),
                boid_count,
                outcome,
            };
            on_result(&result);
            results.push(result);
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_microbench_setup() {
        let config = BenchmarkConfig::default();
        assert_eq!((config.width, config.height), (1200.0, 800.0));
        assert_eq!(config.warmup_steps, 50);
        assert_eq!(config.benchmark_steps, 200);
        assert_eq!(config.neighbor_radius, 50.0);
        assert_eq!(config.naive_limit, 1000);
    }

    #[test]
    fn test_should_skip_only_naive_above_limit() {
        let config = BenchmarkConfig::default();
        assert!(!config.should_skip(IndexKind::Naive, 1000));
        assert!(config.should_skip(IndexKind::Naive, 1001));
        assert!(!config.should_skip(IndexKind::KdTree, 5000));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let config = BenchmarkConfig {
            benchmark_steps: 0,
            ..Default::default()
        };
        assert!(run_benchmark(&config, IndexKind::KdTree, 10).is_err());
    }
}
