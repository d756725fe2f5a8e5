use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunables of a [`FlockSimulation`](crate::FlockSimulation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Upper bound on every boid's speed after integration.
    pub max_speed: f64,
    /// Cap applied to each steering force component.
    pub max_force: f64,
    /// Fraction of spawned boids that random-walk instead of flocking.
    pub random_walker_ratio: f64,
    /// Seed for boid spawning and the random-walk behavior.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_speed: 4.0,
            max_force: 0.1,
            random_walker_ratio: 0.1,
            seed: 1,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_speed > 0.0 && self.max_speed.is_finite()) {
            return Err(ConfigError::InvalidLimit {
                name: "max_speed",
                value: self.max_speed,
            });
        }
        if !(self.max_force > 0.0 && self.max_force.is_finite()) {
            return Err(ConfigError::InvalidLimit {
                name: "max_force",
                value: self.max_force,
            });
        }
        if !(0.0..=1.0).contains(&self.random_walker_ratio) {
            return Err(ConfigError::InvalidRatio(self.random_walker_ratio));
        }
        Ok(())
    }
}
