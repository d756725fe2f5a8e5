//! Steering strategies that turn a boid and its neighbors into forces.
//!
//! A strategy only reads the boid and its neighbor list; the simulation caps
//! and applies the returned [`Forces`] itself.

use crate::boid::{Boid, BoidType};
use crate::config::SimulationConfig;
use crate::vector::Vector2D;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Offset between the simulation seed and the random-walk seed, so the two
/// streams differ while staying reproducible.
const RANDOM_WALK_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// The three steering components produced for one boid in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Forces {
    pub separation: Vector2D,
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
}

impl Forces {
    pub const ZERO: Forces = Forces {
        separation: Vector2D::ZERO,
        alignment: Vector2D::ZERO,
        cohesion: Vector2D::ZERO,
    };

    pub fn new(separation: Vector2D, alignment: Vector2D, cohesion: Vector2D) -> Self {
        Self {
            separation,
            alignment,
            cohesion,
        }
    }

    /// Uncapped sum of the three components.
    pub fn total(&self) -> Vector2D {
        self.separation + self.alignment + self.cohesion
    }
}

/// Trait defining how a boid reacts to its neighbors.
/// This allows swapping between flocking, random walk or custom behaviors.
pub trait BehaviorStrategy: Send {
    /// Compute the steering forces for `boid` given the boids found within the
    /// neighbor radius (never including `boid` itself).
    fn calculate_forces(&mut self, boid: &Boid, neighbors: &[&Boid]) -> Forces;

    fn name(&self) -> &'static str;
}

/// Weights and distances for [`FlockBehavior`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlockWeights {
    pub separation: f64,
    pub alignment: f64,
    pub cohesion: f64,
    /// Neighbors closer than this push the boid away.
    pub separation_distance: f64,
}

impl FlockWeights {
    pub fn standard() -> Self {
        Self {
            separation: 1.5,
            alignment: 1.0,
            cohesion: 1.0,
            separation_distance: 25.0,
        }
    }
}

impl Default for FlockWeights {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classic boids steering: separation, alignment and cohesion.
#[derive(Debug, Clone)]
pub struct FlockBehavior {
    weights: FlockWeights,
    max_speed: f64,
    max_force: f64,
}

impl FlockBehavior {
    pub fn new(weights: FlockWeights, max_speed: f64, max_force: f64) -> Self {
        Self {
            weights,
            max_speed,
            max_force,
        }
    }

    pub fn weights(&self) -> &FlockWeights {
        &self.weights
    }

    /// Steering that turns the current velocity towards `desired` at full speed.
    fn steer_towards(&self, boid: &Boid, desired: Vector2D) -> Vector2D {
        if desired == Vector2D::ZERO {
            return Vector2D::ZERO;
        }
        let desired = desired.normalize() * self.max_speed;
        (desired - boid.velocity).limit(self.max_force)
    }

    fn separation(&self, boid: &Boid, neighbors: &[&Boid]) -> Vector2D {
        let mut steering = Vector2D::ZERO;
        let mut count = 0;

        for other in neighbors {
            let distance = boid.position.distance(&other.position);
            if distance > 0.0 && distance < self.weights.separation_distance {
                let away = (boid.position - other.position).normalize() / distance;
                steering += away;
                count += 1;
            }
        }

        if count > 0 {
            steering = steering / count as f64;
        }
        self.steer_towards(boid, steering)
    }

    fn alignment(&self, boid: &Boid, neighbors: &[&Boid]) -> Vector2D {
        if neighbors.is_empty() {
            return Vector2D::ZERO;
        }
        let mut sum = Vector2D::ZERO;
        for other in neighbors {
            sum += other.velocity;
        }
        self.steer_towards(boid, sum / neighbors.len() as f64)
    }

    fn cohesion(&self, boid: &Boid, neighbors: &[&Boid]) -> Vector2D {
        if neighbors.is_empty() {
            return Vector2D::ZERO;
        }
        let mut sum = Vector2D::ZERO;
        for other in neighbors {
            sum += other.position;
        }
        let center = sum / neighbors.len() as f64;
        self.steer_towards(boid, center - boid.position)
    }
}

impl BehaviorStrategy for FlockBehavior {
    fn calculate_forces(&mut self, boid: &Boid, neighbors: &[&Boid]) -> Forces {
        Forces {
            separation: self.separation(boid, neighbors) * self.weights.separation,
            alignment: self.alignment(boid, neighbors) * self.weights.alignment,
            cohesion: self.cohesion(boid, neighbors) * self.weights.cohesion,
        }
    }

    fn name(&self) -> &'static str {
        "Flock"
    }
}

/// Random walk: perturbs the heading by up to half of `max_angle_change` per
/// tick and steers towards full speed along the new heading.
///
/// The generator is owned and seeded, so runs are reproducible.
#[derive(Debug, Clone)]
pub struct RandomBehavior {
    rng: StdRng,
    max_angle_change: f64,
    max_speed: f64,
    max_force: f64,
}

impl RandomBehavior {
    pub const DEFAULT_MAX_ANGLE_CHANGE: f64 = 0.5;

    pub fn new(seed: u64, max_speed: f64, max_force: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), max_speed, max_force)
    }

    pub fn with_rng(rng: StdRng, max_speed: f64, max_force: f64) -> Self {
        Self {
            rng,
            max_angle_change: Self::DEFAULT_MAX_ANGLE_CHANGE,
            max_speed,
            max_force,
        }
    }

    pub fn with_max_angle_change(mut self, max_angle_change: f64) -> Self {
        self.max_angle_change = max_angle_change;
        self
    }
}

impl BehaviorStrategy for RandomBehavior {
    fn calculate_forces(&mut self, boid: &Boid, _neighbors: &[&Boid]) -> Forces {
        let angle_change = self.rng.gen_range(-0.5..0.5) * self.max_angle_change;
        let heading = boid.velocity.angle() + angle_change;
        let target = Vector2D::from_angle(heading) * self.max_speed;
        let steer = (target - boid.velocity).limit(self.max_force);
        Forces::new(Vector2D::ZERO, steer, Vector2D::ZERO)
    }

    fn name(&self) -> &'static str {
        "Random"
    }
}

/// The default strategy for each boid type under `config`.
pub fn default_strategy(kind: BoidType, config: &SimulationConfig) -> Box<dyn BehaviorStrategy> {
    match kind {
        BoidType::Standard => Box::new(FlockBehavior::new(
            FlockWeights::standard(),
            config.max_speed,
            config.max_force,
        )),
        BoidType::RandomWalker => Box::new(RandomBehavior::new(
            config.seed.wrapping_add(RANDOM_WALK_SEED_OFFSET),
            config.max_speed,
            config.max_force,
        )),
    }
}
