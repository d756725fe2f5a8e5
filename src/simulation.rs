use crate::behavior::{BehaviorStrategy, Forces, default_strategy};
use crate::boid::{Boid, BoidType};
use crate::clock::Stopwatch;
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::index::{NaiveSpatialIndex, PointId, SpatialIndex};
use crate::vector::Vector2D;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Neighbor radius used until [`FlockSimulation::set_neighbor_radius`] is called.
pub const DEFAULT_NEIGHBOR_RADIUS: f64 = 50.0;

/// A flock of boids advanced one tick at a time over a pluggable spatial index.
///
/// Every [`update`](FlockSimulation::update) rebuilds the index from the
/// current positions, queries the neighbors of each boid, asks the boid's
/// behavior strategy for forces and integrates all boids. Forces are computed
/// against the positions at the start of the tick before any boid moves.
///
/// Configuration (index, radius, boid count, behaviors) is only accepted before
/// the first update; afterwards the setters return [`ConfigError::AlreadyRunning`].
pub struct FlockSimulation {
    width: f64,
    height: f64,
    config: SimulationConfig,
    neighbor_radius: f64,
    boids: Vec<Boid>,
    index: Box<dyn SpatialIndex>,
    standard: Box<dyn BehaviorStrategy>,
    random_walker: Box<dyn BehaviorStrategy>,
    snapshot: Vec<(PointId, Vector2D)>,
    forces: Vec<Forces>,
    last_iteration_ms: f64,
    ticks: u64,
}

impl FlockSimulation {
    /// Creates an empty simulation over `[0, width) x [0, height)` with the
    /// default configuration and a brute-force index.
    pub fn new(width: f64, height: f64) -> Result<Self, ConfigError> {
        Self::with_config(width, height, SimulationConfig::default())
    }

    pub fn with_config(
        width: f64,
        height: f64,
        config: SimulationConfig,
    ) -> Result<Self, ConfigError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ConfigError::InvalidBounds { width, height });
        }
        config.validate()?;
        log::debug!("new simulation {width}x{height} with {config:?}");

        Ok(Self {
            width,
            height,
            config,
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            boids: Vec::new(),
            index: Box::new(NaiveSpatialIndex::new()),
            standard: default_strategy(BoidType::Standard, &config),
            random_walker: default_strategy(BoidType::RandomWalker, &config),
            snapshot: Vec::new(),
            forces: Vec::new(),
            last_iteration_ms: 0.0,
            ticks: 0,
        })
    }

    fn ensure_not_running(&self) -> Result<(), ConfigError> {
        if self.ticks > 0 {
            Err(ConfigError::AlreadyRunning)
        } else {
            Ok(())
        }
    }

    /// Replaces the spatial index and tells it the current neighbor radius.
    pub fn set_spatial_index(&mut self, mut index: Box<dyn SpatialIndex>) -> Result<(), ConfigError> {
        self.ensure_not_running()?;
        index.set_query_radius(self.neighbor_radius);
        log::debug!("spatial index set to {}", index.name());
        self.index = index;
        Ok(())
    }

    /// Sets the neighbor radius and forwards it to the active index.
    pub fn set_neighbor_radius(&mut self, radius: f64) -> Result<(), ConfigError> {
        self.ensure_not_running()?;
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(ConfigError::InvalidRadius(radius));
        }
        self.neighbor_radius = radius;
        self.index.set_query_radius(radius);
        log::debug!("neighbor radius set to {radius}");
        Ok(())
    }

    /// Replaces the flock with `count` freshly spawned boids.
    ///
    /// Positions are uniform over the bounds, headings uniform, speeds between
    /// a quarter of and the full maximum speed. A `random_walker_ratio` share of
    /// the boids random-walk. The configured seed makes the flock reproducible.
    pub fn set_boid_count(&mut self, count: usize) -> Result<(), ConfigError> {
        self.ensure_not_running()?;
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let max_speed = self.config.max_speed;

        self.boids = (0..count)
            .map(|id| {
                let position = Vector2D::new(
                    rng.gen_range(0.0..self.width),
                    rng.gen_range(0.0..self.height),
                );
                let speed = max_speed * rng.gen_range(0.25..=1.0);
                let velocity = (Vector2D::from_angle(rng.gen_range(0.0..TAU)) * speed).limit(max_speed);
                let kind = if rng.gen_bool(self.config.random_walker_ratio) {
                    BoidType::RandomWalker
                } else {
                    BoidType::Standard
                };
                Boid::new(id, position, velocity, kind)
            })
            .collect();

        log::debug!("spawned {count} boids");
        Ok(())
    }

    /// Replaces the flock with the given boids. Ids are reassigned to list order.
    pub fn set_boids(&mut self, boids: Vec<Boid>) -> Result<(), ConfigError> {
        self.ensure_not_running()?;
        self.boids = boids;
        for (id, boid) in self.boids.iter_mut().enumerate() {
            boid.id = id;
        }
        Ok(())
    }

    /// Overrides the behavior strategy used for boids of `kind`.
    pub fn set_behavior(
        &mut self,
        kind: BoidType,
        strategy: Box<dyn BehaviorStrategy>,
    ) -> Result<(), ConfigError> {
        self.ensure_not_running()?;
        match kind {
            BoidType::Standard => self.standard = strategy,
            BoidType::RandomWalker => self.random_walker = strategy,
        }
        Ok(())
    }

    /// Runs exactly one tick and records its wall time.
    pub fn update(&mut self) {
        let stopwatch = Stopwatch::start();

        self.snapshot.clear();
        self.snapshot
            .extend(self.boids.iter().map(|b| (b.id, b.position)));
        self.index.build(&self.snapshot);

        self.forces.clear();
        {
            let mut neighbors: Vec<&Boid> = Vec::new();
            for boid in &self.boids {
                let ids = self
                    .index
                    .query_radius(boid.position, self.neighbor_radius, boid.id);
                neighbors.clear();
                neighbors.extend(ids.iter().map(|&id| &self.boids[id]));

                let strategy = match boid.kind {
                    BoidType::Standard => &mut self.standard,
                    BoidType::RandomWalker => &mut self.random_walker,
                };
                self.forces.push(strategy.calculate_forces(boid, &neighbors));
            }
        }

        let (max_speed, max_force) = (self.config.max_speed, self.config.max_force);
        for (boid, forces) in self.boids.iter_mut().zip(&self.forces) {
            boid.integrate(forces, max_speed, max_force);
            boid.wrap_edges(self.width, self.height);
        }

        self.ticks += 1;
        self.last_iteration_ms = stopwatch.elapsed_ms();
        log::trace!(
            "tick {} with {} ({} boids) took {:.4} ms",
            self.ticks,
            self.index.name(),
            self.boids.len(),
            self.last_iteration_ms
        );
    }

    /// Wall time of the most recent [`update`](FlockSimulation::update) in
    /// milliseconds, 0 before the first one.
    pub fn last_iteration_time_ms(&self) -> f64 {
        self.last_iteration_ms
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn boid_count(&self) -> usize {
        self.boids.len()
    }

    pub fn neighbor_radius(&self) -> f64 {
        self.neighbor_radius
    }

    pub fn index(&self) -> &dyn SpatialIndex {
        self.index.as_ref()
    }

    pub fn index_name(&self) -> &'static str {
        self.index.name()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of completed updates.
    pub fn tick(&self) -> u64 {
        self.ticks
    }
}
