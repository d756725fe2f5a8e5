//! # boidbench
//!
//! `boidbench` is a Rust library for benchmarking spatial indices on a 2D flocking
//! simulation, usable from Rust as well as compiled to WebAssembly (WASM). Every
//! tick rebuilds the active index from the boid positions and issues one radius
//! query per boid, which makes the index the hot path being measured.
//!
//! ## Features
//!
//! - **Four interchangeable indices**: brute force, quadtree, k-d tree and uniform
//!   spatial hash behind the [`SpatialIndex`] trait, all returning identical results.
//! - **Pluggable behaviors**: flocking and random walk via [`BehaviorStrategy`],
//!   with seeded randomness for reproducible runs.
//! - **Benchmark driver**: warmup plus measured steps per index and boid count, see
//!   [`benchmark`] and the `microbench` binary.
//! - **WASM-ready**: `FlockSimulation` is exported to JavaScript with `wasm-bindgen`.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`FlockSimulation`] struct, which owns the boids
//! and the active spatial index.

mod bounds;
mod boid;
mod clock;
mod config;
mod error;
mod simulation;
mod vector;
mod wasm;
pub mod behavior;
pub mod benchmark;
pub mod index;

pub use behavior::BehaviorStrategy;
pub use behavior::FlockBehavior;
pub use behavior::FlockWeights;
pub use behavior::Forces;
pub use behavior::RandomBehavior;
pub use benchmark::BenchmarkConfig;
pub use boid::Boid;
pub use boid::BoidType;
pub use bounds::BoundingBox;
pub use clock::Stopwatch;
pub use config::SimulationConfig;
pub use error::ConfigError;
pub use index::IndexKind;
pub use index::KdTreeSpatialIndex;
pub use index::NaiveSpatialIndex;
pub use index::PointId;
pub use index::QuadTreeSpatialIndex;
pub use index::SpatialHashIndex;
pub use index::SpatialIndex;
pub use simulation::FlockSimulation;
pub use simulation::DEFAULT_NEIGHBOR_RADIUS;
pub use vector::Vector2D;
pub use vector::within_radius;
