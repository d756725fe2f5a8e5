use thiserror::Error;

/// Errors raised while configuring an index, a simulation or a benchmark run.
///
/// Every variant is detected before the first tick; a configured simulation
/// never fails mid-run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("neighbor radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    #[error("bounds must be positive and finite, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),
    #[error("node capacity must be at least 1")]
    InvalidCapacity,
    #[error("{name} must be positive and finite, got {value}")]
    InvalidLimit { name: &'static str, value: f64 },
    #[error("random walker ratio must lie in [0, 1], got {0}")]
    InvalidRatio(f64),
    #[error("simulation already running; configure it before the first update")]
    AlreadyRunning,
    #[error("unknown spatial index `{0}` (expected naive, quadtree, kdtree or spatial-hash)")]
    UnknownIndex(String),
}
