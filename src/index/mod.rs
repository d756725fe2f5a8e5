use crate::error::ConfigError;
use crate::vector::Vector2D;
use std::fmt;
use std::str::FromStr;

pub mod kdtree;
pub mod naive;
pub mod quadtree;
pub mod spatial_hash;

pub use kdtree::KdTreeSpatialIndex;
pub use naive::NaiveSpatialIndex;
pub use quadtree::QuadTreeSpatialIndex;
pub use spatial_hash::SpatialHashIndex;

/// Identity of an indexed point. The simulation uses the boid's slot in its list.
pub type PointId = usize;

/// Trait defining a spatial acceleration structure for radius queries.
/// This allows swapping between brute force, grid and tree strategies.
pub trait SpatialIndex: Send + Sync {
    /// Rebuild the index over exactly `points`, discarding any previous state.
    fn build(&mut self, points: &[(PointId, Vector2D)]);

    /// Return every indexed point within `radius` of `center` (inclusive),
    /// except `exclude`.
    ///
    /// # Arguments
    /// * `center` - The query position.
    /// * `radius` - Non-negative search radius; points at exactly this distance are included.
    /// * `exclude` - Id to leave out of the result, usually the querying point itself.
    ///
    /// The order of the returned ids is unspecified; each id appears at most once.
    fn query_radius(&self, center: Vector2D, radius: f64, exclude: PointId) -> Vec<PointId>;

    /// Stable identifier used in reports.
    fn name(&self) -> &'static str;

    /// Informs the index of the radius its queries will use.
    ///
    /// Indices whose layout depends on the query radius resize themselves here;
    /// the change takes effect at the next [`SpatialIndex::build`].
    fn set_query_radius(&mut self, _radius: f64) {}
}

/// Squared query radius, or `None` for a negative or NaN radius, which matches nothing.
#[inline]
pub(crate) fn query_radius_sq(radius: f64) -> Option<f64> {
    (radius >= 0.0).then(|| radius * radius)
}

impl fmt::Debug for dyn SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpatialIndex({})", self.name())
    }
}

/// The available index strategies, used to construct fresh instances by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Naive,
    QuadTree,
    KdTree,
    SpatialHash,
}

impl IndexKind {
    pub const ALL: [IndexKind; 4] = [
        IndexKind::Naive,
        IndexKind::QuadTree,
        IndexKind::KdTree,
        IndexKind::SpatialHash,
    ];

    /// Creates a new, empty index of this kind for a `width` x `height` world
    /// queried with `radius`.
    pub fn create(
        self,
        width: f64,
        height: f64,
        radius: f64,
    ) -> Result<Box<dyn SpatialIndex>, ConfigError> {
        Ok(match self {
            IndexKind::Naive => Box::new(NaiveSpatialIndex::new()),
            IndexKind::QuadTree => Box::new(QuadTreeSpatialIndex::new(width, height)?),
            IndexKind::KdTree => Box::new(KdTreeSpatialIndex::new()),
            IndexKind::SpatialHash => Box::new(SpatialHashIndex::new(radius)?),
        })
    }

    /// Same identifier as [`SpatialIndex::name`] of the created index.
    pub fn name(self) -> &'static str {
        match self {
            IndexKind::Naive => naive::NAME,
            IndexKind::QuadTree => quadtree::NAME,
            IndexKind::KdTree => kdtree::NAME,
            IndexKind::SpatialHash => spatial_hash::NAME,
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndexKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "naive" | "brute-force" => Ok(IndexKind::Naive),
            "quadtree" | "quad-tree" => Ok(IndexKind::QuadTree),
            "kdtree" | "kd-tree" => Ok(IndexKind::KdTree),
            "spatial-hash" | "spatialhash" | "hash" | "grid" => Ok(IndexKind::SpatialHash),
            _ => Err(ConfigError::UnknownIndex(s.to_string())),
        }
    }
}
