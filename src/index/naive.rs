use super::{PointId, SpatialIndex, query_radius_sq};
use crate::vector::{Vector2D, within_radius};

pub(crate) const NAME: &str = "Naive";

/// Brute-force index: stores the points verbatim and scans all of them per query.
///
/// O(n) per query and O(n²) per tick. Serves as the correctness baseline the
/// other indices are checked against.
#[derive(Debug, Default, Clone)]
pub struct NaiveSpatialIndex {
    points: Vec<(PointId, Vector2D)>,
}

impl NaiveSpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl SpatialIndex for NaiveSpatialIndex {
    fn build(&mut self, points: &[(PointId, Vector2D)]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    fn query_radius(&self, center: Vector2D, radius: f64, exclude: PointId) -> Vec<PointId> {
        let Some(radius_sq) = query_radius_sq(radius) else {
            return Vec::new();
        };
        self.points
            .iter()
            .filter(|(id, pos)| *id != exclude && within_radius(pos, &center, radius_sq))
            .map(|(id, _)| *id)
            .collect()
    }

    fn name(&self) -> &'static str {
        NAME
    }
}
