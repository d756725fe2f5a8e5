use super::{PointId, SpatialIndex, query_radius_sq};
use crate::error::ConfigError;
use crate::vector::{Vector2D, within_radius};
use std::collections::HashMap;

pub(crate) const NAME: &str = "SpatialHash";

/// A spatial index based on an unbounded uniform grid of square cells.
///
/// Points are bucketed by `(floor(x / cell_size), floor(y / cell_size))`, so
/// negative coordinates get their own cells rather than collapsing onto zero.
/// A query scans the cells overlapped by the square of side `2 * radius`
/// around the center, widened by one cell on every side.
///
/// The cell size follows the query radius: [`SpatialIndex::set_query_radius`]
/// resizes the cells, and a query whose radius exceeds the cell size widens its
/// neighborhood instead of missing points. A resize only changes the layout of
/// the next build; queries always use the size the buckets were built with.
#[derive(Debug, Clone)]
pub struct SpatialHashIndex {
    cell_size: f64,
    built_cell_size: f64,
    cells: HashMap<(i64, i64), Vec<(PointId, Vector2D)>>,
    len: usize,
}

impl SpatialHashIndex {
    /// Creates an empty index with square cells of side `cell_size`.
    pub fn new(cell_size: f64) -> Result<Self, ConfigError> {
        validate_cell_size(cell_size)?;
        Ok(Self {
            cell_size,
            built_cell_size: cell_size,
            cells: HashMap::new(),
            len: 0,
        })
    }

    /// Cell side the next build will use.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell side of the current buckets.
    pub fn built_cell_size(&self) -> f64 {
        self.built_cell_size
    }

    /// Changes the cell side. Takes effect at the next build.
    pub fn set_cell_size(&mut self, cell_size: f64) -> Result<(), ConfigError> {
        validate_cell_size(cell_size)?;
        self.cell_size = cell_size;
        Ok(())
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Cell coordinate of `pos` in the current buckets, using floor division.
    #[inline]
    pub fn cell_of(&self, pos: &Vector2D) -> (i64, i64) {
        let cx = (pos.x / self.built_cell_size).floor() as i64;
        let cy = (pos.y / self.built_cell_size).floor() as i64;
        (cx, cy)
    }

    fn scan_bucket(
        bucket: &[(PointId, Vector2D)],
        center: &Vector2D,
        radius_sq: f64,
        exclude: PointId,
        out: &mut Vec<PointId>,
    ) {
        for (id, pos) in bucket {
            if *id != exclude && within_radius(pos, center, radius_sq) {
                out.push(*id);
            }
        }
    }
}

fn validate_cell_size(cell_size: f64) -> Result<(), ConfigError> {
    if cell_size > 0.0 && cell_size.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidCellSize(cell_size))
    }
}

impl SpatialIndex for SpatialHashIndex {
    fn build(&mut self, points: &[(PointId, Vector2D)]) {
        self.cells.clear();
        self.len = 0;
        self.built_cell_size = self.cell_size;

        for &(id, pos) in points {
            // Non-finite points can never lie within a finite radius.
            if !pos.is_finite() {
                continue;
            }
            let cell = self.cell_of(&pos);
            self.cells.entry(cell).or_default().push((id, pos));
            self.len += 1;
        }
    }

    fn query_radius(&self, center: Vector2D, radius: f64, exclude: PointId) -> Vec<PointId> {
        let mut result = Vec::new();
        let Some(radius_sq) = query_radius_sq(radius) else {
            return result;
        };
        if self.cells.is_empty() || !center.is_finite() {
            return result;
        }

        // Cells touched by the query box, plus one ring: `x / cell` can round a
        // point at exactly `radius` into the next cell.
        let reach = Vector2D::new(radius, radius);
        let (lo_x, lo_y) = self.cell_of(&(center - reach));
        let (hi_x, hi_y) = self.cell_of(&(center + reach));
        let (lo_x, lo_y) = (lo_x.saturating_sub(1), lo_y.saturating_sub(1));
        let (hi_x, hi_y) = (hi_x.saturating_add(1), hi_y.saturating_add(1));
        let span = (hi_x as f64 - lo_x as f64 + 1.0) * (hi_y as f64 - lo_y as f64 + 1.0);

        // Cheaper to walk the occupied buckets than a mostly empty neighborhood.
        if span >= self.cells.len() as f64 {
            for bucket in self.cells.values() {
                Self::scan_bucket(bucket, &center, radius_sq, exclude, &mut result);
            }
            return result;
        }

        for x in lo_x..=hi_x {
            for y in lo_y..=hi_y {
                if let Some(bucket) = self.cells.get(&(x, y)) {
                    Self::scan_bucket(bucket, &center, radius_sq, exclude, &mut result);
                }
            }
        }
        result
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn set_query_radius(&mut self, radius: f64) {
        match self.set_cell_size(radius) {
            Ok(()) => log::debug!("spatial hash cell size set to {radius}"),
            Err(err) => log::warn!("keeping cell size {}: {err}", self.cell_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_of_uses_floor() {
        let index = SpatialHashIndex::new(10.0).unwrap();
        assert_eq!(index.cell_of(&Vector2D::new(5.0, 5.0)), (0, 0));
        assert_eq!(index.cell_of(&Vector2D::new(-5.0, 5.0)), (-1, 0));
        assert_eq!(index.cell_of(&Vector2D::new(-10.0, -0.1)), (-1, -1));
        assert_eq!(index.cell_of(&Vector2D::new(10.0, 19.9)), (1, 1));
    }

    #[test]
    fn test_rejects_invalid_cell_size() {
        assert_eq!(
            SpatialHashIndex::new(0.0).unwrap_err(),
            ConfigError::InvalidCellSize(0.0)
        );
        assert!(SpatialHashIndex::new(f64::NAN).is_err());
        assert!(SpatialHashIndex::new(-3.0).is_err());
    }

    #[test]
    fn test_build_buckets_points() {
        let mut index = SpatialHashIndex::new(10.0).unwrap();
        index.build(&[
            (0, Vector2D::new(1.0, 1.0)),
            (1, Vector2D::new(2.0, 2.0)),
            (2, Vector2D::new(-1.0, 1.0)),
            (3, Vector2D::new(f64::NAN, 1.0)),
        ]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.occupied_cells(), 2);
    }

    #[test]
    fn test_query_across_negative_cells() {
        let mut index = SpatialHashIndex::new(10.0).unwrap();
        index.build(&[
            (0, Vector2D::new(-1.0, -1.0)),
            (1, Vector2D::new(1.0, 1.0)),
            (2, Vector2D::new(-25.0, 0.0)),
        ]);
        let mut found = index.query_radius(Vector2D::new(0.5, 0.5), 5.0, 99);
        found.sort_unstable();
        assert_eq!(found, vec![0, 1]);
    }

    #[test]
    fn test_radius_larger_than_cell_widens_search() {
        let mut index = SpatialHashIndex::new(1.0).unwrap();
        let points: Vec<_> = (0..50)
            .map(|i| (i, Vector2D::new(i as f64 * 0.5, 0.0)))
            .collect();
        index.build(&points);
        let found = index.query_radius(Vector2D::ZERO, 10.0, 0);
        assert_eq!(found.len(), 20);
    }

    #[test]
    fn test_resize_waits_for_next_build() {
        let points: Vec<_> = (0..10_000)
            .map(|i| (i, Vector2D::new((i % 100) as f64 * 10.0, (i / 100) as f64 * 10.0)))
            .collect();
        let mut index = SpatialHashIndex::new(50.0).unwrap();
        index.build(&points);

        index.set_query_radius(5.0);
        assert_eq!(index.cell_size(), 5.0);
        assert_eq!(index.built_cell_size(), 50.0);

        let center = Vector2D::new(505.0, 505.0);
        let mut found = index.query_radius(center, 8.0, usize::MAX);
        found.sort_unstable();
        assert_eq!(found, vec![5050, 5051, 5150, 5151]);

        index.build(&points);
        assert_eq!(index.built_cell_size(), 5.0);
        let mut found = index.query_radius(center, 8.0, usize::MAX);
        found.sort_unstable();
        assert_eq!(found, vec![5050, 5051, 5150, 5151]);
    }

    #[test]
    fn test_points_at_radius_across_cell_edges() {
        for step in 0..200 {
            let radius = 0.5 + step as f64 * 0.0173;
            let mut index = SpatialHashIndex::new(radius).unwrap();

            let mut points: Vec<_> = (0..300)
                .map(|i| (i, Vector2D::new(1000.0 + i as f64 * 3.0 * radius, -500.0)))
                .collect();
            let centers = [
                Vector2D::new(-2.0e-17, 0.0),
                Vector2D::new(2.0 * radius - 1e-15, 0.0),
                Vector2D::new(-3.0 * radius + 1e-15, radius - 1e-16),
            ];
            for center in centers {
                for offset in [
                    Vector2D::new(radius, 0.0),
                    Vector2D::new(-radius, 0.0),
                    Vector2D::new(0.0, radius),
                    Vector2D::new(0.0, -radius),
                ] {
                    points.push((points.len(), center + offset));
                }
            }
            index.build(&points);

            for center in centers {
                let expected: Vec<_> = points
                    .iter()
                    .filter(|(_, p)| within_radius(p, &center, radius * radius))
                    .map(|&(id, _)| id)
                    .collect();
                let mut found = index.query_radius(center, radius, usize::MAX);
                found.sort_unstable();
                assert_eq!(found, expected, "radius {radius}, center {center:?}");
            }
        }
    }

    #[test]
    fn test_set_query_radius_resizes_cells() {
        let mut index = SpatialHashIndex::new(50.0).unwrap();
        index.set_query_radius(20.0);
        assert_eq!(index.cell_size(), 20.0);
        index.set_query_radius(-1.0);
        assert_eq!(index.cell_size(), 20.0);
    }
}
