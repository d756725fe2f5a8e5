use super::{PointId, SpatialIndex, query_radius_sq};
use crate::bounds::BoundingBox;
use crate::error::ConfigError;
use crate::vector::{Vector2D, within_radius};

pub(crate) const NAME: &str = "QuadTree";

/// Default number of points a leaf holds before it splits.
pub const DEFAULT_CAPACITY: usize = 4;
/// Default subdivision limit; protects against unbounded recursion when many
/// points share a coordinate.
pub const DEFAULT_MAX_DEPTH: u32 = 16;
/// Largest accepted depth limit. Insertion and queries recurse once per level.
pub const MAX_DEPTH_LIMIT: u32 = 64;

struct QuadNode {
    bounds: BoundingBox,
    depth: u32,
    points: Vec<(PointId, Vector2D)>,
    children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    fn new(bounds: BoundingBox, depth: u32) -> Self {
        QuadNode {
            bounds,
            depth,
            points: Vec::new(),
            children: None,
        }
    }

    fn insert(&mut self, id: PointId, pos: Vector2D, capacity: usize, max_depth: u32) {
        if let Some(children) = &mut self.children {
            let quadrant = self.bounds.quadrant_of(&pos);
            children[quadrant].insert(id, pos, capacity, max_depth);
            return;
        }

        self.points.push((id, pos));

        if self.points.len() > capacity && self.depth < max_depth {
            self.subdivide(capacity, max_depth);
        }
    }

    fn subdivide(&mut self, capacity: usize, max_depth: u32) {
        let depth = self.depth + 1;
        let mut children = Box::new(self.bounds.quadrants().map(|b| QuadNode::new(b, depth)));

        let points = std::mem::take(&mut self.points);
        for (id, pos) in points {
            let quadrant = self.bounds.quadrant_of(&pos);
            children[quadrant].insert(id, pos, capacity, max_depth);
        }

        self.children = Some(children);
    }

    fn query(&self, center: &Vector2D, radius_sq: f64, exclude: PointId, out: &mut Vec<PointId>) {
        if self.bounds.dist_sq_to(center) > radius_sq {
            return;
        }

        match &self.children {
            Some(children) => {
                for child in children.iter() {
                    child.query(center, radius_sq, exclude, out);
                }
            }
            None => {
                for (id, pos) in &self.points {
                    if *id != exclude && within_radius(pos, center, radius_sq) {
                        out.push(*id);
                    }
                }
            }
        }
    }

    fn max_depth(&self) -> u32 {
        match &self.children {
            Some(children) => children.iter().map(QuadNode::max_depth).max().unwrap_or(self.depth),
            None => self.depth,
        }
    }

    fn node_count(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map_or(0, |children| children.iter().map(QuadNode::node_count).sum())
    }
}

/// A region quadtree over a fixed rectangle, rebuilt from scratch on every build.
///
/// Leaves split into four half-size quadrants once they hold more than
/// `capacity` points, down to `max_depth`. A point on a split line goes to the
/// upper quadrant (`[min, mid)` / `[mid, max]`), so it is stored exactly once.
///
/// Points outside the configured rectangle are kept: the root region is grown
/// to enclose them for that build.
pub struct QuadTreeSpatialIndex {
    bounds: BoundingBox,
    capacity: usize,
    max_depth: u32,
    root: Option<QuadNode>,
    len: usize,
}

impl QuadTreeSpatialIndex {
    /// Creates a quadtree covering `[0, width] x [0, height]` with default
    /// capacity and depth limit.
    pub fn new(width: f64, height: f64) -> Result<Self, ConfigError> {
        Self::with_params(width, height, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH)
    }

    /// Creates a quadtree with an explicit leaf capacity and depth limit.
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Extent of the region, anchored at the origin.
    /// * `capacity` - The maximum number of points a leaf holds before subdividing.
    /// * `max_depth` - Depth at which leaves stop subdividing, at most [`MAX_DEPTH_LIMIT`].
    pub fn with_params(
        width: f64,
        height: f64,
        capacity: usize,
        max_depth: u32,
    ) -> Result<Self, ConfigError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ConfigError::InvalidBounds { width, height });
        }
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        if max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::InvalidLimit {
                name: "max_depth",
                value: f64::from(max_depth),
            });
        }
        Ok(Self {
            bounds: BoundingBox::from_size(width, height),
            capacity,
            max_depth,
            root: None,
            len: 0,
        })
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Deepest level reached by the current tree, 0 for a single leaf.
    pub fn depth(&self) -> u32 {
        self.root.as_ref().map_or(0, QuadNode::max_depth)
    }

    /// Total number of nodes in the current tree.
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, QuadNode::node_count)
    }

    /// Region covered by the current root, including any growth for
    /// out-of-bounds points.
    pub fn root_bounds(&self) -> Option<BoundingBox> {
        self.root.as_ref().map(|root| root.bounds)
    }
}

impl SpatialIndex for QuadTreeSpatialIndex {
    fn build(&mut self, points: &[(PointId, Vector2D)]) {
        self.root = None;
        self.len = 0;

        let mut region = self.bounds;
        let mut skipped = 0usize;
        for (_, pos) in points {
            if pos.is_finite() {
                region.expand_to(pos);
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            log::warn!("quadtree skipped {skipped} points with non-finite coordinates");
        }
        if region != self.bounds {
            log::warn!(
                "quadtree root grown from {:?} to {:?} for out-of-bounds points",
                self.bounds,
                region
            );
        }

        let mut root = QuadNode::new(region, 0);
        for &(id, pos) in points {
            if pos.is_finite() {
                root.insert(id, pos, self.capacity, self.max_depth);
                self.len += 1;
            }
        }
        self.root = Some(root);
    }

    fn query_radius(&self, center: Vector2D, radius: f64, exclude: PointId) -> Vec<PointId> {
        let mut result = Vec::new();
        if let (Some(root), Some(radius_sq)) = (&self.root, query_radius_sq(radius)) {
            root.query(&center, radius_sq, exclude, &mut result);
        }
        result
    }

    fn name(&self) -> &'static str {
        NAME
    }
}
