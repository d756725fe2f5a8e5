use crate::vector::Vector2D;

/// Axis-aligned bounding box in 2D space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// Box spanning `[0, width] x [0, height]`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new([0.0, 0.0], [width, height])
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        ]
    }

    /// Closed containment test.
    pub fn contains(&self, p: &Vector2D) -> bool {
        p.x >= self.min[0] && p.x <= self.max[0] && p.y >= self.min[1] && p.y <= self.max[1]
    }

    /// Grows the box so that it encloses `p`.
    pub fn expand_to(&mut self, p: &Vector2D) {
        self.min[0] = self.min[0].min(p.x);
        self.min[1] = self.min[1].min(p.y);
        self.max[0] = self.max[0].max(p.x);
        self.max[1] = self.max[1].max(p.y);
    }

    /// Squared distance from `p` to the closest point of the box, zero inside.
    pub fn dist_sq_to(&self, p: &Vector2D) -> f64 {
        let dx = (self.min[0] - p.x).max(0.0).max(p.x - self.max[0]);
        let dy = (self.min[1] - p.y).max(0.0).max(p.y - self.max[1]);
        dx * dx + dy * dy
    }

    /// Splits the box into four quadrants.
    ///
    /// Quadrant `i` lies on the upper x half if bit 0 of `i` is set and on the
    /// upper y half if bit 1 is set, matching [`BoundingBox::quadrant_of`].
    pub fn quadrants(&self) -> [BoundingBox; 4] {
        let [mid_x, mid_y] = self.center();
        let [min_x, min_y] = self.min;
        let [max_x, max_y] = self.max;
        [
            BoundingBox::new([min_x, min_y], [mid_x, mid_y]),
            BoundingBox::new([mid_x, min_y], [max_x, mid_y]),
            BoundingBox::new([min_x, mid_y], [mid_x, max_y]),
            BoundingBox::new([mid_x, mid_y], [max_x, max_y]),
        ]
    }

    /// Index of the quadrant holding `p`, using half-open `[min, mid)` and
    /// `[mid, max]` intervals so that a point on a split line maps to exactly
    /// one quadrant.
    #[inline]
    pub fn quadrant_of(&self, p: &Vector2D) -> usize {
        let [mid_x, mid_y] = self.center();
        let ix = usize::from(p.x >= mid_x);
        let iy = usize::from(p.y >= mid_y);
        ix | (iy << 1)
    }
}
