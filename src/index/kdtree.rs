use super::{PointId, SpatialIndex, query_radius_sq};
use crate::vector::{Vector2D, within_radius};
use std::cmp::Ordering;

pub(crate) const NAME: &str = "KDTree";

const NONE: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
struct KdNode {
    id: PointId,
    pos: Vector2D,
    left: u32, // NONE if absent
    right: u32,
    axis: u8,
}

/// A balanced 2D k-d tree, rebuilt from scratch on every build.
///
/// Each node stores one point. The root splits on x at the true median, and
/// the splitting axis alternates x, y, x, ... with depth. Points sharing a
/// coordinate are ordered by their position in the build input, so the same
/// input always yields the same tree and the depth stays within
/// `ceil(log2(n + 1))`.
#[derive(Debug, Clone)]
pub struct KdTreeSpatialIndex {
    nodes: Vec<KdNode>,
    order: Vec<usize>,
    root: u32,
}

impl Default for KdTreeSpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl KdTreeSpatialIndex {
    pub fn new() -> Self {
        KdTreeSpatialIndex {
            nodes: Vec::new(),
            order: Vec::new(),
            root: NONE,
        }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels in the tree, 0 when empty.
    pub fn depth(&self) -> usize {
        self.depth_recursive(self.root)
    }

    fn depth_recursive(&self, node_idx: u32) -> usize {
        if node_idx == NONE {
            return 0;
        }
        let node = &self.nodes[node_idx as usize];
        1 + self.depth_recursive(node.left).max(self.depth_recursive(node.right))
    }

    fn build_recursive(
        &mut self,
        points: &[(PointId, Vector2D)],
        start: usize,
        end: usize,
        depth: usize,
    ) -> u32 {
        if start >= end {
            return NONE;
        }

        let axis = depth % 2;
        let half = (end - start) / 2;

        // Median split; input position breaks coordinate ties.
        self.order[start..end].select_nth_unstable_by(half, |&a, &b| {
            points[a].1
                .axis(axis)
                .partial_cmp(&points[b].1.axis(axis))
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });

        let mid = start + half;
        let (id, pos) = points[self.order[mid]];

        let left = self.build_recursive(points, start, mid, depth + 1);
        let right = self.build_recursive(points, mid + 1, end, depth + 1);

        let node_idx = self.nodes.len() as u32;
        self.nodes.push(KdNode {
            id,
            pos,
            left,
            right,
            axis: axis as u8,
        });
        node_idx
    }

    fn query_recursive(
        &self,
        node_idx: u32,
        center: &Vector2D,
        radius_sq: f64,
        exclude: PointId,
        out: &mut Vec<PointId>,
    ) {
        if node_idx == NONE {
            return;
        }
        let node = &self.nodes[node_idx as usize];

        if node.id != exclude && within_radius(&node.pos, center, radius_sq) {
            out.push(node.id);
        }

        let axis = node.axis as usize;
        let diff = center.axis(axis) - node.pos.axis(axis);

        // Visit the side holding the center first
        let (near, far) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.query_recursive(near, center, radius_sq, exclude, out);

        // The far side can only hold matches if the splitting line is within reach.
        if diff * diff <= radius_sq {
            self.query_recursive(far, center, radius_sq, exclude, out);
        }
    }
}

impl SpatialIndex for KdTreeSpatialIndex {
    fn build(&mut self, points: &[(PointId, Vector2D)]) {
        self.nodes.clear();
        self.root = NONE;

        // Non-finite points would poison the median comparisons and can never match.
        self.order.clear();
        self.order
            .extend((0..points.len()).filter(|&i| points[i].1.is_finite()));

        if self.order.is_empty() {
            return;
        }

        self.nodes.reserve(self.order.len());
        let end = self.order.len();
        self.root = self.build_recursive(points, 0, end, 0);
    }

    fn query_radius(&self, center: Vector2D, radius: f64, exclude: PointId) -> Vec<PointId> {
        let mut result = Vec::new();
        if let Some(radius_sq) = query_radius_sq(radius) {
            if center.is_finite() {
                self.query_recursive(self.root, &center, radius_sq, exclude, &mut result);
            }
        }
        result
    }

    fn name(&self) -> &'static str {
        NAME
    }
}
