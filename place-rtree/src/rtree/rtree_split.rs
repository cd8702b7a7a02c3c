//! Linear-cost node splitting.
//!
//! An overflowing branch is divided by repeatedly taking the pair of children
//! that lie farthest apart along the dimension with the largest normalized
//! separation. The child with the smallest upper bound stays in the original
//! branch, the one with the largest lower bound moves to a new sibling. The
//! cost is linear in the number of children per pair; no minimum fill is
//! guaranteed for either half.

use crate::geometry::Rectangle;

use super::rtree_constants::DIMENSIONS;
use super::rtree_impl::RTree;
use super::rtree_types::{Node, NodeId};

/// Picks the split seeds among `rects`.
///
/// For every dimension the rectangle with the smallest upper bound and the one
/// with the largest lower bound are found (the first one wins ties), and their
/// separation is divided by `baseline` for that dimension. The pair of the
/// dimension with the strictly largest normalized separation is returned as
/// `(smallest_upper, Some(largest_lower))`. With a single rectangle the result
/// is `(0, None)`; an empty slice also yields `(0, None)`.
///
/// The two indices are always distinct. When both extremes fall on the same
/// rectangle, the first other rectangle is used as the second seed.
pub fn farthest_pair(rects: &[Rectangle], baseline: &[f64; DIMENSIONS]) -> (usize, Option<usize>) {
    if rects.len() < 2 {
        return (0, None);
    }

    let mut best: Option<(f64, usize, usize)> = None;

    for (dim, base) in baseline.iter().enumerate() {
        let (separation, one, another) = farthest_pair_in_dim(rects, dim, *base);
        // NaN comes from a zero span with zero separation; it never wins
        let separation = if separation.is_nan() {
            f64::NEG_INFINITY
        } else {
            separation
        };

        match best {
            Some((max_separation, _, _)) if separation <= max_separation => {}
            _ => best = Some((separation, one, another)),
        }
    }

    let (one, another) = match best {
        Some((_, one, another)) => (one, another),
        None => (0, 1),
    };

    if one == another {
        let fallback = if one == 0 { 1 } else { 0 };
        (one, Some(fallback))
    } else {
        (one, Some(another))
    }
}

fn farthest_pair_in_dim(rects: &[Rectangle], dim: usize, baseline: f64) -> (f64, usize, usize) {
    let mut min_upper = (0, f64::INFINITY);
    let mut max_lower = (0, f64::NEG_INFINITY);

    for (idx, rect) in rects.iter().enumerate() {
        let interval = rect.intervals[dim];
        if interval.upper < min_upper.1 {
            min_upper = (idx, interval.upper);
        }
        if interval.lower > max_lower.1 {
            max_lower = (idx, interval.lower);
        }
    }

    let separation = (max_lower.1 - min_upper.1) / baseline;
    (separation, min_upper.0, max_lower.0)
}

impl RTree {
    /// Splits `node` in two and returns the new sibling.
    ///
    /// The sibling is attached to `node`'s parent right away, so the parent
    /// may overflow afterwards. Neither half has its rectangle recomputed
    /// here; the caller does that before reading them.
    pub(crate) fn split(&mut self, node: NodeId) -> NodeId {
        let parent = self.get(node).parent;
        let sibling = self.alloc(Node::branch(parent, Rectangle::EMPTY));
        if let Some(parent) = parent {
            self.add_entry(parent, sibling);
        }

        let mut pool = self.take_children(node);
        let baseline = self.get(node).rectangle.spans();
        let total = pool.len();

        while !pool.is_empty() {
            let rects: Vec<Rectangle> = pool.iter().map(|id| self.get(*id).rectangle).collect();

            match farthest_pair(&rects, &baseline) {
                (one, Some(another)) => {
                    let (kept, moved) = (pool[one], pool[another]);
                    // Remove the higher index first so the lower one stays valid
                    pool.remove(one.max(another));
                    pool.remove(one.min(another));
                    self.add_entry(node, kept);
                    self.add_entry(sibling, moved);
                }
                (one, None) => {
                    let kept = pool.remove(one);
                    self.add_entry(node, kept);
                }
            }
        }

        log::trace!(
            "Split node {} with {} children, new sibling {} ({} / {})",
            node,
            total,
            sibling,
            self.get(node).len(),
            self.get(sibling).len()
        );

        sibling
    }
}
