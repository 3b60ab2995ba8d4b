//! Priority ordering for pending tree nodes during a best-first
//! traversal.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::tree::Axis;

/// A tree node awaiting expansion, keyed by a lower bound on the distance
/// from the query point to anything inside the node's region. `closest` is
/// the point of the node's bounding box nearest to the query, which is
/// where the bound was measured; children derive their own bounds from it.
///
/// Ordered ascending by `distance`, so wrapping entries in
/// [`std::cmp::Reverse`] inside a [`std::collections::BinaryHeap`] yields
/// the min-priority queue the traversal needs.
#[derive(Debug, Copy, Clone)]
pub(crate) struct NodeDistance<A: Axis, const K: usize> {
    pub(crate) distance: A,
    pub(crate) node: u32,
    pub(crate) closest: [A; K],
}

impl<A: Axis, const K: usize> Ord for NodeDistance<A, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.distance).cmp(&OrderedFloat(other.distance))
    }
}

impl<A: Axis, const K: usize> PartialOrd for NodeDistance<A, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: Axis, const K: usize> Eq for NodeDistance<A, K> {}

impl<A: Axis, const K: usize> PartialEq for NodeDistance<A, K> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.node == other.node
    }
}
