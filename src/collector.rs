//! Fixed-capacity collector that retains the k best candidates seen so
//! far during a query.

use std::collections::BinaryHeap;

use crate::nearest_neighbour::NearestNeighbour;
use crate::tree::Axis;

/// Keeps the `capacity` pushed entries with the smallest distances,
/// backed by a max-heap so that the current worst kept entry is always at
/// the top. Once full, the worst kept distance is the query's pruning
/// radius.
pub(crate) struct BestKHeap<A: Axis> {
    heap: BinaryHeap<NearestNeighbour<A>>,
    capacity: usize,
}

impl<A: Axis> BestKHeap<A> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
        }
    }

    /// Inserts unconditionally while under capacity; afterwards the entry
    /// replaces the current worst only if it is strictly closer.
    #[inline]
    pub(crate) fn push(&mut self, entry: NearestNeighbour<A>) {
        if self.heap.len() < self.capacity {
            self.heap.push(entry);
        } else if let Some(mut top) = self.heap.peek_mut() {
            if entry.distance < top.distance {
                *top = entry;
            }
        }
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.heap.len() == self.capacity
    }

    /// The largest distance among kept entries. Only meaningful as a
    /// pruning bound once the collector is full; infinite while empty.
    #[inline]
    pub(crate) fn worst_distance(&self) -> A {
        self.heap
            .peek()
            .map(|entry| entry.distance)
            .unwrap_or_else(A::infinity)
    }

    /// Drains the collector, returning the kept entries in ascending
    /// distance order.
    pub(crate) fn into_sorted_vec(self) -> Vec<NearestNeighbour<A>> {
        self.heap.into_sorted_vec()
    }
}
