//! Single-query KNN: best-first branch-and-bound traversal.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use az::Az;

use crate::collector::BestKHeap;
use crate::distance::DistanceMetric;
use crate::error::Error;
use crate::nearest_neighbour::NearestNeighbour;
use crate::queue::NodeDistance;
use crate::tree::{Axis, StaticKdTree};

impl<'t, A: Axis, const K: usize, const B: usize> StaticKdTree<'t, A, K, B> {
    /// Finds the nearest `qty` points to `query`, measured by distance
    /// metric `D`, returned in ascending order of distance.
    ///
    /// Traversal is best-first: pending nodes wait in a min-priority queue
    /// keyed by the distance from the query point to the closest point of
    /// their bounding box, so the most promising region is always expanded
    /// next. Once `qty` candidates are held, any node whose bound exceeds
    /// the current worst kept distance is pruned, and so is any region of
    /// the tree it would have reached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidK`] if `qty` is zero or exceeds
    /// [`size`](StaticKdTree::size), and [`Error::NotBuilt`] if no build
    /// has completed against this index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proxima::{KdTree3, SquaredEuclidean};
    ///
    /// let points: Vec<[f64; 3]> = vec![[1.0, 2.0, 5.0], [2.0, 3.0, 6.0]];
    /// let tree = KdTree3::build(&points).unwrap();
    ///
    /// let nearest = tree.nearest_n::<SquaredEuclidean>(&[1.0, 2.0, 5.1], 1).unwrap();
    ///
    /// assert_eq!(nearest.len(), 1);
    /// assert!((nearest[0].distance - 0.01f64).abs() < f64::EPSILON);
    /// assert_eq!(nearest[0].item, 0);
    /// ```
    #[inline]
    pub fn nearest_n<D>(&self, query: &[A; K], qty: usize) -> Result<Vec<NearestNeighbour<A>>, Error>
    where
        D: DistanceMetric<A, K>,
    {
        self.check_query(qty)?;

        let mut results = BestKHeap::new(qty);
        let mut pending: BinaryHeap<Reverse<NodeDistance<A, K>>> = BinaryHeap::new();

        let root = &self.nodes[self.root_index.az::<usize>()];
        let closest = root.aabb.closest_point(query);
        pending.push(Reverse(NodeDistance {
            distance: D::dist(query, &closest),
            node: self.root_index,
            closest,
        }));

        // best smallest squared radius: worst kept distance once the
        // collector is full, infinite until then
        let mut bssr = A::infinity();

        while let Some(Reverse(entry)) = pending.pop() {
            if entry.distance > bssr {
                // nothing inside this region's box can beat the kept set
                continue;
            }

            let node = &self.nodes[entry.node.az::<usize>()];
            match &node.split {
                None => {
                    for &item in
                        &self.permutation[node.start.az::<usize>()..node.end.az::<usize>()]
                    {
                        let distance = D::dist(query, &self.points[item.az::<usize>()]);
                        if distance <= bssr {
                            results.push(NearestNeighbour { distance, item });
                            if results.is_full() {
                                bssr = results.worst_distance();
                            }
                        }
                    }
                }
                Some(split) => {
                    // the entry's closest point already lies inside the
                    // near child's box on the split axis, so the near
                    // child inherits it, bound unchanged. The far child's
                    // closest point is that vector moved onto the split
                    // plane.
                    let (near, far) = if entry.closest[split.axis] < split.val {
                        (split.negative, split.positive)
                    } else {
                        (split.positive, split.negative)
                    };

                    pending.push(Reverse(NodeDistance {
                        distance: entry.distance,
                        node: near,
                        closest: entry.closest,
                    }));

                    let far_node = &self.nodes[far.az::<usize>()];
                    if far_node.count() > 0 {
                        let mut closest = entry.closest;
                        closest[split.axis] = split.val;
                        pending.push(Reverse(NodeDistance {
                            distance: D::dist(query, &closest),
                            node: far,
                            closest,
                        }));
                    }
                }
            }
        }

        Ok(results.into_sorted_vec())
    }

    /// Finds the `results.len()` nearest points to `query` and writes
    /// their indices into `results` in ascending order of distance,
    /// overwriting its previous contents in full.
    ///
    /// # Errors
    ///
    /// As [`nearest_n`](StaticKdTree::nearest_n), with `qty` taken from
    /// the slice length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proxima::{KdTree3, SquaredEuclidean};
    ///
    /// let points: Vec<[f64; 3]> = vec![[1.0, 2.0, 5.0], [2.0, 3.0, 6.0]];
    /// let tree = KdTree3::build(&points).unwrap();
    ///
    /// let mut results = [0u32; 2];
    /// tree.nearest_n_into::<SquaredEuclidean>(&[1.0, 2.0, 5.1], &mut results).unwrap();
    ///
    /// assert_eq!(results, [0, 1]);
    /// ```
    #[inline]
    pub fn nearest_n_into<D>(&self, query: &[A; K], results: &mut [u32]) -> Result<(), Error>
    where
        D: DistanceMetric<A, K>,
    {
        let found = self.nearest_n::<D>(query, results.len())?;
        for (slot, neighbour) in results.iter_mut().zip(found) {
            *slot = neighbour.item;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::distance::{Manhattan, SquaredEuclidean};
    use crate::error::Error;
    use crate::tree::StaticKdTree;

    type SmallTree<'t> = StaticKdTree<'t, f64, 3, 4>;

    #[test]
    fn finds_the_globally_nearest_point() {
        let points: Vec<[f64; 3]> = vec![
            [0.0, 0.0, 0.0],
            [10.0, 0.0, 0.0],
            [0.0, 10.0, 0.0],
            [0.0, 0.0, 10.0],
        ];
        let tree = SmallTree::build(&points).unwrap();

        let nearest = tree.nearest_n::<SquaredEuclidean>(&[1.0, 0.0, 0.0], 1).unwrap();

        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].item, 0);
        assert_eq!(nearest[0].distance, 1.0);
    }

    #[test]
    fn works_with_manhattan_metric() {
        let points: Vec<[f64; 3]> = vec![[0.0, 0.0, 0.0], [2.0, 2.0, 0.0], [3.0, 0.0, 0.0]];
        let tree = SmallTree::build(&points).unwrap();

        let nearest = tree.nearest_n::<Manhattan>(&[2.9, 0.0, 0.0], 1).unwrap();
        assert_eq!(nearest[0].item, 2);

        let nearest = tree.nearest_n::<Manhattan>(&[2.0, 1.0, 0.0], 1).unwrap();
        assert_eq!(nearest[0].item, 1);
    }

    #[test]
    fn rejects_bad_k() {
        let points: Vec<[f64; 3]> = vec![[0.0; 3], [1.0; 3]];
        let tree = SmallTree::build(&points).unwrap();

        assert_eq!(
            tree.nearest_n::<SquaredEuclidean>(&[0.0; 3], 0).unwrap_err(),
            Error::InvalidK { k: 0, size: 2 }
        );
        assert_eq!(
            tree.nearest_n::<SquaredEuclidean>(&[0.0; 3], 3).unwrap_err(),
            Error::InvalidK { k: 3, size: 2 }
        );
    }
}
