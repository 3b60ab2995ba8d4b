//! Tree construction: sliding-midpoint space partitioning over an
//! explicit worklist of pending nodes.

use std::collections::VecDeque;

use az::Az;
#[cfg(feature = "tracing")]
use tracing::{event, Level};

use crate::bounds::Aabb;
use crate::error::Error;
use crate::tree::{Axis, Node, Split, StaticKdTree};

impl<'t, A: Axis, const K: usize, const B: usize> StaticKdTree<'t, A, K, B> {
    /// Builds a tree over `points`.
    ///
    /// The tree borrows `points` for its whole lifetime and never copies
    /// them; it owns only the node store and a permutation of point
    /// indices. Construction subdivides until every leaf holds at most `B`
    /// points, except where all points in a node are exactly coincident,
    /// in which case that node is left as an oversized leaf.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPointSet`] if `points` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proxima::KdTree3;
    ///
    /// let points: Vec<[f64; 3]> = vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    /// let tree = KdTree3::build(&points).unwrap();
    ///
    /// assert_eq!(tree.size(), 2);
    /// ```
    pub fn build(points: &'t [[A; K]]) -> Result<Self, Error> {
        if points.is_empty() {
            return Err(Error::EmptyPointSet);
        }

        let mut tree = Self {
            points,
            nodes: Vec::new(),
            permutation: Vec::new(),
            root_index: 0,
        };
        tree.rebuild();

        Ok(tree)
    }

    /// Discards the current tree and reconstructs it in place from the
    /// same point slice, e.g. after the points have been mutated through
    /// other means between borrows.
    ///
    /// Requires `&mut self`, so no query can observe the tree mid-rebuild.
    /// Rebuilding with unchanged points reproduces an identical tree: axis
    /// and pivot selection are deterministic.
    pub fn rebuild(&mut self) {
        self.nodes.clear();
        self.permutation.clear();
        self.permutation.extend(0..self.points.len().az::<u32>());

        self.root_index = self.nodes.len().az::<u32>();
        self.nodes.push(Node {
            aabb: Aabb::from_points(self.points),
            start: 0,
            end: self.points.len().az::<u32>(),
            split: None,
        });

        let mut pending: VecDeque<u32> = VecDeque::new();
        if self.points.len() > B {
            pending.push_back(self.root_index);
        }

        while let Some(node_idx) = pending.pop_front() {
            let idx = node_idx.az::<usize>();
            let start = self.nodes[idx].start.az::<usize>();
            let end = self.nodes[idx].end.az::<usize>();

            // Pick the widest axis of the node's box and derive a pivot
            // from it. The box is inherited from the parent rather than
            // recomputed, so the points may turn out to be coincident on
            // the chosen axis even when its extent is non-zero; when that
            // happens the box is flattened there and selection retries on
            // the next-widest axis.
            let mut aabb = self.nodes[idx].aabb;
            let mut split_plan = None;
            for _attempt in 0..K {
                let axis = aabb.widest_axis();
                let (pivot, seen_min, seen_max) = sliding_midpoint(
                    self.points,
                    &self.permutation[start..end],
                    aabb.min[axis],
                    aabb.max[axis],
                    axis,
                );
                if seen_min < seen_max {
                    split_plan = Some((axis, pivot));
                    break;
                }
                aabb.min[axis] = seen_min;
                aabb.max[axis] = seen_min;
            }

            let Some((axis, pivot)) = split_plan else {
                // every axis is flat: the node's points are all identical,
                // so it stays behind as an oversized leaf
                #[cfg(feature = "tracing")]
                event!(
                    Level::WARN,
                    count = end - start,
                    "coincident points prevent further splitting; leaving oversized leaf"
                );
                self.nodes[idx].aabb = aabb;
                continue;
            };

            let split_at =
                start + partition(self.points, &mut self.permutation[start..end], pivot, axis);

            let mut negative_aabb = aabb;
            negative_aabb.max[axis] = pivot;
            let mut positive_aabb = aabb;
            positive_aabb.min[axis] = pivot;

            let negative = self.nodes.len().az::<u32>();
            self.nodes.push(Node {
                aabb: negative_aabb,
                start: start.az::<u32>(),
                end: split_at.az::<u32>(),
                split: None,
            });
            let positive = self.nodes.len().az::<u32>();
            self.nodes.push(Node {
                aabb: positive_aabb,
                start: split_at.az::<u32>(),
                end: end.az::<u32>(),
                split: None,
            });

            self.nodes[idx].aabb = aabb;
            self.nodes[idx].split = Some(Split {
                axis,
                val: pivot,
                negative,
                positive,
            });

            if split_at - start > B {
                pending.push_back(negative);
            }
            if end - split_at > B {
                pending.push_back(positive);
            }
        }

        #[cfg(feature = "tracing")]
        event!(
            Level::DEBUG,
            size = self.points.len(),
            nodes = self.nodes.len(),
            "tree built"
        );
    }
}

/// Chooses a split co-ordinate for `perm`'s points on `axis`, whose
/// bounding interval is `[bounds_start, bounds_end]`.
///
/// Starts from the interval's midpoint. If points fall on both sides of
/// it, the midpoint stands; if every point is below it, the split slides
/// down to the largest co-ordinate seen, and if every point is at or above
/// it, up to the smallest. Returns the pivot together with the smallest
/// and largest co-ordinates observed during the scan.
fn sliding_midpoint<A: Axis, const K: usize>(
    points: &[[A; K]],
    perm: &[u32],
    bounds_start: A,
    bounds_end: A,
    axis: usize,
) -> (A, A, A) {
    let two = A::one() + A::one();
    let mid = (bounds_start + bounds_end) / two;

    let mut below = 0usize;
    let mut at_or_above = 0usize;
    let mut seen_min = A::infinity();
    let mut seen_max = A::neg_infinity();

    for &item in perm {
        let val = points[item.az::<usize>()][axis];
        if val < mid {
            below += 1;
        } else {
            at_or_above += 1;
        }
        if val < seen_min {
            seen_min = val;
        }
        if val > seen_max {
            seen_max = val;
        }
    }

    let pivot = if below > 0 && at_or_above > 0 {
        mid
    } else if at_or_above == 0 {
        seen_max
    } else {
        seen_min
    };

    (pivot, seen_min, seen_max)
}

/// Partitions `perm` in place around `pivot` on `axis`, Hoare style:
/// returns `s` such that every entry in `[0, s)` has a co-ordinate
/// strictly below the pivot and every entry in `[s, len)` a co-ordinate at
/// or above it. Single pass, swaps only; the pivot may equal, undershoot
/// or overshoot any value actually present.
fn partition<A: Axis, const K: usize>(
    points: &[[A; K]],
    perm: &mut [u32],
    pivot: A,
    axis: usize,
) -> usize {
    let mut left = 0usize;
    let mut right = perm.len();

    while left < right {
        if points[perm[left].az::<usize>()][axis] < pivot {
            left += 1;
        } else if points[perm[right - 1].az::<usize>()][axis] >= pivot {
            right -= 1;
        } else {
            perm.swap(left, right - 1);
            left += 1;
            right -= 1;
        }
    }

    left
}

#[cfg(test)]
mod tests {
    use super::{partition, sliding_midpoint};
    use crate::tree::StaticKdTree;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    type SmallTree<'t> = StaticKdTree<'t, f64, 3, 4>;

    fn x_points(coords: &[f64]) -> Vec<[f64; 3]> {
        coords.iter().map(|&x| [x, 0.0, 0.0]).collect()
    }

    fn identity_perm(len: usize) -> Vec<u32> {
        (0..len as u32).collect()
    }

    fn rand_points(qty: usize, seed: u64) -> Vec<[f64; 3]> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..qty)
            .map(|_| [rng.random::<f64>(), rng.random::<f64>(), rng.random::<f64>()])
            .collect()
    }

    #[test]
    fn partition_splits_around_pivot() {
        let points = x_points(&[0.3, 0.9, 0.1, 0.5, 0.5, 0.7, 0.2, 0.8]);
        let mut perm = identity_perm(points.len());

        let split = partition(&points, &mut perm, 0.5, 0);

        assert_eq!(split, 3);
        for &i in &perm[..split] {
            assert!(points[i as usize][0] < 0.5);
        }
        for &i in &perm[split..] {
            assert!(points[i as usize][0] >= 0.5);
        }
        let mut sorted = perm.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, identity_perm(points.len()));
    }

    #[test]
    fn partition_pivot_at_or_beyond_extremes() {
        let points = x_points(&[0.3, 0.9, 0.1, 0.5]);

        // pivot equal to the minimum: nothing is strictly below it
        let mut perm = identity_perm(points.len());
        assert_eq!(partition(&points, &mut perm, 0.1, 0), 0);

        // pivot above the maximum: everything is strictly below it
        let mut perm = identity_perm(points.len());
        assert_eq!(partition(&points, &mut perm, 1.0, 0), 4);

        // pivot equal to the maximum: only the max point lands on the right
        let mut perm = identity_perm(points.len());
        assert_eq!(partition(&points, &mut perm, 0.9, 0), 3);
    }

    #[rstest]
    // points straddle the midpoint (0.5): it stands as the pivot
    #[case(&[0.2, 0.4, 0.6, 0.8], 0.5)]
    // all points below the midpoint: pivot slides down to their maximum
    #[case(&[0.1, 0.2, 0.3], 0.3)]
    // all points at or above the midpoint: pivot slides up to their minimum
    #[case(&[0.6, 0.8, 0.9], 0.6)]
    fn sliding_midpoint_cases(#[case] coords: &[f64], #[case] expected: f64) {
        let points = x_points(coords);
        let perm = identity_perm(points.len());

        let (pivot, seen_min, seen_max) = sliding_midpoint(&points, &perm, 0.0, 1.0, 0);

        assert_eq!(pivot, expected);
        assert_eq!(seen_min, coords.iter().cloned().fold(f64::INFINITY, f64::min));
        assert_eq!(seen_max, coords.iter().cloned().fold(f64::NEG_INFINITY, f64::max));
    }

    #[test]
    fn empty_point_set_is_rejected() {
        let points: Vec<[f64; 3]> = vec![];
        assert_eq!(
            SmallTree::build(&points).unwrap_err(),
            crate::error::Error::EmptyPointSet
        );
    }

    #[test]
    fn small_set_stays_a_single_leaf() {
        let points = rand_points(4, 1);
        let tree = SmallTree::build(&points).unwrap();

        assert_eq!(tree.node_count(), 1);
        assert!(tree.nodes[0].split.is_none());
    }

    #[test]
    fn built_tree_invariants_hold() {
        let points = rand_points(1000, 2);
        let tree = SmallTree::build(&points).unwrap();

        // the permutation is a bijection onto 0..n
        let mut sorted = tree.permutation.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, identity_perm(points.len()));

        for node in &tree.nodes {
            match &node.split {
                Some(split) => {
                    // a node's range is exactly the union, in order, of its
                    // children's ranges
                    let negative = &tree.nodes[split.negative as usize];
                    let positive = &tree.nodes[split.positive as usize];
                    assert_eq!(negative.start, node.start);
                    assert_eq!(negative.end, positive.start);
                    assert_eq!(positive.end, node.end);

                    // the partition respects the recorded pivot
                    for &i in &tree.permutation[negative.start as usize..negative.end as usize] {
                        assert!(points[i as usize][split.axis] < split.val);
                    }
                    for &i in &tree.permutation[positive.start as usize..positive.end as usize] {
                        assert!(points[i as usize][split.axis] >= split.val);
                    }
                }
                None => assert!(node.count() <= 4),
            }
        }

        // every point sits inside the box of every leaf range containing it
        for node in tree.nodes.iter().filter(|n| n.split.is_none()) {
            for &i in &tree.permutation[node.start as usize..node.end as usize] {
                for dim in 0..3 {
                    assert!(points[i as usize][dim] >= node.aabb.min[dim]);
                    assert!(points[i as usize][dim] <= node.aabb.max[dim]);
                }
            }
        }
    }

    #[test]
    fn rebuild_is_idempotent() {
        let points = rand_points(500, 3);
        let mut tree = SmallTree::build(&points).unwrap();

        let nodes = tree.nodes.clone();
        let permutation = tree.permutation.clone();
        let root_index = tree.root_index;

        tree.rebuild();

        assert_eq!(tree.nodes, nodes);
        assert_eq!(tree.permutation, permutation);
        assert_eq!(tree.root_index, root_index);
    }

    #[test]
    fn coincident_points_terminate_as_oversized_leaf() {
        let points: Vec<[f64; 3]> = vec![[1.0, 1.0, 1.0]; 300];
        let tree = SmallTree::build(&points).unwrap();

        assert_eq!(tree.node_count(), 1);
        assert!(tree.nodes[0].split.is_none());
        assert_eq!(tree.nodes[0].count(), 300);
    }

    #[test]
    fn coincident_axis_falls_back_to_another_axis() {
        // two clusters at x=0 and x=10. After the root splits on x, each
        // child's inherited box still has the widest extent on x even
        // though its points are coincident there, so the builder has to
        // flatten x and fall back to splitting on y.
        let mut points: Vec<[f64; 3]> = Vec::new();
        for i in 0..64 {
            points.push([0.0, i as f64 / 64.0, 0.0]);
            points.push([10.0, i as f64 / 64.0, 0.0]);
        }
        let tree = SmallTree::build(&points).unwrap();

        assert!(tree.node_count() > 1);
        for node in tree.nodes.iter().filter(|n| n.split.is_none()) {
            assert!(node.count() <= 4);
        }
    }
}
