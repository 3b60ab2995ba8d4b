//! Axis-aligned bounding boxes over point ranges.

use array_init::array_init;

use crate::tree::Axis;

/// An axis-aligned bounding box, stored as its min and max corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Aabb<A, const K: usize> {
    pub(crate) min: [A; K],
    pub(crate) max: [A; K],
}

impl<A: Axis, const K: usize> Aabb<A, K> {
    /// Computes the bounding box of `points`. Points are consumed two at a
    /// time: each pair is ordered per-axis first, so only the smaller of
    /// the two is compared against the running min and only the larger
    /// against the running max. An odd trailing point costs one extra
    /// comparison per axis.
    pub(crate) fn from_points(points: &[[A; K]]) -> Self {
        let mut min = [A::infinity(); K];
        let mut max = [A::neg_infinity(); K];

        let mut pairs = points.chunks_exact(2);
        for pair in pairs.by_ref() {
            for dim in 0..K {
                let (lo, hi) = if pair[0][dim] < pair[1][dim] {
                    (pair[0][dim], pair[1][dim])
                } else {
                    (pair[1][dim], pair[0][dim])
                };
                if lo < min[dim] {
                    min[dim] = lo;
                }
                if hi > max[dim] {
                    max[dim] = hi;
                }
            }
        }

        if let [last] = pairs.remainder() {
            for dim in 0..K {
                if last[dim] < min[dim] {
                    min[dim] = last[dim];
                }
                if last[dim] > max[dim] {
                    max[dim] = last[dim];
                }
            }
        }

        Self { min, max }
    }

    /// Returns the point inside the box that is closest to `query`: the
    /// per-axis clamped projection. For a query already inside the box this
    /// is the query itself.
    #[inline]
    pub(crate) fn closest_point(&self, query: &[A; K]) -> [A; K] {
        array_init(|dim| {
            if query[dim] < self.min[dim] {
                self.min[dim]
            } else if query[dim] > self.max[dim] {
                self.max[dim]
            } else {
                query[dim]
            }
        })
    }

    /// Returns the dimension with the largest extent. Ties go to the
    /// later axis, so for a 3D box Z beats Y beats X; keeping this
    /// deterministic keeps rebuilt trees reproducible.
    #[inline]
    pub(crate) fn widest_axis(&self) -> usize {
        let mut axis = 0;
        let mut widest = self.max[0] - self.min[0];
        for dim in 1..K {
            let extent = self.max[dim] - self.min[dim];
            if extent >= widest {
                axis = dim;
                widest = extent;
            }
        }
        axis
    }
}
