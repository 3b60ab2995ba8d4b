//! Distance metrics that can be chosen from to measure the distance
//! between a query point and the points stored in the tree.

use crate::tree::Axis;

/// Trait that needs to be implemented by any potential distance metric to
/// be used within queries.
///
/// Queries also measure the distance from a query point to the clamped
/// projection of that point onto a node's bounding box, so a metric must
/// be monotone per axis for the traversal's pruning bound to stay
/// admissible. Both metrics shipped here are.
pub trait DistanceMetric<A, const K: usize> {
    /// Returns the distance between two K-d points, as measured by this
    /// particular distance metric.
    fn dist(a: &[A; K], b: &[A; K]) -> A;
}

/// Returns the squared euclidean distance between two points.
///
/// Faster than Euclidean distance due to not needing a square root, but
/// still preserves the same distance ordering as with Euclidean distance.
///
/// # Examples
///
/// ```rust
/// use proxima::{DistanceMetric, SquaredEuclidean};
///
/// assert_eq!(0f32, SquaredEuclidean::dist(&[0f32, 0f32], &[0f32, 0f32]));
/// assert_eq!(1f32, SquaredEuclidean::dist(&[0f32, 0f32], &[1f32, 0f32]));
/// assert_eq!(2f32, SquaredEuclidean::dist(&[0f32, 0f32], &[1f32, 1f32]));
/// ```
pub struct SquaredEuclidean {}

impl<A: Axis, const K: usize> DistanceMetric<A, K> for SquaredEuclidean {
    #[inline]
    fn dist(a: &[A; K], b: &[A; K]) -> A {
        a.iter()
            .zip(b.iter())
            .map(|(&a_val, &b_val)| (a_val - b_val) * (a_val - b_val))
            .fold(A::zero(), std::ops::Add::add)
    }
}

/// Returns the Manhattan / "taxi cab" distance between two points.
///
/// # Examples
///
/// ```rust
/// use proxima::{DistanceMetric, Manhattan};
///
/// assert_eq!(0f32, Manhattan::dist(&[0f32, 0f32], &[0f32, 0f32]));
/// assert_eq!(1f32, Manhattan::dist(&[0f32, 0f32], &[1f32, 0f32]));
/// assert_eq!(2f32, Manhattan::dist(&[0f32, 0f32], &[1f32, 1f32]));
/// ```
pub struct Manhattan {}

impl<A: Axis, const K: usize> DistanceMetric<A, K> for Manhattan {
    #[inline]
    fn dist(a: &[A; K], b: &[A; K]) -> A {
        a.iter()
            .zip(b.iter())
            .map(|(&a_val, &b_val)| (a_val - b_val).abs())
            .fold(A::zero(), std::ops::Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_euclidean_3d() {
        let a = [1.0f64, 2.0, 3.0];
        let b = [4.0f64, 6.0, 3.0];

        assert_eq!(SquaredEuclidean::dist(&a, &b), 25.0);
    }

    #[test]
    fn manhattan_3d() {
        let a = [1.0f64, 2.0, 3.0];
        let b = [4.0f64, 6.0, 2.0];

        assert_eq!(Manhattan::dist(&a, &b), 8.0);
    }
}
