//! The index structure itself, plus the [`Axis`] trait implemented by the
//! co-ordinate types that can be stored in it.

use std::fmt::Debug;

use num_traits::float::FloatCore;

use crate::bounds::Aabb;
use crate::error::Error;

/// Represents the traits that must be implemented by the type used for the
/// co-ordinates of points stored in a [`StaticKdTree`]. In practice this
/// will be [`f64`] or [`f32`].
pub trait Axis: FloatCore + Default + Debug + Copy + Sync + Send + std::ops::AddAssign {}
impl<T: FloatCore + Default + Debug + Copy + Sync + Send + std::ops::AddAssign> Axis for T {}

/// A split recorded on an internal node. Nodes without one are leaves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Split<A> {
    /// Dimension that the node's point range was partitioned on.
    pub(crate) axis: usize,
    /// Partition co-ordinate: points below it went to the negative child,
    /// points at or above it to the positive child.
    pub(crate) val: A,
    pub(crate) negative: u32,
    pub(crate) positive: u32,
}

/// One node of the built tree. `start..end` is a half-open range into the
/// permutation array; the points it selects are exactly those contained in
/// `aabb`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Node<A: Axis, const K: usize> {
    pub(crate) aabb: Aabb<A, K>,
    pub(crate) start: u32,
    pub(crate) end: u32,
    pub(crate) split: Option<Split<A>>,
}

impl<A: Axis, const K: usize> Node<A, K> {
    pub(crate) fn count(&self) -> u32 {
        self.end - self.start
    }
}

/// Static k-d tree over a borrowed slice of points.
///
/// `K` is the number of dimensions per point and `B` the leaf capacity: a
/// node is subdivided during construction while it holds more than `B`
/// points. The alias [`KdTree3`](crate::KdTree3) pins `K = 3`, `B = 256`.
///
/// Built once from the full point set via [`build`](StaticKdTree::build),
/// after which queries never mutate it; if the underlying points change,
/// [`rebuild`](StaticKdTree::rebuild) reconstructs the whole index in
/// place.
///
/// # Examples
///
/// ```rust
/// use proxima::{KdTree3, SquaredEuclidean};
///
/// let points: Vec<[f64; 3]> = vec![[1.0, 2.0, 5.0], [2.0, 3.0, 6.0]];
/// let tree = KdTree3::build(&points).unwrap();
///
/// assert_eq!(tree.size(), 2);
///
/// let nearest = tree.nearest_n::<SquaredEuclidean>(&[1.0, 2.0, 5.1], 1).unwrap();
/// assert_eq!(nearest[0].item, 0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StaticKdTree<'t, A: Axis, const K: usize, const B: usize> {
    pub(crate) points: &'t [[A; K]],
    pub(crate) nodes: Vec<Node<A, K>>,
    pub(crate) permutation: Vec<u32>,
    pub(crate) root_index: u32,
}

impl<'t, A: Axis, const K: usize, const B: usize> StaticKdTree<'t, A, K, B> {
    /// Returns the number of points covered by the tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proxima::KdTree3;
    ///
    /// let points: Vec<[f64; 3]> = vec![[1.0, 2.0, 3.0]];
    /// let tree = KdTree3::build(&points).unwrap();
    ///
    /// assert_eq!(tree.size(), 1);
    /// ```
    #[inline]
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of nodes in the node store, leaves included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Common argument validation for the query entry points. Runs before
    /// any scratch allocation so that a failed query has no side effects.
    pub(crate) fn check_query(&self, qty: usize) -> Result<(), Error> {
        if self.nodes.is_empty() {
            return Err(Error::NotBuilt);
        }
        if qty == 0 || qty > self.size() {
            return Err(Error::InvalidK {
                k: qty,
                size: self.size(),
            });
        }
        Ok(())
    }
}
