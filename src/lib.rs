#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::invalid_codeblock_attributes)]

//! # Proxima
//!
//! A static spatial index for fast k-nearest-neighbour (KNN) queries over
//! point clouds.
//!
//! Proxima is built for workloads where many repeated proximity queries are
//! answered against a point set that changes only occasionally: the tree is
//! built wholesale from a slice of points, queried any number of times, and
//! rebuilt wholesale when the underlying data changes. There is no support
//! for incremental insertion or removal.
//!
//! Construction uses sliding-midpoint space partitioning over an explicit
//! worklist (no call-stack recursion), physically reordering a permutation
//! of point indices in place so that every tree node maps to one contiguous
//! index range. Queries run a best-first branch-and-bound traversal, driven
//! by a min-priority queue of candidate nodes and a bounded top-k collector
//! that supplies the pruning radius.
//!
//! The index borrows its point set: queries take `&self` and may run
//! concurrently from as many threads as you like, while [`rebuild`](StaticKdTree::rebuild)
//! takes `&mut self` and is therefore statically serialised against them.
//! Dropping the index releases everything it owns; the point set belongs to
//! the caller throughout.
//!
//! ## Usage
//! ```rust
//! use proxima::{KdTree3, SquaredEuclidean};
//!
//! let points: Vec<[f64; 3]> = vec![
//!     [1.0, 2.0, 5.0],
//!     [2.0, 3.0, 6.0],
//!     [2.1, 3.1, 6.1],
//! ];
//!
//! let tree = KdTree3::build(&points).unwrap();
//!
//! let nearest = tree.nearest_n::<SquaredEuclidean>(&[1.0, 2.0, 5.1], 1).unwrap();
//!
//! assert_eq!(nearest.len(), 1);
//! assert_eq!(nearest[0].item, 0);
//! assert!((nearest[0].distance - 0.01).abs() < f64::EPSILON);
//! ```

pub(crate) mod bounds;
pub(crate) mod collector;
mod construction;
pub mod distance;
pub mod error;
pub mod nearest_neighbour;
pub(crate) mod query;
pub(crate) mod queue;
#[doc(hidden)]
#[cfg(feature = "test_utils")]
pub mod test_utils;
pub mod tree;

pub use crate::distance::{DistanceMetric, Manhattan, SquaredEuclidean};
pub use crate::error::Error;
pub use crate::nearest_neighbour::NearestNeighbour;
pub use crate::tree::{Axis, StaticKdTree};

/// A [`StaticKdTree`] over 3-component points with the default leaf
/// capacity of 256, the configuration used for typical point-cloud work.
pub type KdTree3<'t, A = f64> = StaticKdTree<'t, A, 3, 256>;
