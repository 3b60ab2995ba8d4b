//! Error types for all fallible operations on the index.

/// Error type returned by tree construction and the query entry points.
///
/// Argument errors are detected up front, before any mutation or scratch
/// allocation: a call that returns an error has had no observable effect
/// on the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Returned when attempting to build a tree over an empty point set.
    #[error("point set must not be empty")]
    EmptyPointSet,

    /// Returned when a query's `k` is zero or exceeds the number of points
    /// in the tree.
    #[error("k must be >= 1 and <= {size}, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
        /// Number of points in the tree.
        size: usize,
    },

    /// Returned when querying an index whose node store is empty, i.e. no
    /// build has completed against it.
    #[error("tree has not been built")]
    NotBuilt,

    /// Returned when a batch query is given no query points.
    #[error("no query points provided")]
    EmptyBatch,

    /// Returned when a batch query's output buffer does not hold exactly
    /// `k` entries per query point.
    #[error("batch of {queries} queries with k={k} needs a results buffer of {expected} entries, got {got}")]
    BatchSizeMismatch {
        /// Number of query points in the batch.
        queries: usize,
        /// The per-query k.
        k: usize,
        /// Required buffer length (`queries * k`).
        expected: usize,
        /// Actual buffer length supplied.
        got: usize,
    },
}
