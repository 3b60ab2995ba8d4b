//! Batched KNN: the single-query algorithm applied once per query point
//! against the same immutable tree, each query owning a disjoint
//! sub-range of one output buffer.

use crate::distance::DistanceMetric;
use crate::error::Error;
use crate::tree::{Axis, StaticKdTree};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

impl<'t, A: Axis, const K: usize, const B: usize> StaticKdTree<'t, A, K, B> {
    /// Runs one KNN query per entry of `queries`, writing the `qty`
    /// result indices for `queries[i]` into `results[i * qty..(i + 1) * qty]`,
    /// each sub-range in ascending order of distance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBatch`] if `queries` is empty,
    /// [`Error::BatchSizeMismatch`] if `results` does not hold exactly
    /// `qty` entries per query, and the single-query errors otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proxima::{KdTree3, SquaredEuclidean};
    ///
    /// let points: Vec<[f64; 3]> = vec![[0.0; 3], [1.0; 3], [2.0; 3]];
    /// let tree = KdTree3::build(&points).unwrap();
    ///
    /// let queries = [[0.1, 0.0, 0.0], [1.9, 2.0, 2.0]];
    /// let mut results = [0u32; 4];
    /// tree.nearest_n_batch::<SquaredEuclidean>(&queries, 2, &mut results).unwrap();
    ///
    /// assert_eq!(results, [0, 1, 2, 1]);
    /// ```
    pub fn nearest_n_batch<D>(
        &self,
        queries: &[[A; K]],
        qty: usize,
        results: &mut [u32],
    ) -> Result<(), Error>
    where
        D: DistanceMetric<A, K>,
    {
        self.check_batch(queries, qty, results)?;

        for (query, out) in queries.iter().zip(results.chunks_mut(qty)) {
            self.nearest_n_into::<D>(query, out)?;
        }
        Ok(())
    }

    /// As [`nearest_n_batch`](StaticKdTree::nearest_n_batch), with the
    /// queries distributed across the rayon thread pool. The tree is
    /// read-only during querying and every query writes a disjoint chunk
    /// of `results`, so the queries are embarrassingly parallel.
    #[cfg(feature = "rayon")]
    pub fn nearest_n_batch_par<D>(
        &self,
        queries: &[[A; K]],
        qty: usize,
        results: &mut [u32],
    ) -> Result<(), Error>
    where
        D: DistanceMetric<A, K>,
    {
        self.check_batch(queries, qty, results)?;

        queries
            .par_iter()
            .zip(results.par_chunks_mut(qty))
            .try_for_each(|(query, out)| self.nearest_n_into::<D>(query, out))
    }

    fn check_batch(&self, queries: &[[A; K]], qty: usize, results: &[u32]) -> Result<(), Error> {
        if queries.is_empty() {
            return Err(Error::EmptyBatch);
        }
        self.check_query(qty)?;
        let expected = queries.len() * qty;
        if results.len() != expected {
            return Err(Error::BatchSizeMismatch {
                queries: queries.len(),
                k: qty,
                expected,
                got: results.len(),
            });
        }
        Ok(())
    }
}
