//! Helpers for generating reproducible test data and checking query
//! results against a linear scan. Compiled only with the `test_utils`
//! feature; used by the test suites and benches.

use std::array;

use az::Az;
use ordered_float::OrderedFloat;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::distance::DistanceMetric;
use crate::tree::Axis;

/// Generates `qty` points uniformly distributed in the unit cube, from a
/// seeded RNG so that test runs are reproducible.
pub fn rand_unit_points<A: Axis, const K: usize>(qty: usize, seed: u64) -> Vec<[A; K]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..qty)
        .map(|_| array::from_fn(|_| A::from(rng.random::<f64>()).unwrap()))
        .collect()
}

/// Brute-force KNN reference: measures every point, sorts, truncates.
pub fn brute_force_nearest_n<A: Axis, const K: usize, D>(
    points: &[[A; K]],
    query: &[A; K],
    qty: usize,
) -> Vec<(A, u32)>
where
    D: DistanceMetric<A, K>,
{
    let mut all: Vec<(A, u32)> = points
        .iter()
        .enumerate()
        .map(|(idx, point)| (D::dist(query, point), idx.az::<u32>()))
        .collect();
    all.sort_by_key(|&(distance, _)| OrderedFloat(distance));
    all.truncate(qty);
    all
}
