//! Builds an index over a synthetic point cloud and runs a batch of
//! queries against it, with tracing output enabled.
//!
//! Run with `cargo run --example pointcloud --features test_utils`.

use std::error::Error;
use std::time::Instant;

use proxima::test_utils::rand_unit_points;
use proxima::{KdTree3, SquaredEuclidean};

const CLOUD_SIZE: usize = 1_000_000;
const QUERIES: usize = 10_000;
const NEAREST: usize = 8;

fn main() -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt().init();

    let points = rand_unit_points::<f32, 3>(CLOUD_SIZE, 42);

    let start = Instant::now();
    let tree = KdTree3::<f32>::build(&points)?;
    println!(
        "built {} nodes over {CLOUD_SIZE} points in {:?}",
        tree.node_count(),
        start.elapsed()
    );

    let queries = rand_unit_points::<f32, 3>(QUERIES, 1337);
    let mut results = vec![0u32; QUERIES * NEAREST];

    let start = Instant::now();
    tree.nearest_n_batch::<SquaredEuclidean>(&queries, NEAREST, &mut results)?;
    println!("{QUERIES} queries of {NEAREST} neighbours in {:?}", start.elapsed());

    println!(
        "first query -> {:?}",
        &results[..NEAREST]
    );

    Ok(())
}
