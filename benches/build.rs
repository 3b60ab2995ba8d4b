use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use proxima::test_utils::rand_unit_points;
use proxima::KdTree3;

pub fn build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for &size in [1_000, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("3D f64", size), &size, |b, &size| {
            let points = rand_unit_points::<f64, 3>(size, 493);
            b.iter(|| KdTree3::build(black_box(&points)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("3D f32", size), &size, |b, &size| {
            let points = rand_unit_points::<f32, 3>(size, 493);
            b.iter(|| KdTree3::<f32>::build(black_box(&points)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, build);
criterion_main!(benches);
