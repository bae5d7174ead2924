//! Criterion benchmarks for sandy_rng generators and samplers.
//!
//! Measures raw and uniform draw throughput per algorithm, and the cost of
//! each Gaussian sampler on top of the reference generator.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sandy_rng::descriptor;
use sandy_rng::gaussian::{gaussian, gaussian_ratio_method};
use sandy_rng::Generator;

const BATCH: u64 = 10_000;

/// Benchmark raw and uniform draws for every algorithm.
fn bench_uniform_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("uniform_draws");
    group.throughput(Throughput::Elements(BATCH));

    for d in descriptor::all() {
        let mut rng = Generator::allocate(d).unwrap();
        group.bench_with_input(BenchmarkId::new("next_raw", d.name()), &BATCH, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(rng.next_raw());
                }
            });
        });

        let mut rng = Generator::allocate(d).unwrap();
        group.bench_with_input(
            BenchmarkId::new("next_uniform", d.name()),
            &BATCH,
            |b, &n| {
                b.iter(|| {
                    for _ in 0..n {
                        black_box(rng.next_uniform());
                    }
                });
            },
        );
    }

    group.finish();
}

/// Benchmark both Gaussian samplers.
fn bench_gaussian(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaussian");
    group.throughput(Throughput::Elements(BATCH));

    for d in [&descriptor::RANLXD2, &descriptor::MT19937] {
        let mut rng = Generator::allocate(d).unwrap();
        group.bench_with_input(BenchmarkId::new("polar", d.name()), &BATCH, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(gaussian(&mut rng, black_box(1.0)));
                }
            });
        });

        let mut rng = Generator::allocate(d).unwrap();
        group.bench_with_input(BenchmarkId::new("ratio", d.name()), &BATCH, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(gaussian_ratio_method(&mut rng, black_box(1.0)));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark allocation, which includes default seeding.
fn bench_allocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate");
    for d in descriptor::all() {
        group.bench_function(d.name(), |b| {
            b.iter(|| black_box(Generator::allocate(d).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_uniform_draws, bench_gaussian, bench_allocate);
criterion_main!(benches);
