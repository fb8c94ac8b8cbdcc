//! Criterion benchmarks for exotic_engine.
//!
//! Measures draw generation, path construction, and full pricing runs in
//! sequential and parallel scheduling.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use exotic_core::types::ModelParameters;
use exotic_engine::mc::{ExoticEngine, MonteCarloConfig, PathGenerator, SamplePath, Scheduling};
use exotic_engine::payoff::Payoff;
use exotic_engine::rng::{Antithetic, ParkMiller, PricerRng, RandomSource, VarianceReduction};

/// Benchmark normal draw generation for each source.
fn bench_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("draws");
    let mut buffer = vec![0.0; 1024];

    let mut park_miller = ParkMiller::new(1).unwrap();
    group.bench_function("park_miller_1024", |b| {
        b.iter(|| park_miller.fill_gaussians(black_box(&mut buffer)))
    });

    let mut std_rng = PricerRng::from_seed(1);
    group.bench_function("std_rng_1024", |b| {
        b.iter(|| std_rng.fill_gaussians(black_box(&mut buffer)))
    });

    let mut antithetic = Antithetic::new(ParkMiller::new(1).unwrap());
    group.bench_function("antithetic_park_miller_1024", |b| {
        b.iter(|| antithetic.fill_gaussians(black_box(&mut buffer)))
    });

    group.finish();
}

/// Benchmark path construction across step counts.
fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("paths");

    for steps in [1, 12, 252] {
        let params = ModelParameters::new(100.0, 0.05, 0.2, 1.0, steps).unwrap();
        let generator = PathGenerator::new(&params);
        let draws = ParkMiller::new(7).unwrap().generate(steps);
        let mut path = SamplePath::with_capacity(steps);

        group.bench_with_input(BenchmarkId::new("build_into", steps), &draws, |b, draws| {
            b.iter(|| generator.build_into(black_box(draws), &mut path).unwrap())
        });
    }

    group.finish();
}

/// Benchmark full pricing runs.
fn bench_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pricing");
    group.sample_size(20);

    let terminal = ModelParameters::new(100.0, 0.05, 0.2, 1.0, 1).unwrap();
    let monthly = ModelParameters::new(100.0, 0.05, 0.2, 1.0, 12).unwrap();

    let sequential = ExoticEngine::default();
    let antithetic = ExoticEngine::new(
        MonteCarloConfig::builder()
            .variance_reduction(VarianceReduction::Antithetic)
            .build()
            .unwrap(),
    );
    let parallel = ExoticEngine::new(
        MonteCarloConfig::builder()
            .scheduling(Scheduling::parallel_auto())
            .build()
            .unwrap(),
    );

    for paths in [10_000_u64, 100_000] {
        group.bench_with_input(BenchmarkId::new("call_sequential", paths), &paths, |b, &n| {
            b.iter(|| sequential.price(&terminal, &Payoff::call(100.0), n, 42).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("call_antithetic", paths), &paths, |b, &n| {
            b.iter(|| antithetic.price(&terminal, &Payoff::call(100.0), n, 42).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("asian_sequential", paths), &paths, |b, &n| {
            b.iter(|| sequential.price(&monthly, &Payoff::asian_call(100.0), n, 42).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("asian_parallel", paths), &paths, |b, &n| {
            b.iter(|| parallel.price(&monthly, &Payoff::asian_call(100.0), n, 42).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_draws, bench_paths, bench_pricing);
criterion_main!(benches);
