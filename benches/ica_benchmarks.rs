//! Benchmarks for the imperialist competitive optimizer.

use aprender_ica::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_single_decade(c: &mut Criterion) {
    let mut group = c.benchmark_group("ica_decade");

    for dim in [2, 10, 30].iter() {
        let problem = Benchmark::Rastrigin.problem(*dim).unwrap();
        let ica = ImperialistCompetitive::new(IcaConfig::default().with_population(100, 8))
            .with_seed(42);

        group.bench_with_input(BenchmarkId::from_parameter(dim), dim, |b, _| {
            let mut engine = ica.engine(&problem).unwrap();
            b.iter(|| black_box(engine.step_decade()));
        });
    }

    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("ica_optimize");
    group.sample_size(20);

    for (variant, label) in [
        (IcaVariant::Original, "original"),
        (IcaVariant::Explorer, "explorer"),
    ] {
        for dim in [2, 10].iter() {
            let problem = Benchmark::Sphere.problem(*dim).unwrap();
            let ica = ImperialistCompetitive::new(
                IcaConfig::default().with_population(50, 5).with_decades(100),
            )
            .with_variant(variant)
            .with_seed(7);

            group.bench_with_input(BenchmarkId::new(label, dim), dim, |b, _| {
                b.iter(|| ica.optimize(black_box(&problem)).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_harness(c: &mut Criterion) {
    let mut group = c.benchmark_group("ica_harness");
    group.sample_size(10);

    let problem = Benchmark::Ackley.problem(5).unwrap();
    for runs in [3, 12].iter() {
        let harness = RunHarness::new(
            ImperialistCompetitive::new(
                IcaConfig::default().with_population(40, 4).with_decades(50),
            )
            .with_seed(1),
            *runs,
        );

        group.bench_with_input(BenchmarkId::from_parameter(runs), runs, |b, _| {
            b.iter(|| harness.evaluate(black_box(&problem)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_decade, bench_optimize, bench_harness);
criterion_main!(benches);
