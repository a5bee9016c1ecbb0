//! Criterion benchmarks for u-binpack.
//!
//! Measures instance generation and model formulation across the default
//! experiment sizes, plus a full solve on a small instance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_binpack::instance::{instance_seed, InstanceGenerator};
use u_binpack::packing::{formulate_with, BinLimit, FormulationConfig};

// ===========================================================================
// Generation and formulation
// ===========================================================================

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let gen = InstanceGenerator::new(30);
    for n in [20, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(gen.generate(black_box(n), instance_seed(n, 1))))
        });
    }
    group.finish();
}

fn bench_formulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("formulate");
    let gen = InstanceGenerator::new(30);
    for n in [20, 50, 100] {
        let instance = gen.generate_unit(n, 1);
        for (label, limit) in [
            ("items", BinLimit::ItemCount),
            ("ffd", BinLimit::FirstFitDecreasing),
        ] {
            let config = FormulationConfig::default().with_bin_limit(limit);
            group.bench_with_input(BenchmarkId::new(label, n), &instance, |b, inst| {
                b.iter(|| black_box(formulate_with(black_box(inst), &config)))
            });
        }
    }
    group.finish();
}

// ===========================================================================
// Solve
// ===========================================================================

#[cfg(feature = "microlp")]
fn bench_solve_small(c: &mut Criterion) {
    use u_binpack::cp::{CpSolver, MilpSolver, SolverConfig};

    let instance = InstanceGenerator::new(30).generate_unit(8, 1);
    let config = FormulationConfig::default().with_bin_limit(BinLimit::FirstFitDecreasing);
    let model = formulate_with(&instance, &config);
    let solver_config = SolverConfig::default().with_time_limit_seconds(10.0);

    let mut group = c.benchmark_group("solve");
    group.sample_size(10);
    group.bench_function("microlp_n8", |b| {
        b.iter(|| black_box(MilpSolver.solve(black_box(model.model()), &solver_config)))
    });
    group.finish();
}

#[cfg(not(feature = "microlp"))]
fn bench_solve_small(_c: &mut Criterion) {}

criterion_group!(benches, bench_generate, bench_formulate, bench_solve_small);
criterion_main!(benches);
