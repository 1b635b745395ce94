//! Benchmarks for SaxonQ program operations
//!
//! Run with: cargo bench -p saxonq-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use saxonq_ir::{Angle, Program, QubitId, build};

fn ladder(n: u32) -> Program {
    let mut b = Program::builder(n, n);
    for i in 0..n {
        b.h(QubitId(i)).unwrap();
    }
    for i in 0..n - 1 {
        b.cx(QubitId(i), QubitId(i + 1)).unwrap();
        b.rz(Angle::pi_over_power_of_two(i), QubitId(i + 1)).unwrap();
    }
    b.measure_all().unwrap();
    b.finish()
}

/// Benchmark registry lookups
fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    group.bench_function("build_cx", |b| {
        b.iter(|| build(black_box("cx"), &[QubitId(1)], &[QubitId(0)], &[]).unwrap());
    });

    group.bench_function("build_rx_symbolic", |b| {
        b.iter(|| build(black_box("rx"), &[QubitId(0)], &[], &[black_box("3*pi/4")]).unwrap());
    });

    group.finish();
}

/// Benchmark program composition and analysis
fn bench_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("program");

    for n in &[4u32, 16, 64] {
        let program = ladder(*n);
        group.bench_with_input(BenchmarkId::new("compose", n), &program, |b, p| {
            b.iter(|| black_box(p.compose(p).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("depth", n), &program, |b, p| {
            b.iter(|| black_box(p.depth()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_registry, bench_program);
criterion_main!(benches);
