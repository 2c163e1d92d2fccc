//! Benchmarks for range iteration
//!
//! Run with: cargo bench --bench range_iteration

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use stepwise::{GeneratorRegistry, RawValue, ValueGenerator};

fn bench_typed_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("Typed range");

    for len in [16u32, 256, 4096].iter() {
        group.bench_with_input(BenchmarkId::new("u32 ascending", len), len, |b, &len| {
            let generator = ValueGenerator::<u32>::new();
            let step = generator.try_create_step(RawValue::U32(1)).unwrap();
            b.iter(|| {
                generator
                    .generate_range(black_box(0), black_box(len - 1), &step)
                    .unwrap()
                    .sum::<u32>()
            });
        });
    }

    group.bench_function("u8 descending wide step", |b| {
        let generator = ValueGenerator::<u8>::new();
        let step = generator.try_create_step(RawValue::I32(-1)).unwrap();
        b.iter(|| {
            generator
                .generate_range(black_box(255), black_box(0), &step)
                .unwrap()
                .count()
        });
    });

    group.finish();
}

fn bench_dispatched_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dispatched range");
    let registry = GeneratorRegistry::new();

    group.bench_function("expand i64 1024", |b| {
        b.iter(|| {
            registry
                .expand(
                    black_box(RawValue::I64(0)),
                    black_box(RawValue::I64(1023)),
                    RawValue::I64(1),
                )
                .unwrap()
                .count()
        });
    });

    group.bench_function("overflow near max", |b| {
        b.iter(|| {
            registry
                .expand(
                    black_box(RawValue::U64(u64::MAX - 10)),
                    RawValue::U64(u64::MAX),
                    RawValue::U64(3),
                )
                .unwrap()
                .count()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_typed_iteration, bench_dispatched_iteration);
criterion_main!(benches);
