//! # Store Performance Benchmark
//!
//! Measures the O(1) claims of the sparse set stores:
//! - insert / overwrite
//! - swap-remove from the middle of the dense array
//! - liveness-filtered vs. raw iteration
//!
//! Run with: `cargo bench --package strata_core --bench store_benchmark`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use strata_core::{
    Components, EntityId, EntitySystem, MultiReferenceStore, SingleReferenceStore,
    SparseComponentStore,
};

type Position = SparseComponentStore<[f32; 3]>;

/// Builds a system with `count` live entities, each holding a position.
fn populated(count: u32) -> EntitySystem {
    let components = Components::new()
        .with("position", Position::new())
        .expect("registry builds");
    let mut system = EntitySystem::new(components).expect("system builds");
    for _ in 0..count {
        let id = system.create();
        system
            .store_mut::<Position>("position")
            .expect("registered")
            .add(id, [0.0, 0.0, 0.0]);
    }
    system
}

/// Benchmark: dense insertion.
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("component_insert");

    for count in [1_000_u32, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut store = Position::new();
                for raw in 1..=count {
                    store.add(EntityId::new(raw), [1.0, 2.0, 3.0]);
                }
                black_box(store.size())
            });
        });
    }

    group.finish();
}

/// Benchmark: remove every other entity, forcing swap-removes.
fn bench_swap_remove(c: &mut Criterion) {
    c.bench_function("component_swap_remove_50k", |b| {
        b.iter_batched(
            || {
                let mut store = Position::new();
                for raw in 1..=100_000 {
                    store.add(EntityId::new(raw), [0.0; 3]);
                }
                store
            },
            |mut store| {
                for raw in (1..=100_000).step_by(2) {
                    store.remove(EntityId::new(raw));
                }
                black_box(store.size())
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

/// Benchmark: filtered vs. unfiltered traversal.
fn bench_iteration(c: &mut Criterion) {
    let mut system = populated(100_000);
    for raw in (1..=100_000).step_by(3) {
        system.destroy(EntityId::new(raw));
    }

    let mut group = c.benchmark_group("component_iteration");

    group.bench_function("for_each_alive", |b| {
        let store = system.store::<Position>("position").expect("registered");
        b.iter(|| {
            let mut sum = 0.0_f32;
            store.for_each(|pos, _| sum += pos[0]);
            black_box(sum)
        });
    });

    group.bench_function("values_raw", |b| {
        let store = system.store::<Position>("position").expect("registered");
        b.iter(|| {
            let mut sum = 0.0_f32;
            store.values(|pos| sum += pos[0]);
            black_box(sum)
        });
    });

    group.finish();
}

/// Benchmark: relinking values between owners.
fn bench_references(c: &mut Criterion) {
    c.bench_function("single_reference_relink_10k", |b| {
        b.iter(|| {
            let mut refs = SingleReferenceStore::new();
            for raw in 1..=10_000_u32 {
                refs.add(EntityId::new(raw % 64 + 1), EntityId::new(raw % 97 + 100));
            }
            black_box(refs.size())
        });
    });

    c.bench_function("multi_reference_relink_10k", |b| {
        b.iter(|| {
            let mut refs = MultiReferenceStore::new();
            for raw in 1..=10_000_u32 {
                refs.add(EntityId::new(raw % 64 + 1), EntityId::new(raw % 97 + 100));
            }
            black_box(refs.version())
        });
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_swap_remove,
    bench_iteration,
    bench_references,
);
criterion_main!(benches);
