//! Criterion micro-benchmarks for traversal: safe view, raw view, fresh
//! view per index, and partitioned parallel.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use stride_bench::{parallel_executor, vec3_profile, REFERENCE_COUNT};
use stride_engine::{for_each, for_each_raw, Traversal};
use stride_test_utils::Vec3Fields;

/// Benchmark: add (1, 2, 3) to every record through one reused safe view.
fn bench_safe_view(c: &mut Criterion) {
    let mut array = vec3_profile(REFERENCE_COUNT);
    let f = Vec3Fields::resolve(array.layout()).unwrap();
    c.bench_function("safe_view_100k", |b| {
        b.iter(|| {
            for_each(&mut array, |_, view| {
                view.update(f.x, |v| v + 1.0)?;
                view.update(f.y, |v| v + 2.0)?;
                view.update(f.z, |v| v + 3.0)
            })
            .unwrap();
        });
    });
    black_box(array.as_bytes()[0]);
}

/// Benchmark: the same update through one reused raw view.
fn bench_raw_view(c: &mut Criterion) {
    let mut array = vec3_profile(REFERENCE_COUNT);
    let f = Vec3Fields::resolve(array.layout()).unwrap();
    c.bench_function("raw_view_100k", |b| {
        b.iter(|| {
            for_each_raw(&mut array, |_, view| {
                // SAFETY: the traversal keeps the view inside the array and
                // the fields come from its layout.
                unsafe {
                    view.set(f.x, view.get(f.x) + 1.0);
                    view.set(f.y, view.get(f.y) + 2.0);
                    view.set(f.z, view.get(f.z) + 3.0);
                }
            });
        });
    });
    black_box(array.as_bytes()[0]);
}

/// Benchmark: a fresh bounds-checked view per index via `get_mut`.
fn bench_get_per_index(c: &mut Criterion) {
    let mut array = vec3_profile(REFERENCE_COUNT);
    let f = Vec3Fields::resolve(array.layout()).unwrap();
    c.bench_function("get_mut_per_index_100k", |b| {
        b.iter(|| {
            for i in 0..array.len() {
                let mut view = array.get_mut(i).unwrap();
                view.update(f.x, |v| v + 1.0).unwrap();
            }
        });
    });
    black_box(array.as_bytes()[0]);
}

/// Benchmark: partitioned parallel update on the default executor.
fn bench_parallel(c: &mut Criterion) {
    let mut array = vec3_profile(REFERENCE_COUNT);
    let f = Vec3Fields::resolve(array.layout()).unwrap();
    let exec = parallel_executor();
    c.bench_function("parallel_100k", |b| {
        b.iter(|| {
            exec.for_each(&mut array, Traversal::Parallel, |_, view| {
                view.update(f.x, |v| v + 1.0)?;
                view.update(f.y, |v| v + 2.0)?;
                view.update(f.z, |v| v + 3.0)
            })
            .unwrap();
        });
    });
    black_box(array.as_bytes()[0]);
}

criterion_group!(
    benches,
    bench_safe_view,
    bench_raw_view,
    bench_get_per_index,
    bench_parallel
);
criterion_main!(benches);
