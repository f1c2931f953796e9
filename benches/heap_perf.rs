//! Criterion benchmarks comparing the hollow heap against the standard
//! library's binary heap on push/pop and decrease-key-heavy workloads.
//!
//! ```bash
//! cargo bench --bench heap_perf
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hint::black_box;

use hollow_forest::HeapRegistry;

fn random_keys(n: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(0..1_000_000)).collect()
}

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop");
    for exp in [10u32, 14, 17] {
        let n = 1usize << exp;
        let keys = random_keys(n, 42);

        group.bench_with_input(BenchmarkId::new("hollow", format!("2^{exp}")), &keys, |b, keys| {
            b.iter(|| {
                let mut forest: HeapRegistry<i64, ()> = HeapRegistry::new();
                let heap = forest.new_heap();
                for &k in keys {
                    forest.push(heap, k, ());
                }
                while let Ok((k, ())) = forest.pop(heap) {
                    black_box(k);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("std_binary", format!("2^{exp}")), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = BinaryHeap::new();
                for &k in keys {
                    heap.push(Reverse(k));
                }
                while let Some(Reverse(k)) = heap.pop() {
                    black_box(k);
                }
            })
        });
    }
    group.finish();
}

/// Dijkstra-like mix: bulk pushes, then interleaved decrease-keys and pops.
/// The binary heap stands in via the usual lazy re-insertion trick.
fn bench_decrease_key_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key_mix");
    for exp in [10u32, 14] {
        let n = 1usize << exp;
        let keys = random_keys(n, 7);

        group.bench_with_input(BenchmarkId::new("hollow", format!("2^{exp}")), &keys, |b, keys| {
            b.iter(|| {
                let mut forest: HeapRegistry<i64, usize> = HeapRegistry::new();
                let heap = forest.new_heap();
                let mut handles = Vec::with_capacity(keys.len());
                for (i, &k) in keys.iter().enumerate() {
                    handles.push(forest.push(heap, k, i));
                }
                for (i, h) in handles.iter_mut().enumerate() {
                    if i % 4 == 0 {
                        *h = forest.decrease_key(heap, *h, keys[i] / 2).unwrap();
                    }
                }
                while let Ok((k, _)) = forest.pop(heap) {
                    black_box(k);
                }
            })
        });

        group.bench_with_input(
            BenchmarkId::new("std_binary_reinsert", format!("2^{exp}")),
            &keys,
            |b, keys| {
                b.iter(|| {
                    let mut heap = BinaryHeap::with_capacity(keys.len() + keys.len() / 4);
                    for &k in keys {
                        heap.push(Reverse(k));
                    }
                    for (i, &k) in keys.iter().enumerate() {
                        if i % 4 == 0 {
                            heap.push(Reverse(k / 2));
                        }
                    }
                    while let Some(Reverse(k)) = heap.pop() {
                        black_box(k);
                    }
                })
            },
        );
    }
    group.finish();
}

fn bench_meld(c: &mut Criterion) {
    c.bench_function("meld_64_heaps_of_1024", |b| {
        let keys = random_keys(64 * 1024, 3);
        b.iter(|| {
            let mut forest: HeapRegistry<i64, ()> = HeapRegistry::new();
            let ids: Vec<_> = (0..64).map(|_| forest.new_heap()).collect();
            for (i, &k) in keys.iter().enumerate() {
                forest.push(ids[i % 64], k, ());
            }
            for pair in ids.chunks(2) {
                forest.meld(pair[0], pair[1]);
            }
            let mut survivor = ids[0];
            for &id in ids.iter().step_by(2).skip(1) {
                survivor = forest.meld(survivor, id);
            }
            black_box(forest.len(survivor))
        })
    });
}

criterion_group!(benches, bench_push_pop, bench_decrease_key_mix, bench_meld);
criterion_main!(benches);
