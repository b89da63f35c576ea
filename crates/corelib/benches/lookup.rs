//! Benchmarks for ring lookups.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use corelib::{HashRing, Md5Hasher};

fn populated(targets: usize) -> HashRing<String> {
    let mut ring = HashRing::new();
    ring.add_targets((0..targets).map(|i| format!("cache-{i}:11211")))
        .expect("unique targets");
    ring
}

fn bench_lookup(c: &mut Criterion) {
    let keys: Vec<String> = (0..1024).map(|i| format!("key-{i}")).collect();

    let mut group = c.benchmark_group("lookup");
    for &targets in &[2usize, 16, 128] {
        let mut ring = populated(targets);
        group.bench_with_input(BenchmarkId::from_parameter(targets), &keys, |b, keys| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % keys.len();
                black_box(ring.lookup(&keys[i]).expect("non-empty ring"))
            });
        });
    }
    group.finish();
}

fn bench_lookup_list(c: &mut Criterion) {
    let mut ring = populated(16);
    let mut group = c.benchmark_group("lookup_list");
    for &count in &[1usize, 3, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| black_box(ring.lookup_list("resource", count).expect("valid count")));
        });
    }
    group.finish();
}

fn bench_md5_cold_index(c: &mut Criterion) {
    c.bench_function("md5_add_then_lookup", |b| {
        b.iter(|| {
            let mut ring = HashRing::with_hasher(Md5Hasher);
            ring.add_targets(["a", "b", "c", "d"]).expect("unique targets");
            black_box(ring.lookup("resource").expect("non-empty ring"))
        });
    });
}

criterion_group!(benches, bench_lookup, bench_lookup_list, bench_md5_cold_index);
criterion_main!(benches);
