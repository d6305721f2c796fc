use criterion::{
    BenchmarkId, Criterion, Throughput, {criterion_group, criterion_main},
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn shuffled(size: usize) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..size as u64).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(size as u64));
    keys
}

fn hash_sort_vs_std(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for size in [1_000usize, 10_000, 100_000, 1_000_000].iter() {
        let keys = shuffled(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("hash_sort", size), &keys, |b, keys| {
            b.iter(|| hashsort::hash_sort(keys).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("sort_unstable", size), &keys, |b, keys| {
            b.iter(|| {
                let mut copy = keys.clone();
                copy.sort_unstable();
                copy
            })
        });
    }
    group.finish();
}

criterion_group!(benches, hash_sort_vs_std);
criterion_main!(benches);
