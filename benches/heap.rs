use criterion::{Criterion, black_box, criterion_group, criterion_main};
use basic_collections::heap;
use std::collections::BinaryHeap;

fn bench_heapsort(c: &mut Criterion) {
    let data: Vec<u64> = (0..10_000u64).map(|i| i.wrapping_mul(0x9e37_79b9_7f4a_7c15)).collect();

    let mut group = c.benchmark_group("Heapsort vs std (Sort 10000)");
    group.bench_function("slice::sort_unstable", |b| {
        b.iter(|| {
            let mut v = black_box(data.clone());
            v.sort_unstable();
            v
        })
    });

    group.bench_function("BinaryHeap::into_sorted_vec", |b| {
        b.iter(|| BinaryHeap::from(black_box(data.clone())).into_sorted_vec())
    });

    group.bench_function("heap::heapsort", |b| {
        b.iter(|| {
            let mut v = black_box(data.clone());
            heap::heapsort(&mut v);
            v
        })
    });
    group.finish();
}

criterion_group!(benches, bench_heapsort);
criterion_main!(benches);
