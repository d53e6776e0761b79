use criterion::{Criterion, black_box, criterion_group, criterion_main};
use basic_collections::{ArrayList, GrowthPolicy, RingBuffer, StringBuffer};
use std::collections::VecDeque;

fn bench_array_list(c: &mut Criterion) {
    let n = 1_000;
    {
        let mut group = c.benchmark_group("Vec vs ArrayList (Push 1000)");
        group.bench_function("std::vec::Vec", |b| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..n {
                    v.push(black_box(i));
                }
                v
            })
        });

        group.bench_function("ArrayList<Blocks(16)>", |b| {
            b.iter(|| {
                let mut v = ArrayList::new();
                for i in 0..n {
                    v.push(black_box(i)).unwrap();
                }
                v
            })
        });

        group.bench_function("ArrayList<Exact>", |b| {
            b.iter(|| {
                let mut v = ArrayList::with_growth(GrowthPolicy::Exact);
                for i in 0..n {
                    v.push(black_box(i)).unwrap();
                }
                v
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("Vec vs ArrayList (Insert Front 200)");
        group.bench_function("std::vec::Vec", |b| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..200 {
                    v.insert(0, black_box(i));
                }
                v
            })
        });

        group.bench_function("ArrayList", |b| {
            b.iter(|| {
                let mut v = ArrayList::new();
                for i in 0..200 {
                    v.insert(0, black_box(i)).unwrap();
                }
                v
            })
        });
        group.finish();
    }
}

fn bench_ring_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("VecDeque vs RingBuffer (Offer/Poll 64)");
    group.bench_function("std::collections::VecDeque", |b| {
        let mut q = VecDeque::with_capacity(64);
        b.iter(|| {
            for i in 0..64 {
                q.push_back(black_box(i));
            }
            while let Some(x) = q.pop_front() {
                black_box(x);
            }
        })
    });

    group.bench_function("RingBuffer", |b| {
        let mut q = RingBuffer::with_capacity(64).unwrap();
        b.iter(|| {
            for i in 0..64 {
                let _ = q.offer(black_box(i));
            }
            while let Some(x) = q.poll() {
                black_box(x);
            }
        })
    });
    group.finish();
}

fn bench_string_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("String vs StringBuffer (Append 100 words)");
    group.bench_function("std::string::String", |b| {
        b.iter(|| {
            let mut s = String::new();
            for _ in 0..100 {
                s.push_str(black_box("word "));
            }
            s
        })
    });

    group.bench_function("StringBuffer", |b| {
        b.iter(|| {
            let mut s = StringBuffer::new();
            for _ in 0..100 {
                s.push_str(black_box("word ")).unwrap();
            }
            s
        })
    });
    group.finish();
}

criterion_group!(benches, bench_array_list, bench_ring_buffer, bench_string_buffer);
criterion_main!(benches);
