// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_region_index::{BuildConfig, Interval, Region, RegionIndex};

const SPAN: u64 = 100_000;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, n: u64) -> i64 {
        (self.next_u64() % n) as i64
    }
}

/// Regions 100 to 300 wide per axis, scattered over `[0, SPAN)`.
fn gen_random_regions(dimension: usize, count: usize, seed: u64) -> Vec<Region<i64>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            (0..dimension)
                .map(|_| {
                    let offset = rng.below(SPAN);
                    Interval::new(offset + rng.below(100), offset + 100 + rng.below(100))
                })
                .collect::<Region<i64>>()
        })
        .collect()
}

fn gen_points(dimension: usize, count: usize, seed: u64) -> Vec<Vec<i64>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| (0..dimension).map(|_| rng.below(SPAN)).collect::<Vec<_>>())
        .collect()
}

/// Regions stacked on top of each other, the worst case for the split guard.
fn gen_duplicate_regions(dimension: usize, count: usize) -> Vec<Region<i64>> {
    let region = Region::new(vec![Interval::new(0_i64, 1_000); dimension]);
    vec![region; count]
}

fn built_index(dimension: usize, regions: &[Region<i64>]) -> RegionIndex<i64> {
    let mut idx = RegionIndex::new(dimension);
    idx.extend(regions.iter().cloned());
    idx.rebuild();
    idx
}

fn bench_phases(c: &mut Criterion) {
    for &dimension in &[2_usize, 4, 8] {
        let mut group = c.benchmark_group(format!("region_index_{dimension}d"));
        let regions = gen_random_regions(dimension, 1_000, 0xCAFE_F00D_DEAD_BEEF);
        let points = gen_points(dimension, 10_000, 0xBADC_F00D_1234_5678);

        group.throughput(Throughput::Elements(regions.len() as u64));
        group.bench_function("insert", |b| {
            b.iter_batched(
                || RegionIndex::<i64>::new(dimension),
                |mut idx| {
                    idx.extend(regions.iter().cloned());
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("rebuild", |b| {
            b.iter_batched(
                || {
                    let mut idx = RegionIndex::new(dimension);
                    idx.extend(regions.iter().cloned());
                    idx
                },
                |mut idx| {
                    idx.rebuild();
                    black_box(idx.checked_region_count());
                },
                BatchSize::SmallInput,
            )
        });

        group.throughput(Throughput::Elements(points.len() as u64));
        let mut idx = built_index(dimension, &regions);
        group.bench_function("contains_point", |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for p in &points {
                    hits += usize::from(idx.contains_point(p));
                }
                black_box(hits);
            })
        });

        group.bench_function("linear_scan", |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for p in &points {
                    hits += usize::from(regions.iter().any(|r| r.contains_point(p)));
                }
                black_box(hits);
            })
        });
        group.finish();
    }
}

fn bench_leaf_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_index_leaf_capacity");
    let regions = gen_random_regions(2, 4_000, 0xC1A5_7E55_9999_ABCD);
    let points = gen_points(2, 10_000, 0xFACE_FEED_CAFE_BABE);
    for &leaf_capacity in &[1_usize, 4, 16] {
        let mut idx = RegionIndex::with_config(2, BuildConfig { leaf_capacity });
        idx.extend(regions.iter().cloned());
        idx.rebuild();
        group.bench_function(format!("query_leaf{leaf_capacity}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for p in &points {
                    hits += usize::from(idx.contains_point(p));
                }
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_duplicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_index_duplicates");
    let regions = gen_duplicate_regions(4, 1_000);
    group.bench_function("rebuild_and_query", |b| {
        b.iter_batched(
            || {
                let mut idx = RegionIndex::new(4);
                idx.extend(regions.iter().cloned());
                idx
            },
            |mut idx| {
                black_box(idx.contains_point(&[2_000, 0, 0, 0]));
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_phases,
    bench_leaf_capacity,
    bench_duplicates
);
criterion_main!(benches);
