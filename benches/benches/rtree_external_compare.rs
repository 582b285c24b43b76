// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_region_index::{Region, RegionIndex};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_regions(n: i64, cell: i64, overlap: i64) -> Vec<Region<i64>> {
    let mut out = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            let x0 = x * cell;
            let y0 = y * cell;
            out.push(Region::from_bounds(&[
                (x0, x0 + cell - 1 + overlap),
                (y0, y0 + cell - 1 + overlap),
            ]));
        }
    }
    out
}

fn to_rstar_rects(v: &[Region<i64>]) -> Vec<Rectangle<[i64; 2]>> {
    v.iter()
        .map(|r| {
            let (x, y) = (r.interval(0), r.interval(1));
            Rectangle::from_corners([x.left(), y.left()], [x.right(), y.right()])
        })
        .collect()
}

fn probe_points(n: i64, cell: i64) -> Vec<[i64; 2]> {
    (0..4_096_i64)
        .map(|i| [(i * 37) % (n * cell + cell), (i * 91) % (n * cell + cell)])
        .collect()
}

fn bench_rtree_external_compare_i64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_i64");
    for &(n, overlap) in &[(64_i64, 0_i64), (64, 5), (128, 0)] {
        let cell = 10;
        let regions = gen_grid_regions(n, cell, overlap);
        let points = probe_points(n, cell);
        group.throughput(Throughput::Elements(points.len() as u64));

        group.bench_function(format!("understory_build_query_n{n}_o{overlap}"), |b| {
            b.iter_batched(
                || regions.clone(),
                |regions| {
                    let mut idx = RegionIndex::new(2);
                    idx.extend(regions);
                    let hits = points.iter().filter(|p| idx.contains_point(&p[..])).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{n}_o{overlap}"), |b| {
            b.iter_batched(
                || to_rstar_rects(&regions),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let hits = points
                        .iter()
                        .filter(|p| {
                            tree.locate_in_envelope_intersecting(&AABB::from_point(**p))
                                .next()
                                .is_some()
                        })
                        .count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_i64);
criterion_main!(benches);
