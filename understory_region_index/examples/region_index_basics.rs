// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Region Index: insert, rebuild, query, and inspect.
//!
//! Run with `--features tracing` and `RUST_LOG=trace` to see every split decision.

use tracing_subscriber::EnvFilter;
use understory_region_index::{Region, RegionIndex};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut idx: RegionIndex<i64> = RegionIndex::new(2);
    idx.insert(Region::from_bounds(&[(1, 5), (1, 5)]));
    idx.insert(Region::from_bounds(&[(1, 5), (11, 15)]));
    idx.insert(Region::from_bounds(&[(11, 15), (11, 15)]));
    idx.insert(Region::from_bounds(&[(11, 15), (1, 5)]));
    idx.rebuild();

    print!("{}", idx.dump());
    println!("stats: {:?}", idx.stats());

    for point in [[3, 3], [20, 20], [13, 2]] {
        println!("contains {:?}: {:?}", point, idx.find_point(&point));
    }

    // A later insertion is picked up by the next query.
    let late = idx.insert(Region::from_bounds(&[(18, 22), (18, 22)]));
    println!("stale after insert: {}", idx.is_stale());
    println!(
        "contains [20, 20]: {:?} (expected {:?})",
        idx.find_point(&[20, 20]),
        Some(late)
    );
}
