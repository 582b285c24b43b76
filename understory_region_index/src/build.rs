// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive construction of the partition tree.
//!
//! At every node each axis proposes one cut: just past the lower-median right
//! edge of the regions on that axis. The cut with the fewest straddling regions
//! wins, with ties going to the lowest axis. Regions below the cut build the left
//! subtree, regions above it build the right subtree, and straddlers are checked
//! at the node itself.

use alloc::vec::Vec;

use crate::index::{BuildConfig, RegionId};
use crate::node::Node;
use crate::types::{Coord, Decision, Region, Side};

/// Build a subtree that checks exactly `ids`.
///
/// # Panics
///
/// Panics if `ids` is empty.
pub(crate) fn build<T: Coord>(
    regions: &[Region<T>],
    ids: Vec<RegionId>,
    config: &BuildConfig,
) -> Node<T> {
    assert!(
        !ids.is_empty(),
        "cannot build a partition tree from zero regions"
    );
    let mut scratch = Vec::with_capacity(ids.len());
    build_node(regions, ids, config, &mut scratch)
}

fn build_node<T: Coord>(
    regions: &[Region<T>],
    ids: Vec<RegionId>,
    config: &BuildConfig,
    scratch: &mut Vec<T>,
) -> Node<T> {
    if ids.len() <= config.leaf_capacity {
        return Node::leaf(ids);
    }

    let decision = choose_decision(regions, &ids, scratch);

    let mut before = Vec::new();
    let mut after = Vec::new();
    let mut straddling = Vec::new();
    for &id in &ids {
        match decision.classify(&regions[id.index()]) {
            Side::Before => before.push(id),
            Side::After => after.push(id),
            Side::Straddles => straddling.push(id),
        }
    }

    // A cut that moves everything to one side would recurse on the same input.
    if before.len() == ids.len() || after.len() == ids.len() {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            regions = ids.len(),
            axis = decision.axis,
            threshold = ?decision.threshold,
            "no cut separates the regions; keeping them in one leaf"
        );
        return Node::leaf(ids);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        axis = decision.axis,
        threshold = ?decision.threshold,
        before = before.len(),
        after = after.len(),
        straddling = straddling.len(),
        "split"
    );

    let left = if before.is_empty() {
        None
    } else {
        Some(build_node(regions, before, config, scratch))
    };
    let right = if after.is_empty() {
        None
    } else {
        Some(build_node(regions, after, config, scratch))
    };
    Node::split(decision, straddling, left, right)
}

/// Pick the cut with the fewest straddling regions over all axes.
fn choose_decision<T: Coord>(
    regions: &[Region<T>],
    ids: &[RegionId],
    rights: &mut Vec<T>,
) -> Decision<T> {
    let dimension = regions[ids[0].index()].dimension();
    let median = (ids.len() - 1) / 2;
    let mut best: Option<(Decision<T>, usize)> = None;
    for axis in 0..dimension {
        rights.clear();
        rights.extend(ids.iter().map(|id| regions[id.index()].interval(axis).right()));
        let median_right = *rights.select_nth_unstable(median).1;
        let decision = Decision::new(axis, median_right.successor());
        let straddling = ids
            .iter()
            .filter(|id| decision.classify(&regions[id.index()]) == Side::Straddles)
            .count();
        if best.is_none_or(|(_, fewest)| straddling < fewest) {
            best = Some((decision, straddling));
        }
    }
    let (decision, _) = best.expect("regions have at least one axis");
    decision
}
