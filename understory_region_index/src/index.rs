// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `RegionIndex` API: append-only region storage with a lazily rebuilt tree.

use alloc::vec::Vec;
use core::fmt;

use crate::build::build;
use crate::node::{Node, TreeDump, TreeStats};
use crate::types::{Coord, Region};

/// Handle of a region inside a [`RegionIndex`]: its insertion position.
///
/// Regions are never removed, so a handle stays valid for the lifetime of the index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(u32);

impl RegionId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Region ids are 32-bit; insertion asserts the count fits."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    /// Position of the region in [`RegionIndex::regions`].
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tuning for tree construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    /// Largest region count turned directly into a leaf without trying a split.
    ///
    /// Must be at least 1. The default of 1 splits as long as any cut separates
    /// the regions; larger values trade deeper scans for a smaller tree.
    pub leaf_capacity: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { leaf_capacity: 1 }
    }
}

/// Returned by [`RegionIndex::try_find_point`] when regions were added since the
/// last rebuild.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StaleTree;

impl fmt::Display for StaleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("region index has additions not yet reflected in its tree")
    }
}

impl core::error::Error for StaleTree {}

/// Point-membership index over D-dimensional integer regions.
///
/// Insertion only appends and marks the index stale. The partition tree is
/// rebuilt from the full region list on the next query, or explicitly through
/// [`rebuild`](Self::rebuild).
pub struct RegionIndex<T> {
    dimension: usize,
    config: BuildConfig,
    regions: Vec<Region<T>>,
    root: Option<Node<T>>,
    stale: bool,
    rebuilds: u64,
}

impl<T: Coord> RegionIndex<T> {
    /// Create an empty index for regions of `dimension` axes.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero.
    #[track_caller]
    pub fn new(dimension: usize) -> Self {
        Self::with_config(dimension, BuildConfig::default())
    }

    /// Create an empty index with explicit build tuning.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` or `config.leaf_capacity` is zero.
    #[track_caller]
    pub fn with_config(dimension: usize, config: BuildConfig) -> Self {
        assert!(dimension > 0, "region index dimension must be positive");
        assert!(config.leaf_capacity > 0, "leaf capacity must be positive");
        Self {
            dimension,
            config,
            regions: Vec::new(),
            root: None,
            stale: false,
            rebuilds: 0,
        }
    }

    /// Reserve space for at least `n` more regions.
    pub fn reserve(&mut self, n: usize) {
        self.regions.reserve(n);
    }

    /// Add a region. The tree is not touched until the next rebuild.
    ///
    /// # Panics
    ///
    /// Panics if the region's dimension differs from the index's.
    #[track_caller]
    pub fn insert(&mut self, region: Region<T>) -> RegionId {
        assert_eq!(
            region.dimension(),
            self.dimension,
            "region dimension does not match the index"
        );
        assert!(
            u32::try_from(self.regions.len()).is_ok_and(|n| n < u32::MAX),
            "region index is full"
        );
        let id = RegionId::new(self.regions.len());
        self.regions.push(region);
        self.stale = true;
        id
    }

    /// Rebuild the tree if regions were added since the last rebuild.
    pub fn rebuild_if_stale(&mut self) {
        if self.stale {
            self.rebuild();
        }
    }

    /// Drop the current tree and build a new one from every region.
    ///
    /// An index without regions has no tree.
    pub fn rebuild(&mut self) {
        // Release the old tree before building the new one.
        self.root = None;
        if !self.regions.is_empty() {
            let ids = (0..self.regions.len()).map(RegionId::new).collect();
            self.root = Some(build(&self.regions, ids, &self.config));
        }
        self.stale = false;
        self.rebuilds += 1;

        debug_assert_eq!(
            self.checked_region_count(),
            self.regions.len(),
            "every region must be checked at exactly one node"
        );

        #[cfg(feature = "tracing")]
        {
            let stats = self.stats();
            tracing::debug!(
                regions = self.regions.len(),
                rebuilds = self.rebuilds,
                nodes = stats.nodes,
                depth = stats.depth,
                largest_check_list = stats.largest_check_list,
                "rebuilt region tree"
            );
        }
    }

    /// Whether any region contains `point`, rebuilding first if stale.
    ///
    /// # Panics
    ///
    /// Panics if `point.len()` differs from the index dimension.
    #[track_caller]
    pub fn contains_point(&mut self, point: &[T]) -> bool {
        self.find_point(point).is_some()
    }

    /// A region containing `point`, rebuilding first if stale.
    ///
    /// When several regions contain the point, the one met first during descent
    /// is returned.
    ///
    /// # Panics
    ///
    /// Panics if `point.len()` differs from the index dimension.
    #[track_caller]
    pub fn find_point(&mut self, point: &[T]) -> Option<RegionId> {
        self.check_point(point);
        self.rebuild_if_stale();
        self.root.as_ref()?.find(&self.regions, point)
    }

    /// Every region containing `point`, rebuilding first if stale.
    ///
    /// # Panics
    ///
    /// Panics if `point.len()` differs from the index dimension.
    #[track_caller]
    pub fn regions_containing(&mut self, point: &[T]) -> Vec<RegionId> {
        self.check_point(point);
        self.rebuild_if_stale();
        let Some(root) = self.root.as_ref() else {
            return Vec::new();
        };
        root.path(point)
            .flat_map(|node| node.regions_to_check().iter().copied())
            .filter(|id| self.regions[id.index()].contains_point(point))
            .collect()
    }

    /// Query the tree as last built, without rebuilding.
    ///
    /// Takes `&self`, so queries can run concurrently behind a read lock while
    /// a writer inserts and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns [`StaleTree`] if regions were added since the last rebuild.
    ///
    /// # Panics
    ///
    /// Panics if `point.len()` differs from the index dimension.
    #[track_caller]
    pub fn try_find_point(&self, point: &[T]) -> Result<Option<RegionId>, StaleTree> {
        self.check_point(point);
        if self.stale {
            return Err(StaleTree);
        }
        Ok(self
            .root
            .as_ref()
            .and_then(|root| root.find(&self.regions, point)))
    }

    /// Sum of check-list sizes over the current tree.
    ///
    /// Equals [`len`](Self::len) right after a rebuild.
    pub fn checked_region_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::checked_region_count)
    }

    /// Structural summary of the current tree.
    pub fn stats(&self) -> TreeStats {
        self.root.as_ref().map(Node::stats).unwrap_or_default()
    }

    /// Displayable rendering of the current tree, for debugging.
    pub fn dump(&self) -> TreeDump<'_, T> {
        TreeDump {
            root: self.root.as_ref(),
        }
    }

    /// Root of the current tree, if one has been built.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_ref()
    }

    /// Every region ever added, in insertion order.
    pub fn regions(&self) -> &[Region<T>] {
        &self.regions
    }

    /// The region behind `id`.
    pub fn region(&self, id: RegionId) -> Option<&Region<T>> {
        self.regions.get(id.index())
    }

    /// Number of regions added.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True if no regions were added.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Axis count of every region and point.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// True if regions were added since the last rebuild.
    ///
    /// A new index reports `false`: with no regions there is nothing to build.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of times the tree has been rebuilt, lazily or explicitly.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Build tuning in use.
    pub fn config(&self) -> BuildConfig {
        self.config
    }

    #[track_caller]
    fn check_point(&self, point: &[T]) {
        assert_eq!(
            point.len(),
            self.dimension,
            "point dimension does not match the index"
        );
    }
}

impl<T: Coord> Extend<Region<T>> for RegionIndex<T> {
    fn extend<I: IntoIterator<Item = Region<T>>>(&mut self, iter: I) {
        for region in iter {
            self.insert(region);
        }
    }
}

impl<T: Coord> fmt::Debug for RegionIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionIndex")
            .field("dimension", &self.dimension)
            .field("regions", &self.regions.len())
            .field("stale", &self.stale)
            .field("has_tree", &self.root.is_some())
            .field("rebuilds", &self.rebuilds)
            .finish_non_exhaustive()
    }
}
