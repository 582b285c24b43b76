// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Region Index: point membership over D-dimensional integer regions.
//!
//! A region is an axis-aligned hyperrectangle with one closed integer interval
//! per axis. [`RegionIndex`] answers "does any stored region contain this point?"
//! without scanning every region, using a binary partition tree.
//!
//! - Insert regions cheaply; insertion only appends and marks the index stale.
//! - The tree is rebuilt from scratch on the next query, or explicitly with
//!   [`RegionIndex::rebuild`] after a batch of insertions.
//! - Queries descend a single root-to-node path and scan only the regions
//!   checked at the nodes on it.
//!
//! It is generic over any primitive integer coordinate type (see [`Coord`]).
//!
//! # Example
//!
//! ```rust
//! use understory_region_index::{Region, RegionIndex};
//!
//! let mut idx: RegionIndex<i64> = RegionIndex::new(2);
//! idx.insert(Region::from_bounds(&[(1, 5), (1, 5)]));
//! idx.insert(Region::from_bounds(&[(1, 5), (11, 15)]));
//! idx.insert(Region::from_bounds(&[(11, 15), (11, 15)]));
//! idx.insert(Region::from_bounds(&[(11, 15), (1, 5)]));
//! idx.rebuild();
//!
//! assert!(idx.contains_point(&[3, 3]));
//! assert!(!idx.contains_point(&[20, 20]));
//! assert_eq!(idx.checked_region_count(), 4);
//! ```
//!
//! ## How the tree is built
//!
//! Each node tries one cut per axis, placed just past the lower-median right edge
//! of its regions on that axis, and keeps the cut that the fewest regions
//! straddle (the lowest axis wins ties). Regions below the cut form the left
//! subtree, regions above it the right subtree, and straddling regions are
//! checked at the node. When the chosen cut would leave every region on one side,
//! the node becomes a leaf holding all of them, which keeps construction finite
//! for duplicate or heavily overlapping regions.
//!
//! ## Contract violations
//!
//! Dimension mismatches, inverted intervals, and empty regions are programmer
//! errors and panic. The only recoverable condition is querying a stale tree
//! through [`RegionIndex::try_find_point`].
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for rebuilds (`debug`) and individual
//!   split decisions (`trace`).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod build;
pub mod index;
pub mod node;
pub mod types;

pub use index::{BuildConfig, RegionId, RegionIndex, StaleTree};
pub use node::{Node, TreeDump, TreeStats};
pub use types::{Coord, Decision, Interval, Region, Side};
