// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partition tree nodes and point descent.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::index::RegionId;
use crate::types::{Coord, Decision, Region};

/// A node of the partition tree.
///
/// Every node carries the regions that must be scanned when a query reaches it.
/// A leaf holds every region reachable through it. A split node holds only the
/// regions that straddle its [`Decision`]; all others live in exactly one of its
/// subtrees. Children are owned exclusively by their parent.
pub struct Node<T> {
    checks: Vec<RegionId>,
    kind: Kind<T>,
}

pub(crate) enum Kind<T> {
    Leaf,
    Split {
        decision: Decision<T>,
        left: Option<Box<Node<T>>>,
        right: Option<Box<Node<T>>>,
    },
}

impl<T: Coord> Node<T> {
    pub(crate) fn leaf(checks: Vec<RegionId>) -> Self {
        Self {
            checks,
            kind: Kind::Leaf,
        }
    }

    pub(crate) fn split(
        decision: Decision<T>,
        straddling: Vec<RegionId>,
        left: Option<Self>,
        right: Option<Self>,
    ) -> Self {
        Self {
            checks: straddling,
            kind: Kind::Split {
                decision,
                left: left.map(Box::new),
                right: right.map(Box::new),
            },
        }
    }

    /// Regions scanned directly at this node.
    pub fn regions_to_check(&self) -> &[RegionId] {
        &self.checks
    }

    /// The split rule, or `None` for a leaf.
    pub fn decision(&self) -> Option<&Decision<T>> {
        match &self.kind {
            Kind::Leaf => None,
            Kind::Split { decision, .. } => Some(decision),
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, Kind::Leaf)
    }

    /// Subtree holding regions entirely below the threshold.
    pub fn left(&self) -> Option<&Self> {
        match &self.kind {
            Kind::Leaf => None,
            Kind::Split { left, .. } => left.as_deref(),
        }
    }

    /// Subtree holding regions entirely above the threshold.
    pub fn right(&self) -> Option<&Self> {
        match &self.kind {
            Kind::Leaf => None,
            Kind::Split { right, .. } => right.as_deref(),
        }
    }

    /// Nodes visited when descending towards `point`, starting at this node.
    ///
    /// Only these nodes can check a region that contains `point`: a region sent
    /// left lies entirely below its parent's threshold and a region sent right
    /// entirely above it, and regions containing the threshold stay at the
    /// parent. Descent therefore stops when the point lands on a threshold.
    ///
    /// # Panics
    ///
    /// The iterator panics if `point` has no coordinate on the axis of a split
    /// it reaches.
    pub fn path<'a>(&'a self, point: &'a [T]) -> Path<'a, T> {
        Path {
            next: Some(self),
            point,
        }
    }

    /// First region checked along the descent path that contains `point`.
    ///
    /// # Panics
    ///
    /// Panics if `point.len()` differs from the dimension of the regions checked,
    /// or is too short for a split on the descent path.
    pub fn find(&self, regions: &[Region<T>], point: &[T]) -> Option<RegionId> {
        self.path(point)
            .flat_map(|node| node.checks.iter().copied())
            .find(|id| regions[id.index()].contains_point(point))
    }

    /// Sum of `regions_to_check` sizes over this subtree.
    pub fn checked_region_count(&self) -> usize {
        self.iter().map(|n| n.checks.len()).sum()
    }

    /// Depth-first iterator over this subtree, parents before children.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { stack: vec![self] }
    }

    /// Structural summary of this subtree.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut stack = vec![(self, 1_usize)];
        while let Some((node, depth)) = stack.pop() {
            stats.nodes += 1;
            stats.depth = stats.depth.max(depth);
            stats.checked_regions += node.checks.len();
            stats.largest_check_list = stats.largest_check_list.max(node.checks.len());
            match &node.kind {
                Kind::Leaf => stats.leaves += 1,
                Kind::Split { left, right, .. } => {
                    stats.splits += 1;
                    for child in [left.as_deref(), right.as_deref()].into_iter().flatten() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
        stats
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        match &self.kind {
            Kind::Leaf => {
                writeln!(f, "{:pad$}Leaf (checks {})", "", self.checks.len())
            }
            Kind::Split {
                decision,
                left,
                right,
            } => {
                writeln!(
                    f,
                    "{:pad$}Split(axis = {}, threshold = {:?}) (checks {})",
                    "",
                    decision.axis,
                    decision.threshold,
                    self.checks.len()
                )?;
                for (label, child) in [("Left", left), ("Right", right)] {
                    match child {
                        Some(child) => {
                            writeln!(f, "{:pad$}{label} child:", "")?;
                            child.write_indented(f, indent + 1)?;
                        }
                        None => writeln!(f, "{:pad$}{label} child missing.", "")?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Node");
        s.field("checks", &self.checks.len());
        if let Kind::Split {
            decision,
            left,
            right,
        } = &self.kind
        {
            s.field("decision", decision)
                .field("has_left", &left.is_some())
                .field("has_right", &right.is_some());
        }
        s.finish_non_exhaustive()
    }
}

/// Iterator over the nodes on a point's descent path. See [`Node::path`].
#[derive(Debug)]
pub struct Path<'a, T> {
    next: Option<&'a Node<T>>,
    point: &'a [T],
}

impl<'a, T: Coord> Iterator for Path<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        if let Kind::Split {
            decision,
            left,
            right,
        } = &node.kind
        {
            assert!(
                decision.axis < self.point.len(),
                "point has no coordinate on split axis {}",
                decision.axis
            );
            self.next = match self.point[decision.axis].cmp(&decision.threshold) {
                Ordering::Less => left.as_deref(),
                Ordering::Greater => right.as_deref(),
                Ordering::Equal => None,
            };
        }
        Some(node)
    }
}

/// Depth-first iterator over a subtree. See [`Node::iter`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T: Coord> Iterator for Iter<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Kind::Split { left, right, .. } = &node.kind {
            // Right first so the left subtree is visited first.
            self.stack.extend(right.as_deref());
            self.stack.extend(left.as_deref());
        }
        Some(node)
    }
}

/// Structural summary of a partition tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total node count.
    pub nodes: usize,
    /// Nodes without a decision.
    pub leaves: usize,
    /// Nodes with a decision.
    pub splits: usize,
    /// Longest root-to-node path, counted in nodes.
    pub depth: usize,
    /// Sum of all check-list sizes. Equals the region count for a fresh tree.
    pub checked_regions: usize,
    /// Longest single check list, the worst case scanned at one node.
    pub largest_check_list: usize,
}

/// Human-readable rendering of a tree's shape and decisions.
///
/// Intended for debugging; the exact text is not stable.
pub struct TreeDump<'a, T> {
    pub(crate) root: Option<&'a Node<T>>,
}

impl<T: Coord> fmt::Display for TreeDump<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            None => writeln!(f, "Empty tree."),
            Some(root) => {
                writeln!(f, "Partition tree:")?;
                root.write_indented(f, 0)
            }
        }
    }
}

impl<T: Coord> fmt::Debug for TreeDump<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
