// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive types: coordinates, intervals, regions, and split decisions.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

/// Integer coordinate abstraction for intervals and points.
///
/// Implemented for every primitive integer type. The only operation the tree
/// needs beyond ordering is the successor of a bound, used to place a split
/// threshold just past a region's right edge.
pub trait Coord: Copy + Ord + Debug {
    /// The next representable value, saturating at the maximum.
    fn successor(self) -> Self;
}

macro_rules! impl_coord {
    ($($t:ty),* $(,)?) => {
        $(
            impl Coord for $t {
                #[inline]
                fn successor(self) -> Self {
                    self.saturating_add(1)
                }
            }
        )*
    };
}

impl_coord!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Where an interval lies relative to a single coordinate value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The interval ends strictly before the value.
    Before,
    /// The interval contains the value.
    Straddles,
    /// The interval starts strictly after the value.
    After,
}

/// Closed interval `[left, right]` on one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    left: T,
    right: T,
}

impl<T: Coord> Interval<T> {
    /// Create a new interval.
    ///
    /// # Panics
    ///
    /// Panics if `left > right`.
    #[track_caller]
    pub fn new(left: T, right: T) -> Self {
        assert!(
            left <= right,
            "interval left bound {left:?} exceeds right bound {right:?}"
        );
        Self { left, right }
    }

    /// Create a new interval, or `None` if `left > right`.
    pub fn try_new(left: T, right: T) -> Option<Self> {
        (left <= right).then_some(Self { left, right })
    }

    /// The single-value interval `[v, v]`.
    pub const fn point(v: T) -> Self {
        Self { left: v, right: v }
    }

    /// Inclusive lower bound.
    pub const fn left(&self) -> T {
        self.left
    }

    /// Inclusive upper bound.
    pub const fn right(&self) -> T {
        self.right
    }

    /// Whether `left <= x <= right`.
    #[inline]
    pub fn contains(&self, x: T) -> bool {
        self.left <= x && x <= self.right
    }

    /// Whether the whole interval lies below `x`.
    #[inline]
    pub fn is_entirely_before(&self, x: T) -> bool {
        self.right < x
    }

    /// Whether the whole interval lies above `x`.
    #[inline]
    pub fn is_entirely_after(&self, x: T) -> bool {
        self.left > x
    }

    /// Classify the interval against `x`. Exactly one [`Side`] holds.
    #[inline]
    pub fn side_of(&self, x: T) -> Side {
        if self.is_entirely_before(x) {
            Side::Before
        } else if self.is_entirely_after(x) {
            Side::After
        } else {
            Side::Straddles
        }
    }
}

/// Axis-aligned hyperrectangle: one closed [`Interval`] per dimension.
///
/// A region is immutable once built. Its dimension is the number of intervals
/// and is always at least one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region<T> {
    intervals: Box<[Interval<T>]>,
}

impl<T: Coord> Region<T> {
    /// Create a region from its per-axis intervals.
    ///
    /// # Panics
    ///
    /// Panics if `intervals` is empty.
    #[track_caller]
    pub fn new(intervals: impl Into<Box<[Interval<T>]>>) -> Self {
        let intervals = intervals.into();
        assert!(!intervals.is_empty(), "a region needs at least one axis");
        Self { intervals }
    }

    /// Create a region from `(left, right)` bound pairs.
    ///
    /// # Panics
    ///
    /// Panics if `bounds` is empty or any pair has `left > right`.
    #[track_caller]
    pub fn from_bounds(bounds: &[(T, T)]) -> Self {
        Self::new(
            bounds
                .iter()
                .map(|&(l, r)| Interval::new(l, r))
                .collect::<Vec<_>>(),
        )
    }

    /// Number of axes.
    pub fn dimension(&self) -> usize {
        self.intervals.len()
    }

    /// All intervals, ordered by axis.
    pub fn intervals(&self) -> &[Interval<T>] {
        &self.intervals
    }

    /// The interval on `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= self.dimension()`.
    #[inline]
    pub fn interval(&self, axis: usize) -> Interval<T> {
        self.intervals[axis]
    }

    /// Whether every axis interval contains the matching point coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `point.len()` differs from the region dimension.
    #[inline]
    #[track_caller]
    pub fn contains_point(&self, point: &[T]) -> bool {
        assert_eq!(
            point.len(),
            self.intervals.len(),
            "point and region dimensions differ"
        );
        self.intervals
            .iter()
            .zip(point)
            .all(|(interval, &x)| interval.contains(x))
    }
}

impl<T: Coord> FromIterator<Interval<T>> for Region<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Split rule: an axis and a threshold on it.
///
/// Regions whose interval on `axis` lies below `threshold` go left, those above
/// it go right, and those containing it stay at the node that owns the decision.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decision<T> {
    /// Axis the decision compares on.
    pub axis: usize,
    /// Threshold coordinate on `axis`.
    pub threshold: T,
}

impl<T: Coord> Decision<T> {
    /// Create a new decision.
    pub const fn new(axis: usize, threshold: T) -> Self {
        Self { axis, threshold }
    }

    /// Classify a region against this decision.
    #[inline]
    pub fn classify(&self, region: &Region<T>) -> Side {
        region.interval(self.axis).side_of(self.threshold)
    }
}
