//! Interval and rectangle primitives used by the R-Tree.

use crate::rtree::rtree_constants::DIMENSIONS;
use std::fmt::{Display, Formatter};

/// A closed range `[lower, upper]` along one dimension.
#[derive(Clone, Copy, PartialEq, Debug, serde::Deserialize, serde::Serialize)]
pub struct Interval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
}

impl Interval {
    /// Seed for bounding-box folds. Never valid outside a rebuild.
    pub const EMPTY: Interval = Interval {
        lower: f64::INFINITY,
        upper: f64::NEG_INFINITY,
    };

    /// Covers every representable coordinate.
    pub const MAX: Interval = Interval {
        lower: -f64::MAX,
        upper: f64::MAX,
    };

    pub fn new(lower: f64, upper: f64) -> Interval {
        Interval { lower, upper }
    }

    /// A zero-length interval at `value`.
    pub fn point(value: f64) -> Interval {
        Interval::new(value, value)
    }

    /// Checks whether the two intervals share at least one coordinate.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.lower.max(other.lower) <= self.upper.min(other.upper)
    }

    /// Length of the shared part. Negative when the intervals are disjoint,
    /// so only meaningful after [`Interval::overlaps`] holds.
    pub fn overlap_length(&self, other: &Interval) -> f64 {
        self.upper.min(other.upper) - self.lower.max(other.lower)
    }

    /// Containment test used by leaf-level search.
    ///
    /// This evaluates the same inequality as [`Interval::overlaps`]; it does not
    /// require `other` to lie inside `self`.
    pub fn covers(&self, other: &Interval) -> bool {
        self.lower.max(other.lower) <= other.upper.min(self.upper)
    }

    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }

    fn expand(&mut self, other: &Interval) {
        self.lower = self.lower.min(other.lower);
        self.upper = self.upper.max(other.upper);
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// An axis-aligned rectangle, one [`Interval`] per dimension.
///
/// Dimension 0 holds the latitude, dimension 1 the longitude.
///
/// # Examples
///
/// ```rust
/// use place_rtree::{Interval, Rectangle};
///
/// let area = Rectangle::new(Interval::new(0.0, 10.0), Interval::new(0.0, 10.0));
/// assert!(area.overlaps(&Rectangle::point(5.0, 5.0)));
/// assert_eq!(area.overlap_area(&Rectangle::new(
///     Interval::new(5.0, 15.0),
///     Interval::new(5.0, 15.0),
/// )), 25.0);
/// ```
#[derive(Clone, Copy, PartialEq, Debug, serde::Deserialize, serde::Serialize)]
pub struct Rectangle {
    pub intervals: [Interval; DIMENSIONS],
}

impl Rectangle {
    /// Seed for bounding-box folds, see [`Interval::EMPTY`].
    pub const EMPTY: Rectangle = Rectangle {
        intervals: [Interval::EMPTY; DIMENSIONS],
    };

    /// The rectangle an empty root starts with.
    pub const MAX: Rectangle = Rectangle {
        intervals: [Interval::MAX; DIMENSIONS],
    };

    pub fn new(lat: Interval, lon: Interval) -> Rectangle {
        Rectangle {
            intervals: [lat, lon],
        }
    }

    /// A degenerate rectangle holding a single coordinate pair.
    pub fn point(lat: f64, lon: f64) -> Rectangle {
        Rectangle::new(Interval::point(lat), Interval::point(lon))
    }

    /// Returns the smallest rectangle enclosing every rectangle in `rects`,
    /// or [`Rectangle::EMPTY`] when the iterator yields nothing.
    pub fn bounding<'a, I>(rects: I) -> Rectangle
    where
        I: IntoIterator<Item = &'a Rectangle>,
    {
        let mut bbox = Rectangle::EMPTY;
        for rect in rects {
            bbox.expand(rect);
        }
        bbox
    }

    pub fn expand(&mut self, other: &Rectangle) {
        for (mine, theirs) in self.intervals.iter_mut().zip(other.intervals.iter()) {
            mine.expand(theirs);
        }
    }

    /// Checks whether the rectangles overlap in every dimension.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.intervals
            .iter()
            .zip(other.intervals.iter())
            .all(|(a, b)| a.overlaps(b))
    }

    /// Per-dimension [`Interval::covers`] in every dimension.
    pub fn covers(&self, other: &Rectangle) -> bool {
        self.intervals
            .iter()
            .zip(other.intervals.iter())
            .all(|(a, b)| a.covers(b))
    }

    /// Area of the shared region, or zero when the rectangles are disjoint.
    pub fn overlap_area(&self, other: &Rectangle) -> f64 {
        let mut area = 1.0;
        for (a, b) in self.intervals.iter().zip(other.intervals.iter()) {
            if !a.overlaps(b) {
                return 0.0;
            }
            area *= a.overlap_length(b);
        }
        area
    }

    /// Euclidean distance between the two rectangles' centers.
    pub fn distance(&self, other: &Rectangle) -> f64 {
        self.center()
            .iter()
            .zip(other.center().iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Per-dimension extent.
    pub fn spans(&self) -> [f64; DIMENSIONS] {
        self.intervals.map(|interval| interval.span())
    }

    pub fn center(&self) -> [f64; DIMENSIONS] {
        self.intervals.map(|interval| interval.midpoint())
    }

    pub fn is_point(&self) -> bool {
        self.intervals.iter().all(|i| i.lower == i.upper)
    }

    /// True while any dimension is inverted, i.e. for [`Rectangle::EMPTY`].
    pub fn is_empty(&self) -> bool {
        self.intervals.iter().any(Interval::is_empty)
    }

    pub fn has_nan(&self) -> bool {
        self.intervals
            .iter()
            .any(|i| i.lower.is_nan() || i.upper.is_nan())
    }
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rectangle({}, {})", self.intervals[0], self.intervals[1])
    }
}
