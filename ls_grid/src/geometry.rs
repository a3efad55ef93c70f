// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point, rectangle, and axis-aligned line types built on [`crate::grid::Grid`].

use crate::grid::Grid;
use kurbo::Rect;

/// A point on the integer grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: Grid,
    /// Vertical coordinate.
    pub y: Grid,
}

impl Point {
    /// Constructs a point from grid coordinates.
    #[must_use]
    pub const fn new(x: Grid, y: Grid) -> Self {
        Self { x, y }
    }
}

/// Orientation of a connector (logic item pin or wire endpoint).
///
/// `Undirected` is used for endpoints that do not participate in
/// input/output adjacency checks, such as wire corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Points towards increasing x.
    Right,
    /// Points towards decreasing x.
    Left,
    /// Points towards decreasing y.
    Up,
    /// Points towards increasing y.
    Down,
    /// No defined direction.
    #[default]
    Undirected,
}

impl Orientation {
    /// Returns the orientation a connector must have to mate with `self`
    /// (e.g. a `Right`-facing output mates with a `Left`-facing input).
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Undirected => Self::Undirected,
        }
    }
}

/// An axis-aligned rectangle fully representable on the integer grid.
///
/// Invariant: `p0.x <= p1.x` and `p0.y <= p1.y`. Used for logic item and
/// decoration body rectangles, which spec.md requires to be fully
/// representable on the grid at all times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RectGrid {
    /// Lower-left corner (minimum x and y).
    pub p0: Point,
    /// Upper-right corner (maximum x and y).
    pub p1: Point,
}

impl RectGrid {
    /// Constructs a `RectGrid` from two corners, canonicalizing their order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (x0, x1) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (y0, y1) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        Self {
            p0: Point::new(x0, y0),
            p1: Point::new(x1, y1),
        }
    }

    /// Translates the rectangle by `(dx, dy)`, returning `None` if either
    /// corner would leave the representable grid range.
    #[must_use]
    pub fn checked_translate(self, dx: Grid, dy: Grid) -> Option<Self> {
        let p0 = Point::new(self.p0.x.checked_add(dx)?, self.p0.y.checked_add(dy)?);
        let p1 = Point::new(self.p1.x.checked_add(dx)?, self.p1.y.checked_add(dy)?);
        Some(Self { p0, p1 })
    }

    /// Returns `true` if `point` lies within this rectangle, inclusive.
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.p0.x && point.x <= self.p1.x && point.y >= self.p0.y && point.y <= self.p1.y
    }

    /// Returns `true` if this rectangle intersects `other`.
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.p0.x <= other.p1.x
            && other.p0.x <= self.p1.x
            && self.p0.y <= other.p1.y
            && other.p0.y <= self.p1.y
    }
}

/// A floating-point rectangle, used for selection brushes (drag rectangles)
/// which do not need to land on grid lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectFine(pub Rect);

impl RectFine {
    /// Constructs a `RectFine` from two corners in floating point space.
    #[must_use]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self(Rect::new(x0, y0, x1, y1).abs())
    }

    /// Returns `true` if `rect` lies strictly inside `self`.
    ///
    /// Used by `VisibleSelection::apply_all_operations` (spec.md §4.8) to
    /// decide whether a candidate element's body is fully enclosed by a
    /// drag rectangle, rather than merely overlapping it.
    #[must_use]
    pub fn strictly_contains(self, rect: RectGrid) -> bool {
        let inner = Rect::new(
            f64::from(rect.p0.x),
            f64::from(rect.p0.y),
            f64::from(rect.p1.x),
            f64::from(rect.p1.y),
        );
        inner.x0 > self.0.x0
            && inner.y0 > self.0.y0
            && inner.x1 < self.0.x1
            && inner.y1 < self.0.y1
    }

    /// Returns the AABB as grid-space `(x0, y0, x1, y1)` floats, for spatial
    /// index queries.
    #[must_use]
    pub fn bounds(self) -> (f64, f64, f64, f64) {
        (self.0.x0, self.0.y0, self.0.x1, self.0.y1)
    }
}

/// An axis-aligned line segment with canonical endpoint order (`p0 <= p1`
/// lexicographically), either purely horizontal or purely vertical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrderedLine {
    /// The lexicographically smaller endpoint.
    pub p0: Point,
    /// The lexicographically larger (or equal, for a zero-length probe) endpoint.
    pub p1: Point,
}

impl OrderedLine {
    /// Constructs an `OrderedLine` from two endpoints, canonicalizing their
    /// order. Returns `None` if the points do not form an axis-aligned line.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Option<Self> {
        if a.x != b.x && a.y != b.y {
            return None;
        }
        let (p0, p1) = if (a.x, a.y) <= (b.x, b.y) { (a, b) } else { (b, a) };
        Some(Self { p0, p1 })
    }

    /// Returns `true` if the line is horizontal (including zero-length).
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        self.p0.y == self.p1.y
    }

    /// Returns the line's length along its axis, as a grid-space magnitude.
    #[must_use]
    pub fn length(self) -> i32 {
        if self.is_horizontal() {
            i32::from(self.p1.x.value()) - i32::from(self.p0.x.value())
        } else {
            i32::from(self.p1.y.value()) - i32::from(self.p0.y.value())
        }
    }

    /// Returns `true` if `point` lies on this line.
    #[must_use]
    pub fn contains_point(self, point: Point) -> bool {
        if self.is_horizontal() {
            point.y == self.p0.y && point.x >= self.p0.x && point.x <= self.p1.x
        } else {
            point.x == self.p0.x && point.y >= self.p0.y && point.y <= self.p1.y
        }
    }

    /// Returns `true` if `self` and `other` are collinear (share an axis and
    /// offset) and may be merged into a single segment.
    #[must_use]
    pub fn collinear_with(self, other: Self) -> bool {
        if self.is_horizontal() != other.is_horizontal() {
            return false;
        }
        if self.is_horizontal() {
            self.p0.y == other.p0.y
        } else {
            self.p0.x == other.p0.x
        }
    }
}

/// Line insertion strategy used when a wire is dragged from a single point
/// into an L-shaped two-segment line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineInsertionType {
    /// Insert the horizontal leg first, then the vertical leg.
    #[default]
    HorizontalFirst,
    /// Insert the vertical leg first, then the horizontal leg.
    VerticalFirst,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(v: i16) -> Grid {
        Grid::new(v)
    }

    #[test]
    fn rect_from_corners_canonicalizes() {
        let r = RectGrid::from_corners(Point::new(g(5), g(5)), Point::new(g(0), g(0)));
        assert_eq!(r.p0, Point::new(g(0), g(0)));
        assert_eq!(r.p1, Point::new(g(5), g(5)));
    }

    #[test]
    fn rect_checked_translate_detects_overflow() {
        let r = RectGrid::from_corners(Point::new(g(i16::MAX - 1), g(0)), Point::new(g(i16::MAX), g(1)));
        assert!(r.checked_translate(g(1), g(0)).is_none());
        assert!(r.checked_translate(g(-1), g(0)).is_some());
    }

    #[test]
    fn ordered_line_rejects_diagonal() {
        assert!(OrderedLine::new(Point::new(g(0), g(0)), Point::new(g(1), g(1))).is_none());
    }

    #[test]
    fn ordered_line_canonicalizes_order() {
        let line = OrderedLine::new(Point::new(g(10), g(0)), Point::new(g(0), g(0))).unwrap();
        assert_eq!(line.p0, Point::new(g(0), g(0)));
        assert_eq!(line.p1, Point::new(g(10), g(0)));
        assert!(line.is_horizontal());
        assert_eq!(line.length(), 10);
    }

    #[test]
    fn collinear_detection() {
        let a = OrderedLine::new(Point::new(g(0), g(0)), Point::new(g(5), g(0))).unwrap();
        let b = OrderedLine::new(Point::new(g(5), g(0)), Point::new(g(10), g(0))).unwrap();
        let c = OrderedLine::new(Point::new(g(5), g(1)), Point::new(g(10), g(1))).unwrap();
        assert!(a.collinear_with(b));
        assert!(!a.collinear_with(c));
    }
}
