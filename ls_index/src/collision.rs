// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The collision index: a per-cell occupancy map (spec.md §4.2).

use hashbrown::HashMap;
use ls_grid::{Grid, OrderedLine, Point, RectGrid};

/// What occupies a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionTag {
    /// Part of a logic item's body.
    LogicItemBody,
    /// Part of a horizontal wire segment.
    WireHorizontal,
    /// Part of a vertical wire segment.
    WireVertical,
    /// A point where a horizontal and vertical wire cross.
    WireCrossing,
}

/// Returns `true` if `incoming` cannot coexist with `existing` at the same point.
#[must_use]
fn conflicts(existing: CollisionTag, incoming: CollisionTag) -> bool {
    use CollisionTag::{LogicItemBody, WireCrossing, WireHorizontal, WireVertical};
    match (existing, incoming) {
        (LogicItemBody, _) | (_, LogicItemBody) => true,
        (WireHorizontal, WireVertical) | (WireVertical, WireHorizontal) => false,
        (WireCrossing, WireHorizontal | WireVertical) | (WireHorizontal | WireVertical, WireCrossing) => false,
        (a, b) => a == b,
    }
}

/// Iterates every grid point covered by a logic item's body rectangle.
pub fn body_cells(rect: RectGrid) -> impl Iterator<Item = Point> {
    let (x0, x1) = (rect.p0.x.value(), rect.p1.x.value());
    let (y0, y1) = (rect.p0.y.value(), rect.p1.y.value());
    (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| Point::new(Grid::new(x), Grid::new(y))))
}

/// Iterates every grid point covered by a wire segment's line, tagged by
/// the segment's orientation.
pub fn wire_cells(line: OrderedLine) -> impl Iterator<Item = (Point, CollisionTag)> {
    let tag = if line.is_horizontal() {
        CollisionTag::WireHorizontal
    } else {
        CollisionTag::WireVertical
    };
    let (x0, x1) = (line.p0.x.value(), line.p1.x.value());
    let (y0, y1) = (line.p0.y.value(), line.p1.y.value());
    (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| (Point::new(Grid::new(x), Grid::new(y)), tag)))
}

/// Per-cell occupancy map over all currently inserted elements.
#[derive(Debug, Default)]
pub struct CollisionIndex {
    cells: HashMap<Point, CollisionTag>,
}

impl CollisionIndex {
    /// Constructs an empty collision index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if placing `cells` would conflict with anything
    /// already occupying the index. Runs in `O(#cells)`.
    #[must_use]
    pub fn is_colliding<I: IntoIterator<Item = (Point, CollisionTag)>>(&self, cells: I) -> bool {
        cells.into_iter().any(|(point, tag)| {
            self.cells
                .get(&point)
                .is_some_and(|existing| conflicts(*existing, tag))
        })
    }

    /// Inserts occupancy for `cells`, upgrading crossing wire cells to
    /// [`CollisionTag::WireCrossing`] where two perpendicular wires meet.
    pub fn insert_cells<I: IntoIterator<Item = (Point, CollisionTag)>>(&mut self, cells: I) {
        for (point, tag) in cells {
            self.cells
                .entry(point)
                .and_modify(|existing| {
                    if !conflicts(*existing, tag) && *existing != tag {
                        *existing = CollisionTag::WireCrossing;
                    }
                })
                .or_insert(tag);
        }
    }

    /// Removes occupancy for `cells`. Crossing cells downgrade back to the
    /// remaining occupant's tag when `remaining` identifies it; callers that
    /// cannot determine the remaining tag should re-derive it from the
    /// layout and call [`CollisionIndex::insert_cells`] again.
    pub fn remove_cells<I: IntoIterator<Item = Point>>(&mut self, cells: I) {
        for point in cells {
            self.cells.remove(&point);
        }
    }

    /// Clears all occupancy.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Returns the tag occupying `point`, if any.
    #[must_use]
    pub fn tag_at(&self, point: Point) -> Option<CollisionTag> {
        self.cells.get(&point).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i16, y: i16) -> Point {
        Point::new(Grid::new(x), Grid::new(y))
    }

    #[test]
    fn perpendicular_wires_do_not_collide() {
        let mut index = CollisionIndex::new();
        let h = OrderedLine::new(p(0, 0), p(10, 0)).unwrap();
        index.insert_cells(wire_cells(h));

        let v = OrderedLine::new(p(5, -5), p(5, 5)).unwrap();
        assert!(!index.is_colliding(wire_cells(v)));
    }

    #[test]
    fn parallel_overlapping_wires_collide() {
        let mut index = CollisionIndex::new();
        let a = OrderedLine::new(p(0, 0), p(10, 0)).unwrap();
        index.insert_cells(wire_cells(a));

        let b = OrderedLine::new(p(5, 0), p(15, 0)).unwrap();
        assert!(index.is_colliding(wire_cells(b)));
    }

    #[test]
    fn body_cells_collide_with_anything() {
        let mut index = CollisionIndex::new();
        let rect = RectGrid::from_corners(p(0, 0), p(2, 2));
        index.insert_cells(body_cells(rect).map(|pt| (pt, CollisionTag::LogicItemBody)));

        let v = OrderedLine::new(p(1, -1), p(1, 1)).unwrap();
        assert!(index.is_colliding(wire_cells(v)));
    }

    #[test]
    fn crossing_upgrades_tag_then_remove_clears_cell() {
        let mut index = CollisionIndex::new();
        let h = OrderedLine::new(p(0, 0), p(10, 0)).unwrap();
        let v = OrderedLine::new(p(5, -5), p(5, 5)).unwrap();
        index.insert_cells(wire_cells(h));
        index.insert_cells(wire_cells(v));
        assert_eq!(index.tag_at(p(5, 0)), Some(CollisionTag::WireCrossing));

        index.remove_cells(wire_cells(h).map(|(pt, _)| pt));
        index.remove_cells(wire_cells(v).map(|(pt, _)| pt));
        assert_eq!(index.tag_at(p(5, 0)), None);
    }
}
