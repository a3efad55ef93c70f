// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The spatial index: an R-tree-like structure over world-space AABBs.
//!
//! This is a flat-vector backend with linear scans, the same starting point
//! `understory_index`'s `FlatVec` backend uses for small sets: simple, cheap
//! to keep correct, and a baseline a pluggable tree backend could later
//! replace without changing the call sites in [`crate::LayoutIndex`].

use hashbrown::HashMap;
use ls_grid::{DecorationId, LogicItemId, RectFine, RectGrid, Segment};

/// The payload stored at each spatial-index slot: which kind of element
/// occupies this rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreePayload {
    /// A logic item's body rectangle.
    LogicItem(LogicItemId),
    /// A decoration's body rectangle.
    Decoration(DecorationId),
    /// A wire segment's bounding rectangle.
    WireSegment(Segment),
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    bounds: (f64, f64, f64, f64),
    payload: TreePayload,
}

fn rect_grid_bounds(rect: RectGrid) -> (f64, f64, f64, f64) {
    (
        f64::from(rect.p0.x),
        f64::from(rect.p0.y),
        f64::from(rect.p1.x),
        f64::from(rect.p1.y),
    )
}

fn intersects(a: (f64, f64, f64, f64), b: (f64, f64, f64, f64)) -> bool {
    a.0 <= b.2 && b.0 <= a.2 && a.1 <= b.3 && b.1 <= a.3
}

fn contains_point(a: (f64, f64, f64, f64), x: f64, y: f64) -> bool {
    x >= a.0 && x <= a.2 && y >= a.1 && y <= a.3
}

/// Spatial index over world-space rectangles for every inserted element.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    entries: Vec<Option<Entry>>,
    by_payload: HashMap<TreePayload, usize>,
    free_slots: Vec<usize>,
}

impl SpatialIndex {
    /// Constructs an empty spatial index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new entry, or updates it in place if `payload` already has one.
    pub fn upsert(&mut self, payload: TreePayload, rect: RectGrid) {
        let bounds = rect_grid_bounds(rect);
        if let Some(&slot) = self.by_payload.get(&payload) {
            self.entries[slot] = Some(Entry { bounds, payload });
            return;
        }
        let slot = if let Some(slot) = self.free_slots.pop() {
            self.entries[slot] = Some(Entry { bounds, payload });
            slot
        } else {
            self.entries.push(Some(Entry { bounds, payload }));
            self.entries.len() - 1
        };
        self.by_payload.insert(payload, slot);
    }

    /// Removes the entry for `payload`, if present.
    pub fn remove(&mut self, payload: TreePayload) {
        if let Some(slot) = self.by_payload.remove(&payload) {
            self.entries[slot] = None;
            self.free_slots.push(slot);
        }
    }

    /// Returns `true` if an entry for `payload` is currently present.
    #[must_use]
    pub fn contains(&self, payload: TreePayload) -> bool {
        self.by_payload.contains_key(&payload)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_payload.clear();
        self.free_slots.clear();
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_payload.len()
    }

    /// Returns `true` if the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_payload.is_empty()
    }

    /// Visits every payload whose rectangle intersects `rect`.
    pub fn query_rect<F: FnMut(TreePayload)>(&self, rect: RectFine, mut f: F) {
        let bounds = rect.bounds();
        for entry in self.entries.iter().flatten() {
            if intersects(entry.bounds, bounds) {
                f(entry.payload);
            }
        }
    }

    /// Returns the stored world-space bounds for `payload`, if present.
    #[must_use]
    pub fn bounds_of(&self, payload: TreePayload) -> Option<(f64, f64, f64, f64)> {
        let slot = *self.by_payload.get(&payload)?;
        self.entries[slot].map(|entry| entry.bounds)
    }

    /// Returns `true` if any element's rectangle contains the fine point
    /// `(x, y)`.
    #[must_use]
    pub fn has_element(&self, x: f64, y: f64) -> bool {
        self.entries
            .iter()
            .flatten()
            .any(|entry| contains_point(entry.bounds, x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{Grid, Point};

    fn rect(x0: i16, y0: i16, x1: i16, y1: i16) -> RectGrid {
        RectGrid::from_corners(Point::new(Grid::new(x0), Grid::new(y0)), Point::new(Grid::new(x1), Grid::new(y1)))
    }

    #[test]
    fn upsert_then_query_finds_overlap() {
        let mut index = SpatialIndex::new();
        let payload = TreePayload::LogicItem(LogicItemId::from_index(0));
        index.upsert(payload, rect(0, 0, 10, 10));

        let mut found = Vec::new();
        index.query_rect(RectFine::new(5.0, 5.0, 15.0, 15.0), |p| found.push(p));
        assert_eq!(found, vec![payload]);
    }

    #[test]
    fn remove_drops_from_query_results() {
        let mut index = SpatialIndex::new();
        let payload = TreePayload::LogicItem(LogicItemId::from_index(0));
        index.upsert(payload, rect(0, 0, 10, 10));
        index.remove(payload);

        let mut found = Vec::new();
        index.query_rect(RectFine::new(0.0, 0.0, 10.0, 10.0), |p| found.push(p));
        assert!(found.is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn free_slots_are_reused() {
        let mut index = SpatialIndex::new();
        let a = TreePayload::LogicItem(LogicItemId::from_index(0));
        let b = TreePayload::LogicItem(LogicItemId::from_index(1));
        index.upsert(a, rect(0, 0, 1, 1));
        index.remove(a);
        index.upsert(b, rect(0, 0, 1, 1));
        assert_eq!(index.entries.len(), 1);
    }

    #[test]
    fn has_element_checks_point_membership() {
        let mut index = SpatialIndex::new();
        index.upsert(
            TreePayload::LogicItem(LogicItemId::from_index(0)),
            rect(0, 0, 10, 10),
        );
        assert!(index.has_element(5.0, 5.0));
        assert!(!index.has_element(20.0, 20.0));
    }
}
