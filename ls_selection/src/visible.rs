// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`VisibleSelection`]: a base selection plus queued rectangular drag
//! operations, materialized on demand (spec.md §4.8).
//!
//! While the user drags a selection rectangle, the operation (add or
//! subtract everything strictly inside the rectangle) is queued rather than
//! applied immediately, so the brush can be resized or cancelled cheaply.
//! [`VisibleSelection::apply_all_operations`] replays the queue against the
//! current layout state to produce the selection that should actually be
//! drawn as "selected" this frame.

use crate::selection::Selection;
use ls_grid::{DecorationId, LogicItemId, Offset, Part, RectFine, Segment};
use ls_index::{LayoutIndex, TreePayload};

/// Whether a queued rectangular operation adds to or removes from the base
/// selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionFunction {
    /// Select everything strictly inside the rectangle, in addition to the base.
    Add,
    /// Deselect everything strictly inside the rectangle.
    Substract,
}

/// A base selection plus a queue of pending rectangular operations.
#[derive(Clone, Debug, Default)]
pub struct VisibleSelection {
    base: Selection,
    operations: Vec<(RectFine, SelectionFunction)>,
}

impl VisibleSelection {
    /// Constructs a visible selection over `base`, with no pending operations.
    #[must_use]
    pub fn new(base: Selection) -> Self {
        Self {
            base,
            operations: Vec::new(),
        }
    }

    /// Returns the un-materialized base selection.
    #[must_use]
    pub fn base(&self) -> &Selection {
        &self.base
    }

    /// Queues a rectangular add/subtract operation. Queued operations apply
    /// in order on top of `base` and on top of each other.
    pub fn push_operation(&mut self, rect: RectFine, function: SelectionFunction) {
        self.operations.push((rect, function));
    }

    /// Discards all queued operations without applying them.
    pub fn clear_operations(&mut self) {
        self.operations.clear();
    }

    /// Commits the queued operations into `base` (via `materialize`) and
    /// clears the queue, so future drags start from the committed result.
    pub fn commit(&mut self, index: &LayoutIndex) {
        self.base = self.materialize(index);
        self.operations.clear();
    }

    /// Replays `base` plus every queued operation against `index`, without
    /// committing, returning what should currently be drawn as selected.
    ///
    /// Only elements whose bounding rectangle lies *strictly* inside the
    /// operation's rectangle are affected (spec.md §4.8); an element merely
    /// overlapping the brush is left untouched, matching
    /// [`RectFine::strictly_contains`]. A wire segment that qualifies is
    /// selected in full, not partially: the rectangle brush has no notion of
    /// a sub-range along a segment's own axis.
    #[must_use]
    pub fn apply_all_operations(&self, index: &LayoutIndex) -> Selection {
        self.materialize(index)
    }

    fn materialize(&self, index: &LayoutIndex) -> Selection {
        let mut result = self.base.clone();
        for (rect, function) in &self.operations {
            let mut logic_items: Vec<LogicItemId> = Vec::new();
            let mut decorations: Vec<DecorationId> = Vec::new();
            let mut segments: Vec<Segment> = Vec::new();
            index.query_rect(*rect, |payload| match payload {
                TreePayload::LogicItem(id) => logic_items.push(id),
                TreePayload::Decoration(id) => decorations.push(id),
                TreePayload::WireSegment(segment) => segments.push(segment),
            });

            for id in logic_items {
                if !strictly_enclosed(index, TreePayload::LogicItem(id), *rect) {
                    continue;
                }
                match function {
                    SelectionFunction::Add => result.add_logic_item(id),
                    SelectionFunction::Substract => result.remove_logic_item(id),
                }
            }
            for id in decorations {
                if !strictly_enclosed(index, TreePayload::Decoration(id), *rect) {
                    continue;
                }
                match function {
                    SelectionFunction::Add => result.add_decoration(id),
                    SelectionFunction::Substract => result.remove_decoration(id),
                }
            }
            for segment in segments {
                let payload = TreePayload::WireSegment(segment);
                if !strictly_enclosed(index, payload, *rect) {
                    continue;
                }
                let Some(part) = full_segment_part(index, payload) else {
                    continue;
                };
                match function {
                    SelectionFunction::Add => result.add_segment_part(segment, part),
                    SelectionFunction::Substract => result.remove_segment_part(segment, part),
                }
            }
        }
        result
    }
}

/// The [`Part`] spanning a wire segment's whole length, from its stored
/// spatial-index bounds. `None` if the segment isn't in the index, or its
/// length doesn't fit in an [`Offset`].
fn full_segment_part(index: &LayoutIndex, payload: TreePayload) -> Option<Part> {
    let (x0, y0, x1, y1) = index.bounds_of(payload)?;
    let length = round_to_offset((x1 - x0).max(y1 - y0))?;
    Part::new(Offset::ZERO, length)
}

/// Rounds a non-negative, finite world-space length to the nearest
/// [`Offset`], or `None` if it doesn't fit in `u16`.
fn round_to_offset(value: f64) -> Option<Offset> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let rounded = value.round();
    if rounded > f64::from(u16::MAX) {
        return None;
    }
    u16::try_from(rounded as i64).ok().map(Offset::new)
}

/// Returns `true` if `payload`'s stored body rectangle lies strictly inside
/// `rect`, matching [`RectFine::strictly_contains`]'s semantics directly on
/// the index's stored bounds (world-space floats already derived from the
/// element's grid-space rectangle).
fn strictly_enclosed(index: &LayoutIndex, payload: TreePayload, rect: RectFine) -> bool {
    let Some((x0, y0, x1, y1)) = index.bounds_of(payload) else {
        return false;
    };
    let (rx0, ry0, rx1, ry1) = rect.bounds();
    x0 > rx0 && y0 > ry0 && x1 < rx1 && y1 < ry1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_operations_returns_base_unchanged() {
        let mut base = Selection::new();
        base.add_logic_item(LogicItemId::from_index(0));
        let visible = VisibleSelection::new(base.clone());
        let index = LayoutIndex::new();
        let materialized = visible.apply_all_operations(&index);
        assert_eq!(materialized.logic_items(), base.logic_items());
    }

    #[test]
    fn strictly_enclosed_wire_segment_is_selected_in_full() {
        use ls_grid::{Grid, InfoMessage, OrderedLine, Point, SegmentGeometry, SegmentIndex, SegmentPointType, WireId};

        let mut index = LayoutIndex::new();
        let segment = Segment::new(WireId::from_index(2), SegmentIndex::from_index(0));
        let line = OrderedLine::new(Point::new(Grid::new(2), Grid::new(0)), Point::new(Grid::new(8), Grid::new(0))).unwrap();
        index.submit(&InfoMessage::SegmentInserted {
            segment,
            data: SegmentGeometry {
                line,
                endpoints: (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint),
            },
        });

        let mut visible = VisibleSelection::new(Selection::new());
        visible.push_operation(RectFine::new(0.0, -1.0, 10.0, 1.0), SelectionFunction::Add);

        let materialized = visible.apply_all_operations(&index);
        let parts = materialized.segment_parts(segment);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0], Part::new(Offset::ZERO, Offset::new(6)).unwrap());
    }

    #[test]
    fn overlapping_but_not_enclosed_wire_segment_is_left_untouched() {
        use ls_grid::{Grid, InfoMessage, OrderedLine, Point, SegmentGeometry, SegmentIndex, SegmentPointType, WireId};

        let mut index = LayoutIndex::new();
        let segment = Segment::new(WireId::from_index(2), SegmentIndex::from_index(0));
        let line = OrderedLine::new(Point::new(Grid::new(2), Grid::new(0)), Point::new(Grid::new(8), Grid::new(0))).unwrap();
        index.submit(&InfoMessage::SegmentInserted {
            segment,
            data: SegmentGeometry {
                line,
                endpoints: (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint),
            },
        });

        let mut visible = VisibleSelection::new(Selection::new());
        visible.push_operation(RectFine::new(0.0, -1.0, 5.0, 1.0), SelectionFunction::Add);

        let materialized = visible.apply_all_operations(&index);
        assert!(materialized.segment_parts(segment).is_empty());
    }
}
