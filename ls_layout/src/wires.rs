// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact storage for wires and their segment trees (spec.md §3.4, §4.1).
//!
//! Unlike logic items and decorations, a [`ls_grid::WireId`] is not
//! swap-and-pop compacted here: a wire's segment tree is itself a nested
//! structure, and renumbering a whole tree's segments on every deletion would
//! cascade into a rename message per segment for no benefit over a simple
//! free list. Wire ids are instead handed out from a free list once freed,
//! the same way [`ls_grid::KeyAllocator`] hands out keys, while the segments
//! *within* one wire's tree remain swap-and-pop compactable exactly as
//! spec.md describes.

use ls_grid::{
    AllocatesKey, DisplayState, Endpoints, InfoMessage, KeyAllocator, OrderedLine, Offset, Segment, SegmentGeometry,
    SegmentIndex, SegmentKey, SegmentPart, WireId,
};

#[derive(Debug, PartialEq)]
struct SegmentSlot {
    line: OrderedLine,
    endpoints: Endpoints,
    key: SegmentKey,
}

#[derive(Debug, PartialEq)]
struct Wire {
    state: DisplayState,
    segments: Vec<SegmentSlot>,
}

impl Wire {
    fn empty(state: DisplayState) -> Self {
        Self {
            state,
            segments: Vec::new(),
        }
    }
}

/// Storage for every wire's segment tree, including the two reserved wires
/// ([`WireId::TEMPORARY`] and [`WireId::COLLIDING`]).
#[derive(Debug, PartialEq)]
pub struct Wires {
    wires: Vec<Option<Wire>>,
    free_slots: Vec<usize>,
    segment_keys: KeyAllocator,
}

impl Default for Wires {
    fn default() -> Self {
        Self::new()
    }
}

impl Wires {
    /// Constructs storage with only the two reserved wires present.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wires: vec![
                Some(Wire::empty(DisplayState::Temporary)),
                Some(Wire::empty(DisplayState::Colliding)),
            ],
            free_slots: Vec::new(),
            segment_keys: KeyAllocator::new(),
        }
    }

    /// Allocates a fresh wire id, initially uninserted and empty.
    pub fn create_wire(&mut self) -> WireId {
        if let Some(index) = self.free_slots.pop() {
            self.wires[index] = Some(Wire::empty(DisplayState::Temporary));
            return WireId::from_index(u32::try_from(index).unwrap());
        }
        let index = self.wires.len();
        self.wires.push(Some(Wire::empty(DisplayState::Temporary)));
        WireId::from_index(u32::try_from(index).unwrap())
    }

    /// Frees a non-reserved, already-emptied wire id for reuse.
    ///
    /// # Panics
    ///
    /// Panics if `id` is one of the two reserved wire ids, or still has
    /// segments (callers must delete every segment first, emitting the
    /// appropriate messages, before freeing the wire itself).
    pub fn delete_wire(&mut self, id: WireId) {
        assert!(!id.is_reserved(), "cannot delete a reserved wire");
        let index = id.index();
        let segments_len = self.wires[index].as_ref().map_or(0, |wire| wire.segments.len());
        assert_eq!(segments_len, 0, "wire must be emptied before deletion");
        self.wires[index] = None;
        self.free_slots.push(index);
    }

    /// Returns the display state of `wire_id`.
    #[must_use]
    pub fn wire_state(&self, wire_id: WireId) -> DisplayState {
        self.wires[wire_id.index()].as_ref().expect("wire id is not live").state
    }

    /// Returns the number of segments in `wire_id`'s tree.
    #[must_use]
    pub fn segment_count(&self, wire_id: WireId) -> usize {
        self.wires[wire_id.index()].as_ref().map_or(0, |wire| wire.segments.len())
    }

    /// Adds a new segment to `wire_id`'s tree, returning its handle and the
    /// [`InfoMessage::SegmentCreated`] event.
    pub fn add_segment(&mut self, wire_id: WireId, line: OrderedLine, endpoints: Endpoints) -> (Segment, InfoMessage) {
        let key = SegmentKey::allocate(&mut self.segment_keys);
        self.add_segment_with_key(wire_id, key, line, endpoints)
    }

    /// Adds a new segment to `wire_id`'s tree under a caller-supplied key
    /// instead of drawing a fresh one. Used by undo to resurrect a buried
    /// segment under the key its callers (history, selections) still
    /// remember it by.
    pub fn add_segment_with_key(&mut self, wire_id: WireId, key: SegmentKey, line: OrderedLine, endpoints: Endpoints) -> (Segment, InfoMessage) {
        let wire = self.wires[wire_id.index()].as_mut().expect("wire id is not live");
        let index = wire.segments.len();
        wire.segments.push(SegmentSlot { line, endpoints, key });
        let segment = Segment::new(wire_id, SegmentIndex::from_index(u32::try_from(index).unwrap()));
        let size = length_offset(line);
        (segment, InfoMessage::SegmentCreated { segment, size, key })
    }

    /// Returns `true` if `wire_id` currently refers to a live wire slot.
    #[must_use]
    pub fn is_live(&self, wire_id: WireId) -> bool {
        wire_id.index() < self.wires.len() && self.wires[wire_id.index()].is_some()
    }

    /// Returns the geometry and endpoint classification of `segment`.
    #[must_use]
    pub fn geometry(&self, segment: Segment) -> SegmentGeometry {
        let slot = self.slot(segment);
        SegmentGeometry {
            line: slot.line,
            endpoints: slot.endpoints,
        }
    }

    /// Returns the stable key of `segment`.
    #[must_use]
    pub fn segment_key(&self, segment: Segment) -> SegmentKey {
        self.slot(segment).key
    }

    /// Overwrites `segment`'s geometry and endpoint classification in place,
    /// without emitting a message (callers building a higher-level editing
    /// operation decide which message, if any, that operation corresponds
    /// to — a plain coordinate update during a drag is silent, while a
    /// classification change on an inserted segment should be surfaced as
    /// [`InfoMessage::InsertedEndPointsUpdated`] by the caller).
    pub fn set_geometry(&mut self, segment: Segment, line: OrderedLine, endpoints: Endpoints) {
        let slot = self.slot_mut(segment);
        slot.line = line;
        slot.endpoints = endpoints;
    }

    /// Removes `segment` via swap-and-pop within its wire's tree, returning
    /// the deletion message and, if another segment moved into its slot,
    /// the rename message for that segment. Caller must emit the deletion
    /// message before the rename message (spec.md §4.6 ordering rule).
    pub fn remove_segment(&mut self, segment: Segment) -> (InfoMessage, Option<InfoMessage>) {
        let wire = self.wires[segment.wire_id.index()].as_mut().expect("wire id is not live");
        let removed = &wire.segments[segment.segment_index.index()];
        let size = length_offset(removed.line);
        let deleted = InfoMessage::SegmentPartDeleted {
            segment_part: SegmentPart::new(
                segment,
                ls_grid::Part::new(Offset::ZERO, size).expect("non-empty segment has positive length"),
            ),
        };

        let last_index = wire.segments.len() - 1;
        let index = segment.segment_index.index();
        if index == last_index {
            wire.segments.pop();
            return (deleted, None);
        }

        wire.segments.swap_remove(index);
        let moved = &wire.segments[index];
        let old_segment = Segment::new(segment.wire_id, SegmentIndex::from_index(u32::try_from(last_index).unwrap()));
        let new_segment = segment;
        // `Colliding` wires are still registered in the collision index
        // (see `ls_circuit::editing::is_registered`), so the rename message
        // must carry their data too, not just `Valid`/`Normal`.
        let rename = if wire.state != DisplayState::Temporary {
            InfoMessage::InsertedSegmentIdUpdated {
                new_segment,
                old_segment,
                data: SegmentGeometry {
                    line: moved.line,
                    endpoints: moved.endpoints,
                },
            }
        } else {
            InfoMessage::SegmentIdUpdated { new_segment, old_segment }
        };
        (deleted, Some(rename))
    }

    /// Moves `wire_id` into the inserted state, returning one
    /// [`InfoMessage::SegmentInserted`] event per segment currently in its
    /// tree.
    pub fn mark_wire_inserted(&mut self, wire_id: WireId, state: DisplayState) -> Vec<InfoMessage> {
        let wire = self.wires[wire_id.index()].as_mut().expect("wire id is not live");
        wire.state = state;
        wire.segments
            .iter()
            .enumerate()
            .map(|(index, slot)| InfoMessage::SegmentInserted {
                segment: Segment::new(wire_id, SegmentIndex::from_index(u32::try_from(index).unwrap())),
                data: SegmentGeometry {
                    line: slot.line,
                    endpoints: slot.endpoints,
                },
            })
            .collect()
    }

    /// Moves `wire_id` out of the inserted state, returning one
    /// [`InfoMessage::SegmentUninserted`] event per segment currently in its
    /// tree.
    pub fn mark_wire_uninserted(&mut self, wire_id: WireId) -> Vec<InfoMessage> {
        let wire = self.wires[wire_id.index()].as_mut().expect("wire id is not live");
        wire.state = DisplayState::Temporary;
        wire.segments
            .iter()
            .enumerate()
            .map(|(index, slot)| InfoMessage::SegmentUninserted {
                segment: Segment::new(wire_id, SegmentIndex::from_index(u32::try_from(index).unwrap())),
                data: SegmentGeometry {
                    line: slot.line,
                    endpoints: slot.endpoints,
                },
            })
            .collect()
    }

    /// Iterates over every live, non-reserved wire id, in storage order.
    pub fn wire_ids(&self) -> impl Iterator<Item = WireId> + '_ {
        self.wires
            .iter()
            .enumerate()
            .skip(2)
            .filter_map(|(index, wire)| wire.as_ref().map(|_| WireId::from_index(u32::try_from(index).unwrap())))
    }

    /// Iterates over every segment handle in `wire_id`'s tree, in storage order.
    pub fn segments(&self, wire_id: WireId) -> impl Iterator<Item = Segment> + '_ {
        let count = self.segment_count(wire_id);
        (0..count).map(move |index| Segment::new(wire_id, SegmentIndex::from_index(u32::try_from(index).unwrap())))
    }

    fn slot(&self, segment: Segment) -> &SegmentSlot {
        &self.wires[segment.wire_id.index()]
            .as_ref()
            .expect("wire id is not live")
            .segments[segment.segment_index.index()]
    }

    fn slot_mut(&mut self, segment: Segment) -> &mut SegmentSlot {
        &mut self.wires[segment.wire_id.index()]
            .as_mut()
            .expect("wire id is not live")
            .segments[segment.segment_index.index()]
    }
}

fn length_offset(line: OrderedLine) -> Offset {
    let length = line.length();
    Offset::new(u16::try_from(length).expect("segment length exceeds offset range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{Grid, Point, SegmentPointType};

    fn line(x0: i16, y0: i16, x1: i16, y1: i16) -> OrderedLine {
        OrderedLine::new(Point::new(Grid::new(x0), Grid::new(y0)), Point::new(Grid::new(x1), Grid::new(y1))).unwrap()
    }

    #[test]
    fn add_then_remove_last_segment_needs_no_rename() {
        let mut wires = Wires::new();
        let wire_id = wires.create_wire();
        let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        let (segment, _) = wires.add_segment(wire_id, line(0, 0, 10, 0), endpoints);

        let (_, rename) = wires.remove_segment(segment);
        assert!(rename.is_none());
        assert_eq!(wires.segment_count(wire_id), 0);
    }

    #[test]
    fn removing_non_last_segment_renames_the_moved_one() {
        let mut wires = Wires::new();
        let wire_id = wires.create_wire();
        let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        let (first, _) = wires.add_segment(wire_id, line(0, 0, 10, 0), endpoints);
        let (second, _) = wires.add_segment(wire_id, line(0, 1, 10, 1), endpoints);

        let (_, rename) = wires.remove_segment(first);
        match rename {
            Some(InfoMessage::SegmentIdUpdated { new_segment, old_segment }) => {
                assert_eq!(new_segment, first);
                assert_eq!(old_segment, second);
            }
            other => panic!("unexpected rename message: {other:?}"),
        }
    }

    #[test]
    fn mark_inserted_emits_one_message_per_segment() {
        let mut wires = Wires::new();
        let wire_id = wires.create_wire();
        let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        wires.add_segment(wire_id, line(0, 0, 10, 0), endpoints);
        wires.add_segment(wire_id, line(0, 1, 10, 1), endpoints);

        let messages = wires.mark_wire_inserted(wire_id, DisplayState::Normal);
        assert_eq!(messages.len(), 2);
        assert_eq!(wires.wire_state(wire_id), DisplayState::Normal);
    }
}
