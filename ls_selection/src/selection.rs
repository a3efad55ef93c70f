// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Selection`]: the set of currently selected elements (spec.md §4.7).
//!
//! Tracks logic items and decorations by compact id, plus wire segments by
//! the sub-ranges of offsets selected on each segment (a wire can be
//! partially selected). Ids are compact and therefore unstable across
//! swap-and-pop compaction, so every `Selection` self-updates by replaying
//! [`InfoMessage`] through [`Selection::apply_message`] — the same way the
//! indices in `ls_index` do, just scoped to one element set instead of the
//! whole layout.

use ls_grid::{DecorationId, InfoMessage, LogicItemId, Part, Segment};
use smallvec::SmallVec;
use std::collections::HashMap;

/// A selected sub-range of one wire segment. Stored as a small inline vector
/// since a segment is rarely split into more than a couple of selected
/// ranges.
type PartList = SmallVec<[Part; 4]>;

/// The set of selected elements: logic items, decorations, and wire segment
/// parts.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    logic_items: Vec<LogicItemId>,
    decorations: Vec<DecorationId>,
    segments: HashMap<Segment, PartList>,
    revision: u64,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logic_items.is_empty() && self.decorations.is_empty() && self.segments.is_empty()
    }

    /// Returns the monotonically increasing revision counter, bumped on every
    /// semantic change. Cheap way for observers to detect "did anything
    /// change" without diffing the full contents.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the selected logic item ids.
    #[must_use]
    pub fn logic_items(&self) -> &[LogicItemId] {
        &self.logic_items
    }

    /// Returns the selected decoration ids.
    #[must_use]
    pub fn decorations(&self) -> &[DecorationId] {
        &self.decorations
    }

    /// Returns the selected parts of `segment`, if any.
    #[must_use]
    pub fn segment_parts(&self, segment: Segment) -> &[Part] {
        self.segments.get(&segment).map_or(&[], SmallVec::as_slice)
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn contains_logic_item(&self, id: LogicItemId) -> bool {
        self.logic_items.contains(&id)
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn contains_decoration(&self, id: DecorationId) -> bool {
        self.decorations.contains(&id)
    }

    /// Adds `id` to the selection, if not already present.
    pub fn add_logic_item(&mut self, id: LogicItemId) {
        if !self.logic_items.contains(&id) {
            self.logic_items.push(id);
            self.bump_revision();
        }
    }

    /// Removes `id` from the selection, if present.
    pub fn remove_logic_item(&mut self, id: LogicItemId) {
        if let Some(pos) = self.logic_items.iter().position(|&existing| existing == id) {
            self.logic_items.swap_remove(pos);
            self.bump_revision();
        }
    }

    /// Toggles `id`'s membership.
    pub fn toggle_logic_item(&mut self, id: LogicItemId) {
        if self.contains_logic_item(id) {
            self.remove_logic_item(id);
        } else {
            self.add_logic_item(id);
        }
    }

    /// Adds `id` to the selection, if not already present.
    pub fn add_decoration(&mut self, id: DecorationId) {
        if !self.decorations.contains(&id) {
            self.decorations.push(id);
            self.bump_revision();
        }
    }

    /// Removes `id` from the selection, if present.
    pub fn remove_decoration(&mut self, id: DecorationId) {
        if let Some(pos) = self.decorations.iter().position(|&existing| existing == id) {
            self.decorations.swap_remove(pos);
            self.bump_revision();
        }
    }

    /// Adds `part` of `segment` to the selection, merging with any existing
    /// overlapping or adjacent selected range.
    pub fn add_segment_part(&mut self, segment: Segment, part: Part) {
        let parts = self.segments.entry(segment).or_default();
        merge_part(parts, part);
        self.bump_revision();
    }

    /// Removes `part` of `segment` from the selection, splitting an existing
    /// range if `part` falls strictly inside it.
    pub fn remove_segment_part(&mut self, segment: Segment, part: Part) {
        let Some(parts) = self.segments.get_mut(&segment) else {
            return;
        };
        subtract_part(parts, part);
        if parts.is_empty() {
            self.segments.remove(&segment);
        }
        self.bump_revision();
    }

    /// Removes all selected elements.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        self.logic_items.clear();
        self.decorations.clear();
        self.segments.clear();
        self.bump_revision();
    }

    /// Applies one info message, keeping ids and segment handles in sync
    /// with compaction performed by the layout this selection refers to.
    pub fn apply_message(&mut self, message: &InfoMessage) {
        match message {
            InfoMessage::LogicItemIdUpdated { new_id, old_id } => {
                if let Some(slot) = self.logic_items.iter_mut().find(|id| **id == *old_id) {
                    *slot = *new_id;
                }
            }
            InfoMessage::LogicItemDeleted { id } => self.remove_logic_item(*id),
            InfoMessage::DecorationIdUpdated { new_id, old_id } => {
                if let Some(slot) = self.decorations.iter_mut().find(|id| **id == *old_id) {
                    *slot = *new_id;
                }
            }
            InfoMessage::DecorationDeleted { id } => self.remove_decoration(*id),
            InfoMessage::SegmentIdUpdated { new_segment, old_segment } => {
                if let Some(parts) = self.segments.remove(old_segment) {
                    self.segments.insert(*new_segment, parts);
                }
            }
            InfoMessage::SegmentPartDeleted { segment_part } => {
                self.remove_segment_part(segment_part.segment, segment_part.part);
            }
            InfoMessage::SegmentPartMoved { source, destination } => {
                self.remove_segment_part(source.segment, source.part);
                self.add_segment_part(destination.segment, destination.part);
            }
            _ => {}
        }
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Inserts `part` into `parts`, coalescing with any range it overlaps or
/// touches so the list never holds two ranges that could be one.
fn merge_part(parts: &mut PartList, part: Part) {
    let mut begin = part.begin;
    let mut end = part.end;
    parts.retain(|existing| {
        let touches = existing.begin <= end && begin <= existing.end;
        if touches {
            begin = begin.min(existing.begin);
            end = end.max(existing.end);
        }
        !touches
    });
    if let Some(merged) = Part::new(begin, end) {
        parts.push(merged);
    }
}

/// Removes `part` from `parts`, splitting any range that only partially
/// overlaps it into the surviving sub-ranges.
fn subtract_part(parts: &mut PartList, part: Part) {
    let mut result = PartList::new();
    for existing in parts.drain(..) {
        if !existing.overlaps(part) {
            result.push(existing);
            continue;
        }
        if existing.begin < part.begin {
            if let Some(left) = Part::new(existing.begin, part.begin.min(existing.end)) {
                result.push(left);
            }
        }
        if existing.end > part.end {
            if let Some(right) = Part::new(part.end.max(existing.begin), existing.end) {
                result.push(right);
            }
        }
    }
    *parts = result;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{Offset, SegmentIndex, WireId};

    fn part(b: u16, e: u16) -> Part {
        Part::new(Offset::new(b), Offset::new(e)).unwrap()
    }

    fn segment() -> Segment {
        Segment::new(WireId::from_index(2), SegmentIndex::from_index(0))
    }

    #[test]
    fn adjacent_parts_merge() {
        let mut sel = Selection::new();
        sel.add_segment_part(segment(), part(0, 5));
        sel.add_segment_part(segment(), part(5, 10));
        assert_eq!(sel.segment_parts(segment()), &[part(0, 10)]);
    }

    #[test]
    fn subtracting_middle_splits_range() {
        let mut sel = Selection::new();
        sel.add_segment_part(segment(), part(0, 10));
        sel.remove_segment_part(segment(), part(3, 6));
        let mut parts: Vec<Part> = sel.segment_parts(segment()).to_vec();
        parts.sort_by_key(|p| p.begin);
        assert_eq!(parts, vec![part(0, 3), part(6, 10)]);
    }

    #[test]
    fn id_update_renames_selected_logic_item() {
        let mut sel = Selection::new();
        let old_id = LogicItemId::from_index(3);
        let new_id = LogicItemId::from_index(1);
        sel.add_logic_item(old_id);
        sel.apply_message(&InfoMessage::LogicItemIdUpdated { new_id, old_id });
        assert!(sel.contains_logic_item(new_id));
        assert!(!sel.contains_logic_item(old_id));
    }

    #[test]
    fn deletion_drops_selection_membership() {
        let mut sel = Selection::new();
        let id = LogicItemId::from_index(0);
        sel.add_logic_item(id);
        sel.apply_message(&InfoMessage::LogicItemDeleted { id });
        assert!(sel.is_empty());
    }
}
