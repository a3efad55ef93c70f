// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Undo/redo history (spec.md §4.9).
//!
//! Two stacks of key-addressed, reversible entries. [`HistoryEntry::NewGroup`]
//! sentinels mark the boundary of one user-visible undo step, so a single
//! gesture that performs several low-level operations (deleting a selection
//! of several elements, say) undoes and redoes as one atomic batch rather
//! than one entry at a time.
//!
//! Deleted elements are not re-synthesized from scratch on undo: each kind
//! keeps a small graveyard, keyed by the element's stable key, holding the
//! last known snapshot of anything the modifier has deleted but might still
//! need to resurrect.

use ls_grid::{
    DecorationKey, Endpoints, LogicItemKey, OrderedLine, PlacedDecoration, PlacedLogicItem,
    SegmentKey, WireId,
};
use std::collections::HashMap;

/// A buried segment's last known geometry, enough to recreate it on undo:
/// which wire it belonged to, its line, and its endpoint classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuriedSegment {
    /// The wire the segment belonged to at the time it was deleted.
    pub wire_id: WireId,
    /// The segment's line.
    pub line: OrderedLine,
    /// The segment's endpoint classification.
    pub endpoints: Endpoints,
}

/// One undoable/redoable action, or a group boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum HistoryEntry {
    /// Boundary between two user-visible undo steps.
    NewGroup,
    /// A logic item was created under this key.
    LogicItemCreated(LogicItemKey),
    /// A logic item was deleted; its data is in the logic item graveyard.
    LogicItemDeleted(LogicItemKey),
    /// A decoration was created under this key.
    DecorationCreated(DecorationKey),
    /// A decoration was deleted; its data is in the decoration graveyard.
    DecorationDeleted(DecorationKey),
    /// A wire segment was created under this key.
    SegmentCreated(SegmentKey),
    /// A wire segment was deleted; its geometry is in the segment graveyard.
    SegmentDeleted(SegmentKey),
}

/// Undo/redo stacks plus per-kind graveyards of deleted element snapshots.
#[derive(Default)]
pub struct History {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    logic_item_graveyard: HashMap<LogicItemKey, PlacedLogicItem>,
    decoration_graveyard: HashMap<DecorationKey, PlacedDecoration>,
    segment_graveyard: HashMap<SegmentKey, BuriedSegment>,
}

impl History {
    /// Constructs an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the start of a new atomic undo step. Pushing a group boundary
    /// when the undo stack is empty or already ends in one is a no-op, so
    /// callers can bracket every public `Modifier` method without producing
    /// spurious empty groups.
    pub fn new_group(&mut self) {
        if !matches!(self.undo.last(), None | Some(HistoryEntry::NewGroup)) {
            self.undo.push(HistoryEntry::NewGroup);
        }
        self.redo.clear();
    }

    /// Records one reversible action in the current group.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.undo.push(entry);
    }

    /// Records a logic item's snapshot in its graveyard, for later undo
    /// recreation after a [`HistoryEntry::LogicItemDeleted`].
    pub fn bury_logic_item(&mut self, key: LogicItemKey, data: PlacedLogicItem) {
        self.logic_item_graveyard.insert(key, data);
    }

    /// Retrieves a buried logic item's last known snapshot.
    #[must_use]
    pub fn exhume_logic_item(&self, key: LogicItemKey) -> Option<&PlacedLogicItem> {
        self.logic_item_graveyard.get(&key)
    }

    /// Records a decoration's snapshot in its graveyard.
    pub fn bury_decoration(&mut self, key: DecorationKey, data: PlacedDecoration) {
        self.decoration_graveyard.insert(key, data);
    }

    /// Retrieves a buried decoration's last known snapshot.
    #[must_use]
    pub fn exhume_decoration(&self, key: DecorationKey) -> Option<&PlacedDecoration> {
        self.decoration_graveyard.get(&key)
    }

    /// Records a segment's geometry in its graveyard.
    pub fn bury_segment(&mut self, key: SegmentKey, data: BuriedSegment) {
        self.segment_graveyard.insert(key, data);
    }

    /// Retrieves a buried segment's last known geometry.
    #[must_use]
    pub fn exhume_segment(&self, key: SegmentKey) -> Option<BuriedSegment> {
        self.segment_graveyard.get(&key).copied()
    }

    /// Pops and returns the entries of the most recent undo group, moving
    /// them to the redo stack in the process. Returns an empty vector if
    /// there is nothing to undo.
    pub fn pop_undo_group(&mut self) -> Vec<HistoryEntry> {
        let group = pop_group(&mut self.undo);
        self.redo.push(HistoryEntry::NewGroup);
        for entry in group.iter().rev() {
            self.redo.push(entry.clone());
        }
        group
    }

    /// Pops and returns the entries of the most recently undone group,
    /// moving them back to the undo stack. Returns an empty vector if there
    /// is nothing to redo.
    pub fn pop_redo_group(&mut self) -> Vec<HistoryEntry> {
        let group = pop_group(&mut self.redo);
        self.undo.push(HistoryEntry::NewGroup);
        for entry in group.iter().rev() {
            self.undo.push(entry.clone());
        }
        group
    }

    /// Returns `true` if there is at least one group available to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.iter().any(|entry| !matches!(entry, HistoryEntry::NewGroup))
    }

    /// Returns `true` if there is at least one group available to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.redo.iter().any(|entry| !matches!(entry, HistoryEntry::NewGroup))
    }
}

/// Pops entries belonging to the most recent group off the back of `stack`,
/// in the order they were pushed, including leading/trailing `NewGroup`
/// sentinels consumed along the way.
fn pop_group(stack: &mut Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    while matches!(stack.last(), Some(HistoryEntry::NewGroup)) {
        stack.pop();
    }
    let mut group = Vec::new();
    while let Some(entry) = stack.last() {
        if matches!(entry, HistoryEntry::NewGroup) {
            break;
        }
        group.push(stack.pop().unwrap());
    }
    group.reverse();
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{AllocatesKey, KeyAllocator};

    #[test]
    fn undo_then_redo_round_trips_a_group() {
        let mut history = History::new();
        let mut alloc = KeyAllocator::new();
        let key = LogicItemKey::allocate(&mut alloc);

        history.new_group();
        history.push(HistoryEntry::LogicItemCreated(key));

        let undone = history.pop_undo_group();
        assert_eq!(undone, vec![HistoryEntry::LogicItemCreated(key)]);
        assert!(!history.can_undo());
        assert!(history.can_redo());

        let redone = history.pop_redo_group();
        assert_eq!(redone, vec![HistoryEntry::LogicItemCreated(key)]);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn graveyard_round_trips_deleted_logic_item_data() {
        let mut history = History::new();
        let mut alloc = KeyAllocator::new();
        let key = LogicItemKey::allocate(&mut alloc);
        let data = PlacedLogicItem {
            definition: ls_grid::LogicItemDefinition {
                logicitem_type: ls_grid::LogicItemType::Buffer,
                input_count: ls_grid::ConnectionCount::try_new(1).unwrap(),
                output_count: ls_grid::ConnectionCount::try_new(1).unwrap(),
                input_inverters: ls_grid::InverterBits::cleared(1),
                output_inverters: ls_grid::InverterBits::cleared(1),
                clock_attributes: None,
            },
            position: ls_grid::Point::new(ls_grid::Grid::ZERO, ls_grid::Grid::ZERO),
            orientation: ls_grid::Orientation::Right,
        };
        history.bury_logic_item(key, data.clone());
        assert_eq!(history.exhume_logic_item(key), Some(&data));
    }
}
