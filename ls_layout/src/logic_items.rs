// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact storage for logic items (spec.md §3.2, §4.1).

use ls_grid::{
    AllocatesKey, DisplayState, InfoMessage, KeyAllocator, LogicItemDefinition, LogicItemId, LogicItemKey,
    Orientation, PlacedLogicItem, Point,
};

#[derive(Debug, PartialEq)]
struct Slot {
    data: PlacedLogicItem,
    state: DisplayState,
    key: LogicItemKey,
}

/// Swap-and-pop compactable storage for every logic item, inserted or not.
#[derive(Debug, Default, PartialEq)]
pub struct LogicItems {
    slots: Vec<Slot>,
    keys: KeyAllocator,
}

impl LogicItems {
    /// Constructs empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new, uninserted logic item slot and returns its id plus
    /// the [`InfoMessage::LogicItemCreated`] event to broadcast.
    pub fn create(&mut self, definition: LogicItemDefinition, position: Point, orientation: Orientation) -> (LogicItemId, InfoMessage) {
        let key = LogicItemKey::allocate(&mut self.keys);
        let id = LogicItemId::from_index(u32::try_from(self.slots.len()).expect("logic item count exceeds u32"));
        self.slots.push(Slot {
            data: PlacedLogicItem {
                definition,
                position,
                orientation,
            },
            state: DisplayState::Temporary,
            key,
        });
        (id, InfoMessage::LogicItemCreated { id, key })
    }

    /// Restores a logic item that was previously deleted, reusing its
    /// original stable key instead of drawing a fresh one. Used by undo to
    /// resurrect a buried logic item under the key its callers (history,
    /// selections) still remember it by.
    pub fn recreate(&mut self, key: LogicItemKey, data: PlacedLogicItem) -> (LogicItemId, InfoMessage) {
        let id = LogicItemId::from_index(u32::try_from(self.slots.len()).expect("logic item count exceeds u32"));
        self.slots.push(Slot {
            data,
            state: DisplayState::Temporary,
            key,
        });
        (id, InfoMessage::LogicItemCreated { id, key })
    }

    /// Returns the placed data for `id`.
    #[must_use]
    pub fn get(&self, id: LogicItemId) -> &PlacedLogicItem {
        &self.slots[id.index()].data
    }

    /// Returns the display state of `id`.
    #[must_use]
    pub fn state(&self, id: LogicItemId) -> DisplayState {
        self.slots[id.index()].state
    }

    /// Returns the stable key of `id`.
    #[must_use]
    pub fn key(&self, id: LogicItemId) -> LogicItemKey {
        self.slots[id.index()].key
    }

    /// Overwrites the placed data for `id` without changing its display state.
    pub fn set_data(&mut self, id: LogicItemId, data: PlacedLogicItem) {
        self.slots[id.index()].data = data;
    }

    /// Moves `id` into the inserted state, returning the
    /// [`InfoMessage::LogicItemInserted`] event.
    pub fn mark_inserted(&mut self, id: LogicItemId, state: DisplayState) -> InfoMessage {
        let slot = &mut self.slots[id.index()];
        slot.state = state;
        InfoMessage::LogicItemInserted {
            id,
            data: slot.data.clone(),
        }
    }

    /// Moves `id` out of the inserted state, returning the
    /// [`InfoMessage::LogicItemUninserted`] event.
    pub fn mark_uninserted(&mut self, id: LogicItemId) -> InfoMessage {
        let slot = &mut self.slots[id.index()];
        let data = slot.data.clone();
        slot.state = DisplayState::Temporary;
        InfoMessage::LogicItemUninserted { id, data }
    }

    /// Deletes `id` via swap-and-pop, returning the deletion message and,
    /// if another element moved into its slot, the id-update message for
    /// that element. Caller must emit the deletion message *before* the
    /// id-update message (spec.md §4.6 ordering rule).
    pub fn delete(&mut self, id: LogicItemId) -> (InfoMessage, Option<InfoMessage>) {
        let last_index = self.slots.len() - 1;
        let index = id.index();
        let deleted = InfoMessage::LogicItemDeleted { id };

        if index == last_index {
            self.slots.pop();
            return (deleted, None);
        }

        self.slots.swap_remove(index);
        let moved = &self.slots[index];
        let old_id = LogicItemId::from_index(u32::try_from(last_index).unwrap());
        let new_id = id;
        // `Colliding` items are still registered in the spatial/collision
        // index (see `ls_circuit::editing::is_registered`), so the rename
        // message must carry their data too, not just `Valid`/`Normal`.
        let rename = if moved.state != DisplayState::Temporary {
            InfoMessage::InsertedLogicItemIdUpdated {
                new_id,
                old_id,
                data: moved.data.clone(),
            }
        } else {
            InfoMessage::LogicItemIdUpdated { new_id, old_id }
        };
        (deleted, Some(rename))
    }

    /// Returns the number of tracked logic items, inserted or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no logic items are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over every tracked id, inserted or not, in storage order.
    pub fn ids(&self) -> impl Iterator<Item = LogicItemId> + '_ {
        (0..self.slots.len()).map(|index| LogicItemId::from_index(u32::try_from(index).unwrap()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{ConnectionCount, Grid, InverterBits, LogicItemType};

    fn definition() -> LogicItemDefinition {
        LogicItemDefinition {
            logicitem_type: LogicItemType::And,
            input_count: ConnectionCount::try_new(2).unwrap(),
            output_count: ConnectionCount::try_new(1).unwrap(),
            input_inverters: InverterBits::cleared(2),
            output_inverters: InverterBits::cleared(1),
            clock_attributes: None,
        }
    }

    #[test]
    fn delete_non_last_emits_rename_for_moved_element() {
        let mut items = LogicItems::new();
        let (a, _) = items.create(definition(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);
        let (b, _) = items.create(definition(), Point::new(Grid::new(5), Grid::ZERO), Orientation::Right);

        let (deleted, rename) = items.delete(a);
        assert_eq!(deleted, InfoMessage::LogicItemDeleted { id: a });
        match rename {
            Some(InfoMessage::LogicItemIdUpdated { new_id, old_id }) => {
                assert_eq!(new_id, a);
                assert_eq!(old_id, b);
            }
            other => panic!("unexpected rename message: {other:?}"),
        }
        assert_eq!(items.len(), 1);
    }
}
