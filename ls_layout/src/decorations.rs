// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact storage for decorations (spec.md §3.3, §4.1).

use ls_grid::{AllocatesKey, DecorationId, DecorationKey, DecorationType, DisplayState, InfoMessage, KeyAllocator, PlacedDecoration, Point};

#[derive(Debug, PartialEq)]
struct Slot {
    data: PlacedDecoration,
    state: DisplayState,
    key: DecorationKey,
}

/// Swap-and-pop compactable storage for every decoration, inserted or not.
#[derive(Debug, Default, PartialEq)]
pub struct Decorations {
    slots: Vec<Slot>,
    keys: KeyAllocator,
}

impl Decorations {
    /// Constructs empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new, uninserted decoration slot.
    pub fn create(
        &mut self,
        decoration_type: DecorationType,
        position: Point,
        width: u16,
        height: u16,
        text: String,
    ) -> (DecorationId, InfoMessage) {
        let key = DecorationKey::allocate(&mut self.keys);
        let id = DecorationId::from_index(u32::try_from(self.slots.len()).expect("decoration count exceeds u32"));
        self.slots.push(Slot {
            data: PlacedDecoration {
                decoration_type,
                position,
                width,
                height,
                text,
            },
            state: DisplayState::Temporary,
            key,
        });
        (id, InfoMessage::DecorationCreated { id, key })
    }

    /// Restores a decoration that was previously deleted, reusing its
    /// original stable key instead of drawing a fresh one.
    pub fn recreate(&mut self, key: DecorationKey, data: PlacedDecoration) -> (DecorationId, InfoMessage) {
        let id = DecorationId::from_index(u32::try_from(self.slots.len()).expect("decoration count exceeds u32"));
        self.slots.push(Slot {
            data,
            state: DisplayState::Temporary,
            key,
        });
        (id, InfoMessage::DecorationCreated { id, key })
    }

    /// Returns the placed data for `id`.
    #[must_use]
    pub fn get(&self, id: DecorationId) -> &PlacedDecoration {
        &self.slots[id.index()].data
    }

    /// Returns the display state of `id`.
    #[must_use]
    pub fn state(&self, id: DecorationId) -> DisplayState {
        self.slots[id.index()].state
    }

    /// Returns the stable key of `id`.
    #[must_use]
    pub fn key(&self, id: DecorationId) -> DecorationKey {
        self.slots[id.index()].key
    }

    /// Overwrites the placed data for `id` without changing its display state.
    pub fn set_data(&mut self, id: DecorationId, data: PlacedDecoration) {
        self.slots[id.index()].data = data;
    }

    /// Moves `id` into the inserted state.
    pub fn mark_inserted(&mut self, id: DecorationId) -> InfoMessage {
        let slot = &mut self.slots[id.index()];
        slot.state = DisplayState::Normal;
        InfoMessage::DecorationInserted {
            id,
            data: slot.data.clone(),
        }
    }

    /// Moves `id` out of the inserted state.
    pub fn mark_uninserted(&mut self, id: DecorationId) -> InfoMessage {
        let slot = &mut self.slots[id.index()];
        let data = slot.data.clone();
        slot.state = DisplayState::Temporary;
        InfoMessage::DecorationUninserted { id, data }
    }

    /// Deletes `id` via swap-and-pop; see [`crate::logic_items::LogicItems::delete`]
    /// for the ordering contract.
    pub fn delete(&mut self, id: DecorationId) -> (InfoMessage, Option<InfoMessage>) {
        let last_index = self.slots.len() - 1;
        let index = id.index();
        let deleted = InfoMessage::DecorationDeleted { id };

        if index == last_index {
            self.slots.pop();
            return (deleted, None);
        }

        self.slots.swap_remove(index);
        let moved = &self.slots[index];
        let old_id = DecorationId::from_index(u32::try_from(last_index).unwrap());
        let new_id = id;
        // Decorations only ever hold `Temporary` or `Normal`, but compare
        // against `Temporary` directly for consistency with the other two
        // storages rather than relying on that coincidence.
        let rename = if moved.state != DisplayState::Temporary {
            InfoMessage::InsertedDecorationIdUpdated {
                new_id,
                old_id,
                data: moved.data.clone(),
            }
        } else {
            InfoMessage::DecorationIdUpdated { new_id, old_id }
        };
        (deleted, Some(rename))
    }

    /// Returns the number of tracked decorations, inserted or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no decorations are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over every tracked id, inserted or not, in storage order.
    pub fn ids(&self) -> impl Iterator<Item = DecorationId> + '_ {
        (0..self.slots.len()).map(|index| DecorationId::from_index(u32::try_from(index).unwrap()))
    }
}
