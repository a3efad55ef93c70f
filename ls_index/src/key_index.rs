// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The key index: bidirectional key ↔ id maps for every element kind
//! (spec.md §3.5, §4.2).
//!
//! Compact ids are swap-and-pop compactable and therefore unstable across
//! deletions; stable keys are not. This index is the only place that
//! remembers the current id for a key (and vice versa), so it is also the
//! component that resolves `*Deleted` messages, which carry only an id, back
//! to the key that should be forgotten.

use hashbrown::HashMap;
use ls_grid::{DecorationId, DecorationKey, LogicItemId, LogicItemKey, Segment, SegmentKey};

/// Bidirectional map between one element kind's compact id and stable key.
#[derive(Debug)]
struct Bimap<Id, Key> {
    id_to_key: HashMap<Id, Key>,
    key_to_id: HashMap<Key, Id>,
}

impl<Id, Key> Default for Bimap<Id, Key> {
    fn default() -> Self {
        Self {
            id_to_key: HashMap::default(),
            key_to_id: HashMap::default(),
        }
    }
}

impl<Id, Key> Bimap<Id, Key>
where
    Id: Copy + Eq + std::hash::Hash,
    Key: Copy + Eq + std::hash::Hash,
{
    fn new() -> Self {
        Self {
            id_to_key: HashMap::new(),
            key_to_id: HashMap::new(),
        }
    }

    fn insert(&mut self, id: Id, key: Key) {
        self.id_to_key.insert(id, key);
        self.key_to_id.insert(key, id);
    }

    fn remove_by_id(&mut self, id: Id) -> Option<Key> {
        let key = self.id_to_key.remove(&id)?;
        self.key_to_id.remove(&key);
        Some(key)
    }

    fn rename_id(&mut self, old_id: Id, new_id: Id) {
        if let Some(key) = self.id_to_key.remove(&old_id) {
            self.id_to_key.insert(new_id, key);
            self.key_to_id.insert(key, new_id);
        }
    }

    fn key_of(&self, id: Id) -> Option<Key> {
        self.id_to_key.get(&id).copied()
    }

    fn id_of(&self, key: Key) -> Option<Id> {
        self.key_to_id.get(&key).copied()
    }

    fn clear(&mut self) {
        self.id_to_key.clear();
        self.key_to_id.clear();
    }

    fn len(&self) -> usize {
        self.id_to_key.len()
    }
}

/// Bidirectional key ↔ id maps for logic items, decorations, and wire
/// segments.
#[derive(Debug, Default)]
pub struct KeyIndex {
    logic_items: Bimap<LogicItemId, LogicItemKey>,
    decorations: Bimap<DecorationId, DecorationKey>,
    segments: Bimap<Segment, SegmentKey>,
}

impl KeyIndex {
    /// Constructs an empty key index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly created logic item id under `key`.
    pub fn logic_item_created(&mut self, id: LogicItemId, key: LogicItemKey) {
        self.logic_items.insert(id, key);
    }

    /// Forgets the key for a deleted logic item id, returning it.
    pub fn logic_item_deleted(&mut self, id: LogicItemId) -> Option<LogicItemKey> {
        self.logic_items.remove_by_id(id)
    }

    /// Updates the id for a logic item renamed by swap-and-pop compaction.
    pub fn logic_item_id_updated(&mut self, old_id: LogicItemId, new_id: LogicItemId) {
        self.logic_items.rename_id(old_id, new_id);
    }

    /// Returns the stable key currently bound to `id`, if any.
    #[must_use]
    pub fn logic_item_key(&self, id: LogicItemId) -> Option<LogicItemKey> {
        self.logic_items.key_of(id)
    }

    /// Returns the current id bound to `key`, if any.
    #[must_use]
    pub fn logic_item_id(&self, key: LogicItemKey) -> Option<LogicItemId> {
        self.logic_items.id_of(key)
    }

    /// Registers a newly created decoration id under `key`.
    pub fn decoration_created(&mut self, id: DecorationId, key: DecorationKey) {
        self.decorations.insert(id, key);
    }

    /// Forgets the key for a deleted decoration id, returning it.
    pub fn decoration_deleted(&mut self, id: DecorationId) -> Option<DecorationKey> {
        self.decorations.remove_by_id(id)
    }

    /// Updates the id for a decoration renamed by swap-and-pop compaction.
    pub fn decoration_id_updated(&mut self, old_id: DecorationId, new_id: DecorationId) {
        self.decorations.rename_id(old_id, new_id);
    }

    /// Returns the stable key currently bound to `id`, if any.
    #[must_use]
    pub fn decoration_key(&self, id: DecorationId) -> Option<DecorationKey> {
        self.decorations.key_of(id)
    }

    /// Returns the current id bound to `key`, if any.
    #[must_use]
    pub fn decoration_id(&self, key: DecorationKey) -> Option<DecorationId> {
        self.decorations.id_of(key)
    }

    /// Registers a newly created segment handle under `key`.
    pub fn segment_created(&mut self, segment: Segment, key: SegmentKey) {
        self.segments.insert(segment, key);
    }

    /// Forgets the key for a deleted segment handle, returning it.
    pub fn segment_deleted(&mut self, segment: Segment) -> Option<SegmentKey> {
        self.segments.remove_by_id(segment)
    }

    /// Updates the handle for a segment renamed by swap-and-pop compaction.
    pub fn segment_id_updated(&mut self, old_segment: Segment, new_segment: Segment) {
        self.segments.rename_id(old_segment, new_segment);
    }

    /// Returns the stable key currently bound to `segment`, if any.
    #[must_use]
    pub fn segment_key(&self, segment: Segment) -> Option<SegmentKey> {
        self.segments.key_of(segment)
    }

    /// Returns the current handle bound to `key`, if any.
    #[must_use]
    pub fn segment_id(&self, key: SegmentKey) -> Option<Segment> {
        self.segments.id_of(key)
    }

    /// Removes every entry of every kind.
    pub fn clear(&mut self) {
        self.logic_items.clear();
        self.decorations.clear();
        self.segments.clear();
    }

    /// Returns the total number of tracked elements across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.logic_items.len() + self.decorations.len() + self.segments.len()
    }

    /// Returns `true` if the index tracks no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{AllocatesKey, KeyAllocator, SegmentIndex, WireId};

    #[test]
    fn id_update_preserves_key_lookup() {
        let mut index = KeyIndex::new();
        let mut alloc = KeyAllocator::new();
        let key = LogicItemKey::allocate(&mut alloc);
        let old_id = LogicItemId::from_index(3);
        let new_id = LogicItemId::from_index(1);

        index.logic_item_created(old_id, key);
        index.logic_item_id_updated(old_id, new_id);

        assert_eq!(index.logic_item_key(new_id), Some(key));
        assert_eq!(index.logic_item_id(key), Some(new_id));
        assert_eq!(index.logic_item_key(old_id), None);
    }

    #[test]
    fn deleted_id_forgets_key_both_ways() {
        let mut index = KeyIndex::new();
        let mut alloc = KeyAllocator::new();
        let key = SegmentKey::allocate(&mut alloc);
        let segment = Segment {
            wire_id: WireId::from_index(2),
            segment_index: SegmentIndex::from_index(0),
        };

        index.segment_created(segment, key);
        assert_eq!(index.segment_deleted(segment), Some(key));
        assert_eq!(index.segment_id(key), None);
        assert!(index.is_empty());
    }
}
