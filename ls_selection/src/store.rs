// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`SelectionStore`]: a registry of named selections (spec.md §4.7).
//!
//! Holds every selection a circuit currently has open — the persistent user
//! selection, plus any transient selections created for a single operation
//! (see [`crate::guard::SelectionGuard`]) — and keeps all of them in sync by
//! broadcasting every info message to each stored [`Selection`].

use crate::selection::Selection;
use ls_grid::InfoMessage;
use std::collections::HashMap;

/// Identifies one selection held by a [`SelectionStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionId(u32);

/// Registry of selections, keyed by [`SelectionId`].
#[derive(Debug, Default)]
pub struct SelectionStore {
    selections: HashMap<SelectionId, Selection>,
    next_id: u32,
}

impl SelectionStore {
    /// Constructs an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty selection and returns its id.
    pub fn create(&mut self) -> SelectionId {
        let id = SelectionId(self.next_id);
        self.next_id += 1;
        self.selections.insert(id, Selection::new());
        id
    }

    /// Destroys the selection identified by `id`, if present.
    pub fn destroy(&mut self, id: SelectionId) {
        self.selections.remove(&id);
    }

    /// Returns a reference to the selection identified by `id`, if present.
    #[must_use]
    pub fn get(&self, id: SelectionId) -> Option<&Selection> {
        self.selections.get(&id)
    }

    /// Returns a mutable reference to the selection identified by `id`, if present.
    pub fn get_mut(&mut self, id: SelectionId) -> Option<&mut Selection> {
        self.selections.get_mut(&id)
    }

    /// Returns the number of selections currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Returns `true` if no selections are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Forwards `message` to every held selection, so they all stay in sync
    /// with the layout's id compaction and deletions.
    pub fn submit(&mut self, message: &InfoMessage) {
        for selection in self.selections.values_mut() {
            selection.apply_message(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::LogicItemId;

    #[test]
    fn submit_reaches_every_stored_selection() {
        let mut store = SelectionStore::new();
        let a = store.create();
        let b = store.create();
        let id = LogicItemId::from_index(5);
        store.get_mut(a).unwrap().add_logic_item(id);
        store.get_mut(b).unwrap().add_logic_item(id);

        store.submit(&InfoMessage::LogicItemDeleted { id });

        assert!(store.get(a).unwrap().is_empty());
        assert!(store.get(b).unwrap().is_empty());
    }

    #[test]
    fn destroy_removes_selection() {
        let mut store = SelectionStore::new();
        let id = store.create();
        store.destroy(id);
        assert!(store.get(id).is_none());
    }
}
