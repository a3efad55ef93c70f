// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`SelectionGuard`]: a scoped selection tied to the lifetime of an edit.
//!
//! Matches a `selection_guard` helper: history- and selection-scoped
//! operations create a throwaway selection for the duration of one call,
//! never intended to outlive it. Wrapping
//! creation/destruction in a `Drop` guard means a function that returns
//! early, panics, or simply forgets can't leak an entry in the store.

use crate::selection::Selection;
use crate::store::{SelectionId, SelectionStore};

/// Owns a freshly created selection for as long as the guard lives, and
/// destroys it from the backing [`SelectionStore`] on drop.
pub struct SelectionGuard<'a> {
    store: &'a mut SelectionStore,
    id: SelectionId,
}

impl<'a> SelectionGuard<'a> {
    /// Creates a new selection in `store` and returns a guard owning it.
    pub fn new(store: &'a mut SelectionStore) -> Self {
        let id = store.create();
        Self { store, id }
    }

    /// Returns the id of the guarded selection, usable to look it up again
    /// through the original store (for example after submitting a message).
    #[must_use]
    pub fn id(&self) -> SelectionId {
        self.id
    }

    /// Borrows the guarded selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        self.store
            .get(self.id)
            .expect("guard's selection was removed from the store out from under it")
    }

    /// Mutably borrows the guarded selection.
    pub fn selection_mut(&mut self) -> &mut Selection {
        self.store
            .get_mut(self.id)
            .expect("guard's selection was removed from the store out from under it")
    }
}

impl Drop for SelectionGuard<'_> {
    fn drop(&mut self) {
        self.store.destroy(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::LogicItemId;

    #[test]
    fn guard_removes_its_selection_on_drop() {
        let mut store = SelectionStore::new();
        let id = {
            let mut guard = SelectionGuard::new(&mut store);
            guard.selection_mut().add_logic_item(LogicItemId::from_index(0));
            guard.id()
        };
        assert!(store.get(id).is_none());
    }
}
