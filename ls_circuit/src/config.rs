// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`ModifierConfig`]: the knobs a [`crate::Modifier`] is constructed with
//! (spec.md §4.5).

/// Configuration a [`crate::Modifier`] is constructed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModifierConfig {
    /// When `false`, no undo/redo bookkeeping happens at all: `can_undo`/
    /// `can_redo` stay `false` forever and every history call is skipped.
    /// Useful for one-shot ingestion (loading a file, pasting a clipboard)
    /// where the caller does not want the load itself to become an undo step.
    pub enable_history: bool,
    /// When `true`, every dispatched [`ls_grid::InfoMessage`] is also kept
    /// in an in-memory log for later inspection (tests, replay debugging).
    pub store_messages: bool,
    /// When `true`, every public mutation re-derives the index from scratch
    /// after applying its messages and panics if it disagrees with the
    /// incrementally maintained one (spec.md §5 debug-mode invariant check).
    /// Expensive; defaults to on only in debug builds.
    pub validate_messages: bool,
}

impl Default for ModifierConfig {
    fn default() -> Self {
        Self {
            enable_history: true,
            store_messages: false,
            validate_messages: cfg!(debug_assertions),
        }
    }
}
