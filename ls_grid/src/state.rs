// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display state and insertion mode (spec.md §4.3).

/// The stored counterpart of an element's insertion mode.
///
/// Four states corresponding to the insertion-mode state machine:
/// `temporary` and `colliding` are non-final; `valid` and `normal` are the
/// two flavors of "currently inserted" (`valid` draws attention to the fact
/// that the element is still cached as temporarily uninserted, `normal` is
/// the steady state once uninsertion messages have fired).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayState {
    /// Not inserted; lives outside any spatial conflict check.
    #[default]
    Temporary,
    /// Not inserted; collides with existing geometry.
    Colliding,
    /// Inserted, but an in-flight transition still treats it as cached.
    Valid,
    /// Inserted and settled.
    Normal,
}

impl DisplayState {
    /// Returns `true` for the two states considered "inserted" for the
    /// purposes of index/collision membership (`Valid` and `Normal`).
    #[must_use]
    pub const fn is_inserted(self) -> bool {
        matches!(self, Self::Valid | Self::Normal)
    }
}

/// The insertion mode requested by a caller of an editing operation.
///
/// This is distinct from [`DisplayState`]: `InsertionMode` is the caller's
/// request, `DisplayState` is the element's resulting stored state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InsertionMode {
    /// Keep the element uninserted, usable as a drag preview.
    #[default]
    Temporary,
    /// Run the collision check but do not insert even if valid.
    Colliding,
    /// Insert if valid; discard (delete) if colliding.
    InsertOrDiscard,
}

/// Optional hints that let a caller assert the expected outcome of an
/// insertion-mode transition and short-circuit the collision query
/// (spec.md §4.3).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionHint {
    /// No hint; run the full collision check.
    #[default]
    None,
    /// Caller asserts the element will be valid (non-colliding).
    ExpectValid,
    /// Caller asserts the element is already known to be colliding.
    AssumeColliding,
}
