// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Low-level editing operations (spec.md §4.4–§4.5).
//!
//! Each function here takes the `Layout` (and, where a collision query is
//! needed, a read-only `LayoutIndex`) directly and returns the ordered
//! [`ls_grid::InfoMessage`] list the caller must forward to every observer.
//! None of these functions touch history, selections, or logging — that
//! bookkeeping belongs to [`crate::modifier::Modifier`], which is the only
//! public entry point into this crate.

pub mod decoration;
pub mod logic_item;
pub mod wire;

use ls_grid::DisplayState;

/// Returns `true` if `state` corresponds to an element currently registered
/// in the spatial/collision indices.
///
/// This is `state != Temporary`, not [`DisplayState::is_inserted`]: a
/// colliding element is still drawn overlapping whatever it collides with,
/// so it stays registered (see `DESIGN.md` for why this deliberately
/// widens the "inserted" notion used by `is_inserted`).
pub(crate) fn is_registered(state: DisplayState) -> bool {
    state != DisplayState::Temporary
}
