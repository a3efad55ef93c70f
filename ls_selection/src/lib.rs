// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! LogikSim Selection: selection bookkeeping for the editable circuit.
//!
//! Adapted from `understory_selection`'s small `Vec`-backed container with a
//! revision counter, specialized to the circuit's three selectable element
//! kinds (logic items, decorations, and wire segment sub-ranges) instead of
//! one generic key type, and taught to self-update from the layout's info
//! message stream the same way `ls_index`'s sub-indices do.
//!
//! ## Contents
//!
//! - [`selection`]: [`selection::Selection`], the element set itself.
//! - [`store`]: [`store::SelectionStore`], a registry of named selections.
//! - [`guard`]: [`guard::SelectionGuard`], a scoped selection tied to one edit.
//! - [`visible`]: [`visible::VisibleSelection`], base selection plus queued
//!   rectangular add/subtract drag operations.

pub mod guard;
pub mod selection;
pub mod store;
pub mod visible;

pub use guard::SelectionGuard;
pub use selection::Selection;
pub use store::{SelectionId, SelectionStore};
pub use visible::{SelectionFunction, VisibleSelection};
