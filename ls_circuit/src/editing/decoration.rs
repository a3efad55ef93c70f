// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoration editing operations (spec.md §4.4).
//!
//! Decorations never collide (the collision index only tracks logic item
//! bodies and wire segments — see `ls_index::LayoutIndex::submit`), so
//! unlike logic items and wires a decoration's insertion-mode transition
//! never runs a collision query and never discards: every non-temporary
//! request lands on [`DisplayState::Normal`].

use super::is_registered;
use crate::error::{InvariantViolation, ViolationKind};
use ls_grid::{DecorationId, DecorationType, DisplayState, InfoMessage, InsertionMode, Point};
use ls_layout::Layout;

/// What happened to a decoration after an insertion-mode transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeOutcome {
    /// The decoration is now in this display state.
    Present(DisplayState),
}

/// Allocates a new, uninserted decoration and returns its id plus the
/// messages to forward to every observer.
pub fn add(
    layout: &mut Layout,
    decoration_type: DecorationType,
    position: Point,
    width: u16,
    height: u16,
    text: String,
) -> (DecorationId, Vec<InfoMessage>) {
    let (id, created) = layout.add_decoration(decoration_type, position, width, height, text);
    (id, vec![created])
}

/// Resolves a requested insertion-mode transition for `id`.
///
/// # Errors
///
/// Returns [`InvariantViolation`] if `id` does not refer to a live decoration.
pub fn set_insertion_mode(layout: &mut Layout, id: DecorationId, mode: InsertionMode) -> Result<(ModeOutcome, Vec<InfoMessage>), InvariantViolation> {
    if id.index() >= layout.decorations().len() {
        return Err(InvariantViolation::invalid_decoration(id));
    }

    let mut messages = Vec::new();
    let currently_registered = is_registered(layout.decorations().state(id));

    match mode {
        InsertionMode::Temporary => {
            if currently_registered {
                messages.push(layout.uninsert_decoration(id));
            }
            Ok((ModeOutcome::Present(DisplayState::Temporary), messages))
        }
        InsertionMode::Colliding | InsertionMode::InsertOrDiscard => {
            if !currently_registered {
                messages.push(layout.insert_decoration(id));
            }
            Ok((ModeOutcome::Present(DisplayState::Normal), messages))
        }
    }
}

/// Deletes `id` outright.
///
/// # Errors
///
/// Returns [`InvariantViolation`] if `id` is currently registered (callers
/// must transition it to [`InsertionMode::Temporary`] first).
pub fn delete(layout: &mut Layout, id: DecorationId) -> Result<Vec<InfoMessage>, InvariantViolation> {
    if id.index() >= layout.decorations().len() {
        return Err(InvariantViolation::invalid_decoration(id));
    }
    if is_registered(layout.decorations().state(id)) {
        return Err(InvariantViolation::new(
            ViolationKind::WrongDisplayState,
            format!("decoration {id} must be uninserted before deletion"),
        ));
    }
    let (deleted, rename) = layout.delete_decoration(id);
    let mut messages = vec![deleted];
    messages.extend(rename);
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_or_discard_never_deletes() {
        let mut layout = Layout::new();
        let (id, _) = add(&mut layout, DecorationType::TextElement, Point::new(ls_grid::Grid::ZERO, ls_grid::Grid::ZERO), 4, 1, "hi".into());

        let (outcome, messages) = set_insertion_mode(&mut layout, id, InsertionMode::InsertOrDiscard).unwrap();
        assert_eq!(outcome, ModeOutcome::Present(DisplayState::Normal));
        assert!(matches!(messages.as_slice(), [InfoMessage::DecorationInserted { .. }]));
    }

    #[test]
    fn round_trip_back_to_temporary_then_delete() {
        let mut layout = Layout::new();
        let (id, _) = add(&mut layout, DecorationType::TextElement, Point::new(ls_grid::Grid::ZERO, ls_grid::Grid::ZERO), 4, 1, "hi".into());
        set_insertion_mode(&mut layout, id, InsertionMode::InsertOrDiscard).unwrap();
        set_insertion_mode(&mut layout, id, InsertionMode::Temporary).unwrap();

        let messages = delete(&mut layout, id).unwrap();
        assert!(matches!(messages.as_slice(), [InfoMessage::DecorationDeleted { .. }]));
    }
}
