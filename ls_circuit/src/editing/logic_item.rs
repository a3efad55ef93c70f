// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logic item editing operations (spec.md §4.4).

use super::is_registered;
use crate::error::{InvariantViolation, ViolationKind};
use crate::state_machine::{resolve_transition, TransitionOutcome};
use ls_grid::{DisplayState, Grid, InfoMessage, InsertionMode, LogicItemDefinition, LogicItemId, Orientation, Point, TransitionHint};
use ls_index::collision::{body_cells, CollisionTag};
use ls_index::LayoutIndex;
use ls_layout::Layout;

/// What happened to a logic item after an insertion-mode transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeOutcome {
    /// The item is still present, now in this display state.
    Present(DisplayState),
    /// The item collided under [`InsertionMode::InsertOrDiscard`] and was deleted.
    Deleted,
}

/// Allocates a new, uninserted logic item and returns its id plus the
/// messages to forward to every observer.
pub fn add(layout: &mut Layout, definition: LogicItemDefinition, position: Point, orientation: Orientation) -> (LogicItemId, Vec<InfoMessage>) {
    let (id, created) = layout.add_logic_item(definition, position, orientation);
    (id, vec![created])
}

/// Resolves a requested insertion-mode transition for `id`, mutating
/// `layout` and returning the outcome plus the messages to forward.
///
/// # Errors
///
/// Returns [`InvariantViolation`] if `id` does not refer to a live logic
/// item, or if its placement cannot be represented on the grid.
pub fn set_insertion_mode(
    layout: &mut Layout,
    index: &LayoutIndex,
    id: LogicItemId,
    mode: InsertionMode,
    hint: TransitionHint,
) -> Result<(ModeOutcome, Vec<InfoMessage>), InvariantViolation> {
    if id.index() >= layout.logic_items().len() {
        return Err(InvariantViolation::invalid_logic_item(id));
    }

    let mut messages = Vec::new();
    if is_registered(layout.logic_items().state(id)) {
        messages.push(layout.uninsert_logic_item(id));
    }

    let body_rect = layout
        .logic_items()
        .get(id)
        .body_rect()
        .ok_or_else(|| InvariantViolation::non_representable(format!("logic item {id} has no representable body rectangle")))?;

    let outcome = resolve_transition(mode, hint, || {
        index.is_colliding(body_cells(body_rect).map(|point| (point, CollisionTag::LogicItemBody)))
    });

    match outcome {
        TransitionOutcome::Delete => {
            let (deleted, rename) = layout.delete_logic_item(id);
            messages.push(deleted);
            messages.extend(rename);
            Ok((ModeOutcome::Deleted, messages))
        }
        TransitionOutcome::SetState(state) => {
            if state != DisplayState::Temporary {
                messages.push(layout.insert_logic_item(id, state));
            }
            Ok((ModeOutcome::Present(state), messages))
        }
    }
}

/// Moves a still-[`DisplayState::Temporary`] item by `(dx, dy)`, or deletes
/// it outright if the resulting position is not representable on the grid.
///
/// # Errors
///
/// Returns [`InvariantViolation`] if `id` does not refer to a live logic
/// item or is currently registered.
pub fn move_or_delete_temporary(layout: &mut Layout, id: LogicItemId, dx: Grid, dy: Grid) -> Result<(ModeOutcome, Vec<InfoMessage>), InvariantViolation> {
    if id.index() >= layout.logic_items().len() {
        return Err(InvariantViolation::invalid_logic_item(id));
    }
    if is_registered(layout.logic_items().state(id)) {
        return Err(InvariantViolation::new(
            ViolationKind::WrongDisplayState,
            format!("logic item {id} must be temporary before it can be moved"),
        ));
    }

    let placed = layout.logic_items().get(id).clone();
    let Some(x) = placed.position.x.checked_add(dx) else {
        return delete(layout, id).map(|messages| (ModeOutcome::Deleted, messages));
    };
    let Some(y) = placed.position.y.checked_add(dy) else {
        return delete(layout, id).map(|messages| (ModeOutcome::Deleted, messages));
    };

    let mut moved = placed;
    moved.position = Point::new(x, y);
    if moved.body_rect().is_none() {
        return delete(layout, id).map(|messages| (ModeOutcome::Deleted, messages));
    }

    layout.set_logic_item_data(id, moved);
    Ok((ModeOutcome::Present(DisplayState::Temporary), Vec::new()))
}

/// Deletes `id` outright, bypassing the insertion-mode state machine.
///
/// # Errors
///
/// Returns [`InvariantViolation`] if `id` is currently registered (callers
/// must transition it to [`InsertionMode::Temporary`] first).
pub fn delete(layout: &mut Layout, id: LogicItemId) -> Result<Vec<InfoMessage>, InvariantViolation> {
    if id.index() >= layout.logic_items().len() {
        return Err(InvariantViolation::invalid_logic_item(id));
    }
    if is_registered(layout.logic_items().state(id)) {
        return Err(InvariantViolation::new(
            ViolationKind::WrongDisplayState,
            format!("logic item {id} must be uninserted before deletion"),
        ));
    }
    let (deleted, rename) = layout.delete_logic_item(id);
    let mut messages = vec![deleted];
    messages.extend(rename);
    Ok(messages)
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
    fn insert_or_discard_without_collision_lands_normal() {
        let mut layout = Layout::new();
        let index = LayoutIndex::new();
        let (id, _) = add(&mut layout, definition(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);

        let (outcome, messages) = set_insertion_mode(&mut layout, &index, id, InsertionMode::InsertOrDiscard, TransitionHint::None).unwrap();
        assert_eq!(outcome, ModeOutcome::Present(DisplayState::Normal));
        assert!(matches!(messages.as_slice(), [InfoMessage::LogicItemInserted { .. }]));
    }

    #[test]
    fn move_or_delete_temporary_moves_when_representable() {
        let mut layout = Layout::new();
        let (id, _) = add(&mut layout, definition(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);

        let (outcome, messages) = move_or_delete_temporary(&mut layout, id, Grid::new(5), Grid::new(5)).unwrap();
        assert_eq!(outcome, ModeOutcome::Present(DisplayState::Temporary));
        assert!(messages.is_empty());
        assert_eq!(layout.logic_items().get(id).position, Point::new(Grid::new(5), Grid::new(5)));
    }

    #[test]
    fn move_or_delete_temporary_deletes_on_overflow() {
        let mut layout = Layout::new();
        let (id, _) = add(&mut layout, definition(), Point::new(Grid::new(10), Grid::new(10)), Orientation::Right);

        let (outcome, _) = move_or_delete_temporary(&mut layout, id, Grid::MAX, Grid::ZERO).unwrap();
        assert_eq!(outcome, ModeOutcome::Deleted);
        assert!(layout.logic_items().is_empty());
    }

    #[test]
    fn delete_rejects_a_still_registered_item() {
        let mut layout = Layout::new();
        let index = LayoutIndex::new();
        let (id, _) = add(&mut layout, definition(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);
        set_insertion_mode(&mut layout, &index, id, InsertionMode::InsertOrDiscard, TransitionHint::None).unwrap();

        let err = delete(&mut layout, id).unwrap_err();
        assert_eq!(err.kind, ViolationKind::WrongDisplayState);
    }
}
