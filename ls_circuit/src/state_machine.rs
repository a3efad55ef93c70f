// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The insertion-mode state machine (spec.md §4.3).
//!
//! Every element (logic item, decoration, or wire) moves through the same
//! three requested modes — [`InsertionMode::Temporary`],
//! [`InsertionMode::Colliding`], [`InsertionMode::InsertOrDiscard`] — and
//! lands in one of the four [`DisplayState`] values, or is deleted outright.
//! [`TransitionHint`] lets a caller who already knows the collision outcome
//! (for example, a drag loop that just ran the check a frame ago) skip
//! re-running it.

use ls_grid::{DisplayState, InsertionMode, TransitionHint};

/// What an insertion-mode transition resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The element should be set to this display state.
    SetState(DisplayState),
    /// The element should be deleted outright.
    Delete,
}

/// Resolves `requested` into a [`TransitionOutcome`], consulting `is_colliding`
/// only when `hint` does not already answer the question.
///
/// `is_colliding` is a closure rather than a bare `bool` so the (potentially
/// expensive) collision query is skipped entirely under
/// [`TransitionHint::ExpectValid`] / [`TransitionHint::AssumeColliding`].
pub fn resolve_transition<F: FnOnce() -> bool>(requested: InsertionMode, hint: TransitionHint, is_colliding: F) -> TransitionOutcome {
    match requested {
        InsertionMode::Temporary => TransitionOutcome::SetState(DisplayState::Temporary),
        InsertionMode::Colliding => {
            let colliding = resolve_collision(hint, is_colliding);
            TransitionOutcome::SetState(if colliding { DisplayState::Colliding } else { DisplayState::Valid })
        }
        InsertionMode::InsertOrDiscard => {
            let colliding = resolve_collision(hint, is_colliding);
            if colliding {
                TransitionOutcome::Delete
            } else {
                TransitionOutcome::SetState(DisplayState::Normal)
            }
        }
    }
}

fn resolve_collision<F: FnOnce() -> bool>(hint: TransitionHint, is_colliding: F) -> bool {
    match hint {
        TransitionHint::ExpectValid => false,
        TransitionHint::AssumeColliding => true,
        TransitionHint::None => is_colliding(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporary_mode_never_checks_collision() {
        let outcome = resolve_transition(InsertionMode::Temporary, TransitionHint::None, || {
            panic!("should not be called")
        });
        assert_eq!(outcome, TransitionOutcome::SetState(DisplayState::Temporary));
    }

    #[test]
    fn insert_or_discard_deletes_when_colliding() {
        let outcome = resolve_transition(InsertionMode::InsertOrDiscard, TransitionHint::None, || true);
        assert_eq!(outcome, TransitionOutcome::Delete);
    }

    #[test]
    fn expect_valid_hint_skips_the_collision_query() {
        let outcome = resolve_transition(InsertionMode::InsertOrDiscard, TransitionHint::ExpectValid, || {
            panic!("should not be called")
        });
        assert_eq!(outcome, TransitionOutcome::SetState(DisplayState::Normal));
    }

    #[test]
    fn colliding_mode_reports_valid_or_colliding_without_deleting() {
        assert_eq!(
            resolve_transition(InsertionMode::Colliding, TransitionHint::None, || false),
            TransitionOutcome::SetState(DisplayState::Valid)
        );
        assert_eq!(
            resolve_transition(InsertionMode::Colliding, TransitionHint::None, || true),
            TransitionOutcome::SetState(DisplayState::Colliding)
        );
    }
}
