// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Programmer-error taxonomy for the modifier (spec.md §7).
//!
//! An [`InvariantViolation`] means a caller broke a precondition the
//! modifier relies on (an id from a different layout, a coordinate that
//! cannot be represented, an index that disagrees with the layout it
//! mirrors). It is never caught internally: the caller must discard the
//! `Modifier` that raised it, since its internal state is no longer
//! trustworthy once an invariant has failed.

use ls_grid::{DecorationId, LogicItemId, Segment, WireId};

/// What kind of precondition was violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// An id does not refer to a live element.
    InvalidId,
    /// A coordinate computation overflowed the representable grid range.
    NonRepresentableCoordinate,
    /// An element was not in the display state the operation requires.
    WrongDisplayState,
    /// An index's contents disagree with the layout it is supposed to mirror.
    IndexDesync,
}

/// A violated programmer-facing invariant. See the module docs for how to
/// react to one.
#[derive(Debug, thiserror::Error)]
#[error("invariant violation ({kind:?}): {context}")]
pub struct InvariantViolation {
    /// Which kind of invariant failed.
    pub kind: ViolationKind,
    /// A human-readable description of what was being attempted.
    pub context: String,
}

impl InvariantViolation {
    /// Constructs a violation with the given kind and context message.
    pub fn new(kind: ViolationKind, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
        }
    }

    /// Shorthand for [`ViolationKind::InvalidId`] referring to a logic item.
    #[must_use]
    pub fn invalid_logic_item(id: LogicItemId) -> Self {
        Self::new(ViolationKind::InvalidId, format!("logic item id {id} is not live"))
    }

    /// Shorthand for [`ViolationKind::InvalidId`] referring to a decoration.
    #[must_use]
    pub fn invalid_decoration(id: DecorationId) -> Self {
        Self::new(ViolationKind::InvalidId, format!("decoration id {id} is not live"))
    }

    /// Shorthand for [`ViolationKind::InvalidId`] referring to a wire.
    #[must_use]
    pub fn invalid_wire(id: WireId) -> Self {
        Self::new(ViolationKind::InvalidId, format!("wire id {id} is not live"))
    }

    /// Shorthand for [`ViolationKind::NonRepresentableCoordinate`].
    #[must_use]
    pub fn non_representable(context: impl Into<String>) -> Self {
        Self::new(ViolationKind::NonRepresentableCoordinate, context)
    }

    /// Shorthand for [`ViolationKind::WrongDisplayState`] referring to a segment.
    #[must_use]
    pub fn wrong_state_for_segment(segment: Segment, context: impl Into<String>) -> Self {
        Self::new(
            ViolationKind::WrongDisplayState,
            format!("segment {:?} of wire {}: {}", segment.segment_index, segment.wire_id, context.into()),
        )
    }
}
