// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`validate`]: the debug-mode check that `LayoutIndex` has not drifted
//! from the `Layout` it is supposed to mirror (spec.md §5).
//!
//! Every index entry is provably derivable from `Layout`'s message stream,
//! so in principle it can never disagree with `Layout` itself. This exists
//! to catch the principle failing in practice: a message a future editing
//! operation forgets to emit, or emits in the wrong order, shows up here as
//! a live element missing from the index instead of silently corrupting
//! later queries.

use crate::editing::is_registered;
use crate::error::{InvariantViolation, ViolationKind};
use ls_index::{LayoutIndex, TreePayload};
use ls_layout::Layout;

/// Re-derives nothing; instead walks `layout` and confirms `index` agrees
/// with it at every live element. Returns the first disagreement found.
///
/// # Errors
///
/// Returns [`InvariantViolation`] with [`ViolationKind::IndexDesync`] if any
/// live, registered element is missing from the spatial index, or if the key
/// index has forgotten a live element's key.
pub fn validate(layout: &Layout, index: &LayoutIndex) -> Result<(), InvariantViolation> {
    for id in layout.logic_items().ids() {
        if index.keys().logic_item_key(id).is_none() {
            return Err(desync(format!("logic item {id} has no key in the key index")));
        }
        let state = layout.logic_items().state(id);
        if is_registered(state) && !index.spatial().contains(TreePayload::LogicItem(id)) {
            return Err(desync(format!("logic item {id} is registered but missing from the spatial index")));
        }
    }

    for id in layout.decorations().ids() {
        if index.keys().decoration_key(id).is_none() {
            return Err(desync(format!("decoration {id} has no key in the key index")));
        }
        let state = layout.decorations().state(id);
        if is_registered(state) && !index.spatial().contains(TreePayload::Decoration(id)) {
            return Err(desync(format!("decoration {id} is registered but missing from the spatial index")));
        }
    }

    for wire_id in layout.wires().wire_ids() {
        let state = layout.wires().wire_state(wire_id);
        for segment in crate::editing::wire::segments_of(layout, wire_id) {
            if index.keys().segment_key(segment).is_none() {
                return Err(desync(format!("segment {:?} of wire {wire_id} has no key in the key index", segment.segment_index)));
            }
            if is_registered(state) && !index.spatial().contains(TreePayload::WireSegment(segment)) {
                return Err(desync(format!(
                    "segment {:?} of wire {wire_id} is registered but missing from the spatial index",
                    segment.segment_index
                )));
            }
        }
    }

    Ok(())
}

fn desync(context: impl Into<String>) -> InvariantViolation {
    InvariantViolation::new(ViolationKind::IndexDesync, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{ConnectionCount, Grid, InverterBits, LogicItemDefinition, LogicItemType, Orientation, Point};

    fn definition() -> LogicItemDefinition {
        LogicItemDefinition {
            logicitem_type: LogicItemType::Buffer,
            input_count: ConnectionCount::try_new(1).unwrap(),
            output_count: ConnectionCount::try_new(1).unwrap(),
            input_inverters: InverterBits::cleared(1),
            output_inverters: InverterBits::cleared(1),
            clock_attributes: None,
        }
    }

    #[test]
    fn empty_layout_validates() {
        let layout = Layout::new();
        let index = LayoutIndex::new();
        assert!(validate(&layout, &index).is_ok());
    }

    #[test]
    fn registered_item_missing_from_spatial_index_is_rejected() {
        let mut layout = Layout::new();
        let index = LayoutIndex::new();
        let (id, _) = layout.add_logic_item(definition(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);
        layout.insert_logic_item(id, ls_grid::DisplayState::Normal);

        let err = validate(&layout, &index).unwrap_err();
        assert_eq!(err.kind, ViolationKind::IndexDesync);
    }
}
