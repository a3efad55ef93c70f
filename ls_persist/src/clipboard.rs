// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipboard payload codec (spec.md §6): the same JSON+gzip+Base64 container
//! as the `.ls2` file format, minus the view and simulation fields, matching
//! the original's `selection_to_clipboard_text` / `parse_clipboard_text`.

use crate::circuit_file::Contents;
use crate::codec;
use crate::error::LoadError;
use ls_grid::{DecorationId, DisplayState, LogicItemId, WireId};
use ls_layout::Layout;

/// Encodes the named elements of `layout` into a clipboard string.
///
/// Returns an empty string if nothing is selected, matching
/// `selection_to_clipboard_text`'s `if (!selection.empty())` guard.
#[must_use]
pub fn copy(layout: &Layout, logic_items: &[LogicItemId], decorations: &[DecorationId], wires: &[WireId]) -> String {
    if logic_items.is_empty() && decorations.is_empty() && wires.is_empty() {
        return String::new();
    }
    let contents = Contents::collect_selected(layout, logic_items, decorations, wires);
    codec::encode(&contents)
}

/// Decodes a clipboard string produced by [`copy`] back into a standalone
/// [`Layout`] holding the pasted elements, all left uninserted
/// ([`DisplayState::Temporary`]) so the caller can run them through the
/// insertion-mode state machine before committing them.
///
/// Returns `Ok(None)` for an empty string or one whose payload decodes to no
/// elements, matching `parse_clipboard_text`'s `base64_decode(text).empty()`
/// short circuit.
///
/// # Errors
///
/// Returns [`LoadError`] if `text` is non-empty but not a valid clipboard
/// payload.
pub fn paste(text: &str) -> Result<Option<Layout>, LoadError> {
    if text.is_empty() {
        return Ok(None);
    }
    let contents: Contents = codec::decode(text)?;
    if contents.is_empty() {
        return Ok(None);
    }
    contents.build_layout(DisplayState::Temporary).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{ConnectionCount, Grid, InverterBits, LogicItemDefinition, LogicItemType, Orientation, Point};

    fn button() -> LogicItemDefinition {
        LogicItemDefinition {
            logicitem_type: LogicItemType::Button,
            input_count: ConnectionCount::try_new(0).unwrap(),
            output_count: ConnectionCount::try_new(1).unwrap(),
            input_inverters: InverterBits::cleared(0),
            output_inverters: InverterBits::cleared(1),
            clock_attributes: None,
        }
    }

    #[test]
    fn empty_selection_copies_to_an_empty_string() {
        let layout = Layout::new();
        assert_eq!(copy(&layout, &[], &[], &[]), String::new());
    }

    #[test]
    fn empty_string_pastes_to_none() {
        assert_eq!(paste("").unwrap(), None);
    }

    #[test]
    fn copy_then_paste_round_trips_as_temporary() {
        let mut layout = Layout::new();
        let (id, _) = layout.add_logic_item(button(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);
        layout.insert_logic_item(id, DisplayState::Normal);

        let text = copy(&layout, &[id], &[], &[]);
        assert!(!text.is_empty());

        let pasted = paste(&text).unwrap().expect("non-empty payload pastes to Some");
        assert_eq!(pasted.logic_items().len(), 1);
        assert_eq!(pasted.logic_items().state(LogicItemId::from_index(0)), DisplayState::Temporary);
    }
}
