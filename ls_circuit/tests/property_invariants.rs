// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded, deterministic randomized sequences asserting the universal
//! invariants linking `Modifier`'s layout to its derived `LayoutIndex` and
//! `SelectionStore` (spec.md §9).
//!
//! A raw, hand-built `InfoMessage` stream could violate those invariants by
//! construction before the index ever sees it, so the sequence is driven
//! through the same public `Modifier` operations a real caller would use,
//! rather than replayed directly into `ls_index`/`ls_selection`.

use ls_circuit::Modifier;
use ls_grid::{ConnectionCount, DisplayState, Grid, InsertionMode, InverterBits, LogicItemDefinition, LogicItemId, LogicItemType, Orientation, Point, TransitionHint};
use ls_index::TreePayload;

/// xorshift64, matching the deterministic PRNG used for index benchmarks.
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

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

/// After every operation, every live id (`0..len`) must have a key-index
/// entry, and its spatial-index membership must match `Normal` display
/// state exactly: inserted and only inserted items occupy space.
fn assert_index_consistent(modifier: &Modifier) {
    for id in modifier.layout().logic_items().ids() {
        assert!(modifier.index().keys().logic_item_key(id).is_some(), "live id {id:?} missing from key index");
        let is_normal = modifier.layout().logic_items().state(id) == DisplayState::Normal;
        let in_spatial = modifier.index().spatial().contains(TreePayload::LogicItem(id));
        assert_eq!(in_spatial, is_normal, "id {id:?} spatial membership disagrees with display state");
    }
}

/// A selection must never reference an id past the end of the layout's
/// logic-item storage — ids it once held are removed by the message stream
/// on deletion, never left dangling.
fn assert_selection_consistent(modifier: &Modifier, selection_id: ls_selection::SelectionId) {
    let len = modifier.layout().logic_items().len();
    let Some(selection) = modifier.selections().get(selection_id) else {
        return;
    };
    for &id in selection.logic_items() {
        assert!(id.index() < len, "selection holds dangling id {id:?} past length {len}");
    }
}

#[test]
fn randomized_insert_uninsert_delete_preserves_invariants() {
    let mut modifier = Modifier::new();
    let selection_id = modifier.create_selection();
    let mut rng = Rng::new(0xC1A5_7E55_1234_5678);
    let mut next_slot: i16 = 0;

    for _ in 0..300 {
        let len = modifier.layout().logic_items().len();
        let action = rng.below(4);

        match action {
            0 => {
                let position = Point::new(Grid::new(next_slot), Grid::ZERO);
                next_slot += 4;
                let id = modifier.add_logic_item(button(), position, Orientation::Right);
                if rng.below(2) == 0 {
                    let _ = modifier.set_logic_item_insertion_mode(id, InsertionMode::InsertOrDiscard, TransitionHint::ExpectValid);
                    if modifier.layout().logic_items().state(id) == DisplayState::Normal && rng.below(2) == 0 {
                        modifier.selections_mut().get_mut(selection_id).unwrap().add_logic_item(id);
                    }
                }
            }
            1 if len > 0 => {
                let id = LogicItemId::from_index(rng.below(len) as u32);
                if modifier.layout().logic_items().state(id) != DisplayState::Normal {
                    let _ = modifier.set_logic_item_insertion_mode(id, InsertionMode::InsertOrDiscard, TransitionHint::ExpectValid);
                }
            }
            2 if len > 0 => {
                let id = LogicItemId::from_index(rng.below(len) as u32);
                if modifier.layout().logic_items().state(id) == DisplayState::Normal {
                    let _ = modifier.set_logic_item_insertion_mode(id, InsertionMode::Temporary, TransitionHint::None);
                }
            }
            3 if len > 0 => {
                let id = LogicItemId::from_index(rng.below(len) as u32);
                if modifier.layout().logic_items().state(id) == DisplayState::Temporary {
                    let _ = modifier.delete_logic_item(id);
                }
            }
            _ => {}
        }

        assert_index_consistent(&modifier);
        assert_selection_consistent(&modifier, selection_id);
    }
}
