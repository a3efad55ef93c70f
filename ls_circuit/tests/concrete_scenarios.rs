// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios exercised entirely through the public [`Modifier`]
//! facade (spec.md §8).

use ls_grid::{
    ConnectionCount, DisplayState, Grid, InsertionMode, InverterBits, LogicItemDefinition, LogicItemType, OrderedLine, Orientation, Point,
    SegmentPointType, TransitionHint,
};
use ls_circuit::editing::{logic_item, wire};
use ls_circuit::Modifier;

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

fn and_gate() -> LogicItemDefinition {
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
fn simple_wire_insert() {
    let mut modifier = Modifier::new();
    let wire_id = modifier.create_wire();
    let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
    let line = OrderedLine::new(Point::new(Grid::ZERO, Grid::ZERO), Point::new(Grid::new(10), Grid::ZERO)).unwrap();
    modifier.add_wire_segment(wire_id, line, endpoints);

    let outcome = modifier.set_wire_insertion_mode(wire_id, InsertionMode::InsertOrDiscard, TransitionHint::None);

    assert_eq!(outcome, wire::ModeOutcome::Present(DisplayState::Normal));
    assert_eq!(modifier.layout().wires().segment_count(wire_id), 1);
    let geometry = modifier.layout().wires().geometry(ls_grid::Segment::new(wire_id, ls_grid::SegmentIndex::from_index(0)));
    assert_eq!(geometry.endpoints, endpoints);
    assert!(modifier.can_undo());
}

#[test]
fn move_or_delete_off_grid() {
    let mut modifier = Modifier::new();
    let id = modifier.add_logic_item(button(), Point::new(Grid::new(10), Grid::new(10)), Orientation::Right);

    // Moving by the largest representable offset overflows the item's
    // position, which is not representable on the grid, so the item is
    // deleted outright instead of moved.
    let outcome = modifier.move_or_delete_temporary_logicitem(id, Grid::MAX, Grid::ZERO).unwrap();

    assert_eq!(outcome, logic_item::ModeOutcome::Deleted);
    assert!(modifier.layout().logic_items().is_empty());
}

#[test]
fn selection_survives_swap_delete() {
    let mut modifier = Modifier::new();
    let a = modifier.add_logic_item(and_gate(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);
    let _b = modifier.add_logic_item(and_gate(), Point::new(Grid::new(5), Grid::ZERO), Orientation::Right);
    let c = modifier.add_logic_item(and_gate(), Point::new(Grid::new(10), Grid::ZERO), Orientation::Right);
    let key_c = modifier.layout().logic_items().key(c);

    let selection = modifier.create_selection();
    modifier.selections_mut().get_mut(selection).unwrap().add_logic_item(c);

    modifier.delete_logic_item(a).unwrap();

    // `c` was the last slot, so swap-and-pop moved it into `a`'s old id.
    let selected = modifier.selections().get(selection).unwrap();
    assert_eq!(selected.logic_items(), &[a]);
    assert_eq!(modifier.layout().logic_items().key(a), key_c);
}

#[test]
fn collision_insertion_is_rejected_and_leaves_layout_unchanged() {
    let mut modifier = Modifier::new();
    let position = Point::new(Grid::ZERO, Grid::ZERO);
    let first = modifier.add_logic_item(and_gate(), position, Orientation::Right);
    modifier
        .set_logic_item_insertion_mode(first, InsertionMode::InsertOrDiscard, TransitionHint::None)
        .unwrap();

    let second = modifier.add_logic_item(and_gate(), position, Orientation::Right);
    let outcome = modifier
        .set_logic_item_insertion_mode(second, InsertionMode::InsertOrDiscard, TransitionHint::None)
        .unwrap();

    assert_eq!(outcome, logic_item::ModeOutcome::Deleted);
    assert_eq!(modifier.layout().logic_items().len(), 1);
    assert_eq!(modifier.layout().logic_items().state(first), DisplayState::Normal);
}

#[test]
fn crosspoint_toggle_merges_two_inserted_wires_into_one() {
    let mut modifier = Modifier::new();
    let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);

    let horizontal = modifier.create_wire();
    let shared_segment = modifier.add_wire_segment(
        horizontal,
        OrderedLine::new(Point::new(Grid::ZERO, Grid::ZERO), Point::new(Grid::new(10), Grid::ZERO)).unwrap(),
        endpoints,
    );
    modifier.set_wire_insertion_mode(horizontal, InsertionMode::InsertOrDiscard, TransitionHint::None);

    let vertical = modifier.create_wire();
    modifier.add_wire_segment(
        vertical,
        OrderedLine::new(Point::new(Grid::new(10), Grid::ZERO), Point::new(Grid::new(10), Grid::new(10))).unwrap(),
        endpoints,
    );
    modifier.set_wire_insertion_mode(vertical, InsertionMode::InsertOrDiscard, TransitionHint::None);

    modifier.toggle_wire_crosspoint(shared_segment);

    assert!(!modifier.layout().is_wire_live(vertical));
    assert_eq!(wire::segments_of(modifier.layout(), horizontal).len(), 2);
    for segment in wire::segments_of(modifier.layout(), horizontal) {
        assert!(modifier.index().spatial().contains(ls_index::TreePayload::WireSegment(segment)));
    }
}

#[test]
fn undo_after_clipboard_paste_removes_every_pasted_element() {
    let mut source = ls_layout::Layout::new();
    let (id, _) = source.add_logic_item(button(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);
    source.insert_logic_item(id, DisplayState::Normal);

    let text = ls_persist::copy_to_clipboard(&source, &[id], &[], &[]);
    assert!(!text.is_empty());

    let mut modifier = Modifier::new();
    let (pasted, selection) = modifier.paste_from_clipboard(&text).unwrap().expect("non-empty clipboard pastes to Some");
    assert_eq!(pasted.logic_items.len(), 1);
    assert_eq!(modifier.layout().logic_items().len(), 1);
    assert!(!modifier.selections().get(selection).unwrap().logic_items().is_empty());

    modifier.undo_group();

    assert!(modifier.layout().logic_items().is_empty());
}
