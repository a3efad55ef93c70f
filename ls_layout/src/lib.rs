// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! LogikSim Layout: authoritative storage for logic items, decorations, and
//! wire segment trees (spec.md §4.1).
//!
//! `Layout` does not know about collision detection, spatial queries, or
//! undo — it only stores data and reports every mutation as
//! [`ls_grid::InfoMessage`] values for observers (`ls_index::LayoutIndex`,
//! `ls_selection::SelectionStore`, `ls_circuit::History`) to replay. Keeping
//! `Layout` this dumb is what lets those observers stay provably derivable
//! from its message stream instead of reaching back into its storage.
//!
//! ## Contents
//!
//! - [`logic_items`]: compact storage for logic items.
//! - [`decorations`]: compact storage for decorations.
//! - [`wires`]: compact storage for wires and their segment trees.

pub mod decorations;
pub mod logic_items;
pub mod wires;

use decorations::Decorations;
use ls_grid::{
    DecorationId, DecorationKey, DecorationType, DisplayState, Endpoints, InfoMessage, LogicItemDefinition,
    LogicItemId, LogicItemKey, OrderedLine, Orientation, PlacedDecoration, PlacedLogicItem, Point, Segment,
    SegmentGeometry, SegmentKey, WireId,
};
use logic_items::LogicItems;
use wires::Wires;

/// The authoritative store of every element in a circuit, inserted or not.
#[derive(Debug, Default, PartialEq)]
pub struct Layout {
    logic_items: LogicItems,
    decorations: Decorations,
    wires: Wires,
}

impl Layout {
    /// Constructs an empty layout (just the two reserved wires, no items).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to logic item storage.
    #[must_use]
    pub fn logic_items(&self) -> &LogicItems {
        &self.logic_items
    }

    /// Read-only access to decoration storage.
    #[must_use]
    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    /// Read-only access to wire storage.
    #[must_use]
    pub fn wires(&self) -> &Wires {
        &self.wires
    }

    /// Allocates a new, uninserted logic item.
    pub fn add_logic_item(&mut self, definition: LogicItemDefinition, position: Point, orientation: Orientation) -> (LogicItemId, InfoMessage) {
        self.logic_items.create(definition, position, orientation)
    }

    /// Transitions a logic item into the inserted state.
    pub fn insert_logic_item(&mut self, id: LogicItemId, state: DisplayState) -> InfoMessage {
        self.logic_items.mark_inserted(id, state)
    }

    /// Transitions a logic item out of the inserted state.
    pub fn uninsert_logic_item(&mut self, id: LogicItemId) -> InfoMessage {
        self.logic_items.mark_uninserted(id)
    }

    /// Overwrites a logic item's placement data without changing its
    /// display state. Used to move a still-uninserted item.
    pub fn set_logic_item_data(&mut self, id: LogicItemId, data: ls_grid::PlacedLogicItem) {
        self.logic_items.set_data(id, data);
    }

    /// Deletes a logic item, returning the deletion message and an optional
    /// rename message for the element that moved into its slot. Callers
    /// must emit them in that order.
    pub fn delete_logic_item(&mut self, id: LogicItemId) -> (InfoMessage, Option<InfoMessage>) {
        self.logic_items.delete(id)
    }

    /// Resurrects a previously deleted logic item under its original key.
    /// Used by undo.
    pub fn recreate_logic_item(&mut self, key: LogicItemKey, data: PlacedLogicItem) -> (LogicItemId, InfoMessage) {
        self.logic_items.recreate(key, data)
    }

    /// Allocates a new, uninserted decoration.
    pub fn add_decoration(
        &mut self,
        decoration_type: DecorationType,
        position: Point,
        width: u16,
        height: u16,
        text: String,
    ) -> (DecorationId, InfoMessage) {
        self.decorations.create(decoration_type, position, width, height, text)
    }

    /// Transitions a decoration into the inserted state.
    pub fn insert_decoration(&mut self, id: DecorationId) -> InfoMessage {
        self.decorations.mark_inserted(id)
    }

    /// Transitions a decoration out of the inserted state.
    pub fn uninsert_decoration(&mut self, id: DecorationId) -> InfoMessage {
        self.decorations.mark_uninserted(id)
    }

    /// Deletes a decoration, returning the deletion message and an optional
    /// rename message for the element that moved into its slot.
    pub fn delete_decoration(&mut self, id: DecorationId) -> (InfoMessage, Option<InfoMessage>) {
        self.decorations.delete(id)
    }

    /// Resurrects a previously deleted decoration under its original key.
    /// Used by undo.
    pub fn recreate_decoration(&mut self, key: DecorationKey, data: PlacedDecoration) -> (DecorationId, InfoMessage) {
        self.decorations.recreate(key, data)
    }

    /// Allocates a new, empty, uninserted wire.
    pub fn create_wire(&mut self) -> WireId {
        self.wires.create_wire()
    }

    /// Frees an emptied, non-reserved wire id.
    pub fn delete_wire(&mut self, id: WireId) {
        self.wires.delete_wire(id);
    }

    /// Returns `true` if `wire_id` currently refers to a live wire.
    #[must_use]
    pub fn is_wire_live(&self, wire_id: WireId) -> bool {
        self.wires.is_live(wire_id)
    }

    /// Adds a segment to a wire's tree.
    pub fn add_wire_segment(&mut self, wire_id: WireId, line: OrderedLine, endpoints: Endpoints) -> (Segment, InfoMessage) {
        self.wires.add_segment(wire_id, line, endpoints)
    }

    /// Adds a segment to a wire's tree under a caller-supplied key instead
    /// of drawing a fresh one. Used by undo to resurrect a buried segment.
    pub fn add_wire_segment_with_key(
        &mut self,
        wire_id: WireId,
        key: SegmentKey,
        line: OrderedLine,
        endpoints: Endpoints,
    ) -> (Segment, InfoMessage) {
        self.wires.add_segment_with_key(wire_id, key, line, endpoints)
    }

    /// Restores a single segment into an already-registered, still-live
    /// wire, returning the [`InfoMessage::SegmentInserted`] event for just
    /// that segment. Used by undo, which only needs to resurrect the one
    /// segment it buried rather than re-insert the whole tree.
    pub fn insert_wire_segment(&mut self, segment: Segment) -> InfoMessage {
        InfoMessage::SegmentInserted {
            segment,
            data: self.wires.geometry(segment),
        }
    }

    /// Overwrites a segment's endpoint classification in place, without
    /// changing its geometry. Used by the endpoint-reclassification pass
    /// that runs after a wire edit touches a junction point.
    pub fn set_wire_segment_endpoints(&mut self, segment: Segment, endpoints: Endpoints) {
        let line = self.wires.geometry(segment).line;
        self.wires.set_geometry(segment, line, endpoints);
    }

    /// Overwrites a segment's geometry and endpoint classification in place.
    /// Unlike [`Self::set_wire_segment_endpoints`], this also changes the
    /// segment's line, for moving or reshaping a wire's segments directly.
    pub fn set_wire_segment_geometry(&mut self, segment: Segment, line: OrderedLine, endpoints: Endpoints) {
        self.wires.set_geometry(segment, line, endpoints);
    }

    /// Returns the geometry and endpoint classification of a segment.
    #[must_use]
    pub fn wire_segment_geometry(&self, segment: Segment) -> SegmentGeometry {
        self.wires.geometry(segment)
    }

    /// Removes a segment from its wire's tree, returning the deletion
    /// message and an optional rename message for the segment that moved
    /// into its slot.
    pub fn remove_wire_segment(&mut self, segment: Segment) -> (InfoMessage, Option<InfoMessage>) {
        self.wires.remove_segment(segment)
    }

    /// Transitions every segment of a wire into the inserted state.
    pub fn insert_wire(&mut self, wire_id: WireId, state: DisplayState) -> Vec<InfoMessage> {
        self.wires.mark_wire_inserted(wire_id, state)
    }

    /// Transitions every segment of a wire out of the inserted state.
    pub fn uninsert_wire(&mut self, wire_id: WireId) -> Vec<InfoMessage> {
        self.wires.mark_wire_uninserted(wire_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{ConnectionCount, Grid, InverterBits, LogicItemType};

    #[test]
    fn add_insert_uninsert_delete_round_trip() {
        let mut layout = Layout::new();
        let definition = LogicItemDefinition {
            logicitem_type: LogicItemType::Buffer,
            input_count: ConnectionCount::try_new(1).unwrap(),
            output_count: ConnectionCount::try_new(1).unwrap(),
            input_inverters: InverterBits::cleared(1),
            output_inverters: InverterBits::cleared(1),
            clock_attributes: None,
        };
        let (id, created) = layout.add_logic_item(definition, Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);
        assert!(matches!(created, InfoMessage::LogicItemCreated { .. }));

        let inserted = layout.insert_logic_item(id, DisplayState::Normal);
        assert!(matches!(inserted, InfoMessage::LogicItemInserted { .. }));
        assert_eq!(layout.logic_items().state(id), DisplayState::Normal);

        let uninserted = layout.uninsert_logic_item(id);
        assert!(matches!(uninserted, InfoMessage::LogicItemUninserted { .. }));

        let (deleted, rename) = layout.delete_logic_item(id);
        assert!(matches!(deleted, InfoMessage::LogicItemDeleted { .. }));
        assert!(rename.is_none());
        assert!(layout.logic_items().is_empty());
    }
}
