// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout index: the spatial, collision, connection, and key indices
//! kept in sync with `Layout` via the info-message bus (spec.md §4.2).
//!
//! `Layout` owns the authoritative element data; every other component that
//! needs to query "what's at this point" or "what key does this id have"
//! goes through `LayoutIndex` instead of scanning `Layout` directly. The
//! four sub-indices are updated exclusively by replaying
//! [`ls_grid::InfoMessage`] values through [`LayoutIndex::submit`] — nothing
//! else is allowed to mutate them, which keeps them provably derivable from
//! the message stream `Layout` emits.
//!
//! ## Contents
//!
//! - [`spatial`]: world-space AABB index ([`spatial::SpatialIndex`]).
//! - [`collision`]: per-cell occupancy map ([`collision::CollisionIndex`]).
//! - [`connection`]: per-point logic item port registry ([`connection::ConnectionIndex`]).
//! - [`key_index`]: key ↔ id bimaps ([`key_index::KeyIndex`]).

pub mod collision;
pub mod connection;
pub mod key_index;
pub mod spatial;

use collision::CollisionTag;
pub use collision::CollisionIndex;
use connection::{ConnectionEnd, ConnectionKind};
pub use connection::ConnectionIndex;
pub use key_index::KeyIndex;
use ls_grid::{Grid, InfoMessage, LogicItemId, Orientation, PlacedLogicItem, Point, RectFine};
pub use spatial::{SpatialIndex, TreePayload};

/// Aggregates the spatial, collision, connection, and key indices and keeps
/// them synchronized with a `Layout` through its message stream.
#[derive(Debug, Default)]
pub struct LayoutIndex {
    spatial: SpatialIndex,
    collision: CollisionIndex,
    connection: ConnectionIndex,
    keys: KeyIndex,
}

impl LayoutIndex {
    /// Constructs an empty, consistent layout index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the spatial index.
    #[must_use]
    pub fn spatial(&self) -> &SpatialIndex {
        &self.spatial
    }

    /// Read-only access to the collision index.
    #[must_use]
    pub fn collision(&self) -> &CollisionIndex {
        &self.collision
    }

    /// Read-only access to the connection index.
    #[must_use]
    pub fn connection(&self) -> &ConnectionIndex {
        &self.connection
    }

    /// Read-only access to the key index.
    #[must_use]
    pub fn keys(&self) -> &KeyIndex {
        &self.keys
    }

    /// Applies one info message, updating every sub-index that cares about
    /// it. Unrecognized combinations are no-ops: most messages affect only
    /// the key index (creation/deletion/id-renumbering), while insertion and
    /// uninsertion additionally populate or clear the spatial and collision
    /// (and, for logic items, connection) indices.
    pub fn submit(&mut self, message: &InfoMessage) {
        match message {
            InfoMessage::LogicItemCreated { id, key } => self.keys.logic_item_created(*id, *key),
            InfoMessage::LogicItemIdUpdated { new_id, old_id }
            | InfoMessage::InsertedLogicItemIdUpdated { new_id, old_id, .. } => {
                self.keys.logic_item_id_updated(*old_id, *new_id);
                self.spatial.remove(TreePayload::LogicItem(*old_id));
                if let InfoMessage::InsertedLogicItemIdUpdated { data, .. } = message {
                    if let Some(rect) = data.body_rect() {
                        self.spatial.upsert(TreePayload::LogicItem(*new_id), rect);
                    }
                }
            }
            InfoMessage::LogicItemDeleted { id } => {
                self.keys.logic_item_deleted(*id);
            }
            InfoMessage::LogicItemInserted { id, data } => {
                if let Some(rect) = data.body_rect() {
                    self.spatial.upsert(TreePayload::LogicItem(*id), rect);
                    self.collision
                        .insert_cells(collision::body_cells(rect).map(|pt| (pt, CollisionTag::LogicItemBody)));
                    self.register_logic_item_ports(*id, data, rect);
                }
            }
            InfoMessage::LogicItemUninserted { id, data } => {
                self.spatial.remove(TreePayload::LogicItem(*id));
                if let Some(rect) = data.body_rect() {
                    self.collision.remove_cells(collision::body_cells(rect));
                    self.unregister_logic_item_ports(*id, data, rect);
                }
            }

            InfoMessage::DecorationCreated { id, key } => self.keys.decoration_created(*id, *key),
            InfoMessage::DecorationIdUpdated { new_id, old_id }
            | InfoMessage::InsertedDecorationIdUpdated { new_id, old_id, .. } => {
                self.keys.decoration_id_updated(*old_id, *new_id);
                self.spatial.remove(TreePayload::Decoration(*old_id));
                if let InfoMessage::InsertedDecorationIdUpdated { data, .. } = message {
                    if let Some(rect) = data.body_rect() {
                        self.spatial.upsert(TreePayload::Decoration(*new_id), rect);
                    }
                }
            }
            InfoMessage::DecorationDeleted { id } => {
                self.keys.decoration_deleted(*id);
            }
            InfoMessage::DecorationInserted { id, data } => {
                if let Some(rect) = data.body_rect() {
                    self.spatial.upsert(TreePayload::Decoration(*id), rect);
                }
            }
            InfoMessage::DecorationUninserted { id, .. } => {
                self.spatial.remove(TreePayload::Decoration(*id));
            }

            InfoMessage::SegmentCreated { segment, key, .. } => self.keys.segment_created(*segment, *key),
            InfoMessage::SegmentIdUpdated { new_segment, old_segment }
            | InfoMessage::InsertedSegmentIdUpdated { new_segment, old_segment, .. } => {
                self.keys.segment_id_updated(*old_segment, *new_segment);
                self.spatial.remove(TreePayload::WireSegment(*old_segment));
                if let InfoMessage::InsertedSegmentIdUpdated { data, .. } = message {
                    let rect = ls_grid::RectGrid::from_corners(data.line.p0, data.line.p1);
                    self.spatial.upsert(TreePayload::WireSegment(*new_segment), rect);
                }
            }
            InfoMessage::SegmentPartDeleted { segment_part } => {
                self.keys.segment_deleted(segment_part.segment);
            }
            InfoMessage::SegmentPartMoved { .. } => {}
            InfoMessage::SegmentInserted { segment, data } => {
                let rect = ls_grid::RectGrid::from_corners(data.line.p0, data.line.p1);
                self.spatial.upsert(TreePayload::WireSegment(*segment), rect);
                self.collision.insert_cells(collision::wire_cells(data.line));
            }
            InfoMessage::SegmentUninserted { segment, data } => {
                self.spatial.remove(TreePayload::WireSegment(*segment));
                self.collision
                    .remove_cells(collision::wire_cells(data.line).map(|(pt, _)| pt));
            }
            InfoMessage::InsertedEndPointsUpdated { .. } => {}
        }
    }

    /// Visits every payload whose rectangle intersects `rect`.
    pub fn query_rect<F: FnMut(TreePayload)>(&self, rect: RectFine, f: F) {
        self.spatial.query_rect(rect, f);
    }

    /// Returns `true` if any inserted element's rectangle contains `(x, y)`.
    #[must_use]
    pub fn has_element(&self, x: f64, y: f64) -> bool {
        self.spatial.has_element(x, y)
    }

    /// Returns the stored world-space bounds for `payload`, if present.
    #[must_use]
    pub fn bounds_of(&self, payload: TreePayload) -> Option<(f64, f64, f64, f64)> {
        self.spatial.bounds_of(payload)
    }

    /// Returns `true` if placing `cells` would collide with anything already
    /// occupying the collision index.
    #[must_use]
    pub fn is_colliding<I: IntoIterator<Item = (Point, CollisionTag)>>(&self, cells: I) -> bool {
        self.collision.is_colliding(cells)
    }

    /// Removes every entry from every sub-index, as when a layout is cleared.
    pub fn clear(&mut self) {
        self.spatial.clear();
        self.collision.clear();
        self.connection.clear();
        self.keys.clear();
    }

    fn register_logic_item_ports(&mut self, id: LogicItemId, data: &PlacedLogicItem, rect: ls_grid::RectGrid) {
        for (point, end) in logic_item_port_ends(id, data, rect) {
            self.connection.register(point, end);
        }
    }

    fn unregister_logic_item_ports(&mut self, id: LogicItemId, data: &PlacedLogicItem, rect: ls_grid::RectGrid) {
        for (point, end) in logic_item_port_ends(id, data, rect) {
            self.connection.unregister(point, end);
        }
    }
}

/// Offsets `base` by `k + 1` cells, matching the one-indexed port spacing
/// a body rectangle's rows/columns leave between its near corner and its
/// first port. Returns `None` if the offset overflows the grid, in which
/// case the caller skips just that one port rather than the whole item.
fn port_offset(base: Grid, k: usize) -> Option<Grid> {
    let k = i64::try_from(k + 1).ok()?;
    Grid::try_from_i64(i64::from(base.value()) + k)
}

/// Computes every input/output port position and facing for a placed logic
/// item's body rectangle, ready to register/unregister in a
/// [`ConnectionIndex`]. Inputs sit on the rectangle's near edge (relative to
/// orientation), outputs on its far edge, spaced one per row/column the same
/// way [`ls_grid::LogicItemDefinition::local_body_size`] lays them out.
fn logic_item_port_ends(id: LogicItemId, data: &PlacedLogicItem, rect: ls_grid::RectGrid) -> Vec<(Point, ConnectionEnd)> {
    let inputs = usize::from(data.definition.input_count.value());
    let outputs = usize::from(data.definition.output_count.value());
    let mut ports = Vec::with_capacity(inputs + outputs);

    let mut push = |point: Option<Point>, kind: ConnectionKind, orientation: Orientation| {
        if let Some(point) = point {
            ports.push((point, ConnectionEnd { item: id, kind, orientation }));
        }
    };

    match data.orientation {
        Orientation::Right | Orientation::Undirected => {
            for k in 0..inputs {
                push(port_offset(rect.p0.y, k).map(|y| Point::new(rect.p0.x, y)), ConnectionKind::Input, Orientation::Left);
            }
            for k in 0..outputs {
                push(port_offset(rect.p0.y, k).map(|y| Point::new(rect.p1.x, y)), ConnectionKind::Output, Orientation::Right);
            }
        }
        Orientation::Left => {
            for k in 0..inputs {
                push(port_offset(rect.p0.y, k).map(|y| Point::new(rect.p1.x, y)), ConnectionKind::Input, Orientation::Right);
            }
            for k in 0..outputs {
                push(port_offset(rect.p0.y, k).map(|y| Point::new(rect.p0.x, y)), ConnectionKind::Output, Orientation::Left);
            }
        }
        Orientation::Up => {
            for k in 0..inputs {
                push(port_offset(rect.p0.x, k).map(|x| Point::new(x, rect.p0.y)), ConnectionKind::Input, Orientation::Down);
            }
            for k in 0..outputs {
                push(port_offset(rect.p0.x, k).map(|x| Point::new(x, rect.p1.y)), ConnectionKind::Output, Orientation::Up);
            }
        }
        Orientation::Down => {
            for k in 0..inputs {
                push(port_offset(rect.p0.x, k).map(|x| Point::new(x, rect.p1.y)), ConnectionKind::Input, Orientation::Up);
            }
            for k in 0..outputs {
                push(port_offset(rect.p0.x, k).map(|x| Point::new(x, rect.p0.y)), ConnectionKind::Output, Orientation::Down);
            }
        }
    }

    ports
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{
        AllocatesKey, ConnectionCount, Grid, InverterBits, KeyAllocator, LogicItemDefinition, LogicItemKey,
        LogicItemType, PlacedLogicItem,
    };

    #[test]
    fn insert_then_uninsert_round_trips_spatial_and_collision_state() {
        let mut index = LayoutIndex::new();
        let mut alloc = KeyAllocator::new();
        let key = LogicItemKey::allocate(&mut alloc);
        let id = LogicItemId::from_index(0);
        index.submit(&InfoMessage::LogicItemCreated { id, key });

        let definition = LogicItemDefinition {
            logicitem_type: LogicItemType::And,
            input_count: ConnectionCount::try_new(2).unwrap(),
            output_count: ConnectionCount::try_new(1).unwrap(),
            input_inverters: InverterBits::cleared(2),
            output_inverters: InverterBits::cleared(1),
            clock_attributes: None,
        };
        let placed = PlacedLogicItem {
            definition,
            position: Point::new(Grid::new(0), Grid::new(0)),
            orientation: Orientation::Right,
        };

        index.submit(&InfoMessage::LogicItemInserted { id, data: placed.clone() });
        assert!(index.spatial.contains(TreePayload::LogicItem(id)));

        index.submit(&InfoMessage::LogicItemUninserted { id, data: placed });
        assert!(!index.spatial.contains(TreePayload::LogicItem(id)));
    }

    #[test]
    fn logic_item_deleted_forgets_key() {
        let mut index = LayoutIndex::new();
        let mut alloc = KeyAllocator::new();
        let key = LogicItemKey::allocate(&mut alloc);
        let id = LogicItemId::from_index(0);
        index.submit(&InfoMessage::LogicItemCreated { id, key });
        index.submit(&InfoMessage::LogicItemDeleted { id });
        assert_eq!(index.keys().logic_item_key(id), None);
    }
}
