// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The info-message bus (spec.md §4.6).
//!
//! A tagged sum type consumed by every observer (indices, selections, the
//! visible selection, history, and in debug builds the message validator).
//! Messages carry the data an observer needs to update itself without
//! reaching back into `Layout`, which is what keeps the observers decoupled
//! from the authoritative store (spec.md §9, "do not materialize cyclic
//! references").

use crate::decoration::PlacedDecoration;
use crate::ids::{DecorationId, LogicItemId};
use crate::keys::{DecorationKey, LogicItemKey, SegmentKey};
use crate::logicitem::PlacedLogicItem;
use crate::wire::{Segment, SegmentPart, SegmentPointType};
use crate::Offset;

/// The two endpoint classifications of an inserted segment, in `(p0, p1)` order.
pub type Endpoints = (SegmentPointType, SegmentPointType);

/// The geometry and endpoint classification of an inserted segment, as
/// carried by insertion/uninsertion messages.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentGeometry {
    /// The segment's line.
    pub line: crate::geometry::OrderedLine,
    /// Endpoint classifications at `(p0, p1)`.
    pub endpoints: Endpoints,
}

/// One event broadcast after a `Layout` mutation.
///
/// Ordering rule (spec.md §4.6): when deleting an id that is not last,
/// a `*Deleted` message for the removed id is emitted **before** the
/// `*IdUpdated` message that renames the previously-last element into the
/// vacated slot. All observers rely on this ordering.
#[derive(Clone, Debug, PartialEq)]
pub enum InfoMessage {
    /// A new (uninserted) logic item slot was allocated.
    LogicItemCreated {
        /// The newly allocated id.
        id: LogicItemId,
        /// The stable key assigned to this id for its lifetime.
        key: LogicItemKey,
    },
    /// The element previously at `old_id` now lives at `new_id` due to
    /// swap-and-pop compaction.
    LogicItemIdUpdated {
        /// The id the element now has.
        new_id: LogicItemId,
        /// The id the element previously had.
        old_id: LogicItemId,
    },
    /// A logic item slot was freed.
    LogicItemDeleted {
        /// The id that was freed.
        id: LogicItemId,
    },
    /// A logic item transitioned into the inserted state.
    LogicItemInserted {
        /// The item's id.
        id: LogicItemId,
        /// Final placed data at the moment of insertion.
        data: PlacedLogicItem,
    },
    /// A logic item transitioned out of the inserted state.
    LogicItemUninserted {
        /// The item's id.
        id: LogicItemId,
        /// Placed data at the moment of uninsertion.
        data: PlacedLogicItem,
    },
    /// An inserted logic item's id changed due to compaction.
    InsertedLogicItemIdUpdated {
        /// The item's new id.
        new_id: LogicItemId,
        /// The item's previous id.
        old_id: LogicItemId,
        /// The item's current placed data.
        data: PlacedLogicItem,
    },

    /// A new (uninserted) decoration slot was allocated.
    DecorationCreated {
        /// The newly allocated id.
        id: DecorationId,
        /// The stable key assigned to this id for its lifetime.
        key: DecorationKey,
    },
    /// The element previously at `old_id` now lives at `new_id`.
    DecorationIdUpdated {
        /// The id the element now has.
        new_id: DecorationId,
        /// The id the element previously had.
        old_id: DecorationId,
    },
    /// A decoration slot was freed.
    DecorationDeleted {
        /// The id that was freed.
        id: DecorationId,
    },
    /// A decoration transitioned into the inserted state.
    DecorationInserted {
        /// The decoration's id.
        id: DecorationId,
        /// Final placed data at the moment of insertion.
        data: PlacedDecoration,
    },
    /// A decoration transitioned out of the inserted state.
    DecorationUninserted {
        /// The decoration's id.
        id: DecorationId,
        /// Placed data at the moment of uninsertion.
        data: PlacedDecoration,
    },
    /// An inserted decoration's id changed due to compaction.
    InsertedDecorationIdUpdated {
        /// The decoration's new id.
        new_id: DecorationId,
        /// The decoration's previous id.
        old_id: DecorationId,
        /// The decoration's current placed data.
        data: PlacedDecoration,
    },

    /// A new (uninserted) wire segment slot was allocated.
    SegmentCreated {
        /// The newly allocated segment handle.
        segment: Segment,
        /// The segment's length.
        size: Offset,
        /// The stable key assigned to this segment for its lifetime.
        key: SegmentKey,
    },
    /// The segment previously addressed by `old_segment` now lives at
    /// `new_segment` due to swap-and-pop compaction within the wire's tree.
    SegmentIdUpdated {
        /// The segment's new handle.
        new_segment: Segment,
        /// The segment's previous handle.
        old_segment: Segment,
    },
    /// A range of offsets moved from one segment location to another,
    /// without changing insertion state (e.g. a merge or split).
    SegmentPartMoved {
        /// Where the part came from.
        source: SegmentPart,
        /// Where the part now lives.
        destination: SegmentPart,
    },
    /// A range of offsets was deleted outright.
    SegmentPartDeleted {
        /// The deleted part.
        segment_part: SegmentPart,
    },
    /// A segment transitioned into the inserted state.
    SegmentInserted {
        /// The segment's handle.
        segment: Segment,
        /// Geometry and endpoint classification at the moment of insertion.
        data: SegmentGeometry,
    },
    /// A segment transitioned out of the inserted state.
    SegmentUninserted {
        /// The segment's handle.
        segment: Segment,
        /// Geometry and endpoint classification at the moment of uninsertion.
        data: SegmentGeometry,
    },
    /// An inserted segment's handle changed due to compaction.
    InsertedSegmentIdUpdated {
        /// The segment's new handle.
        new_segment: Segment,
        /// The segment's previous handle.
        old_segment: Segment,
        /// The segment's current geometry.
        data: SegmentGeometry,
    },
    /// An inserted segment's endpoint classification changed in place
    /// (e.g. a corner became a cross point).
    InsertedEndPointsUpdated {
        /// The segment whose endpoints changed.
        segment: Segment,
        /// The new classification.
        new_endpoints: Endpoints,
        /// The previous classification.
        old_endpoints: Endpoints,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::AllocatesKey;

    #[test]
    fn messages_compare_structurally() {
        let mut alloc = crate::keys::KeyAllocator::new();
        let key = LogicItemKey::allocate(&mut alloc);
        let a = InfoMessage::LogicItemCreated {
            id: LogicItemId::from_index(0),
            key,
        };
        let b = InfoMessage::LogicItemCreated {
            id: LogicItemId::from_index(0),
            key,
        };
        assert_eq!(a, b);
    }
}
