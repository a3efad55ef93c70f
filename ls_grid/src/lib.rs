// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! LogikSim Grid: grid coordinates and vocabulary types for the editable
//! circuit core.
//!
//! This crate has no opinions about layout, indexing, or editing policy; it
//! just defines the small, copyable value types everything else is built
//! from, in the same spirit as `understory_box_tree::types` separating
//! public geometry/flag types from the tree that uses them.
//!
//! ## Contents
//!
//! - [`grid`]: the integer coordinate type [`grid::Grid`] and [`grid::Offset`].
//! - [`geometry`]: [`geometry::Point`], [`geometry::RectGrid`],
//!   [`geometry::RectFine`], [`geometry::OrderedLine`], [`geometry::Orientation`].
//! - [`state`]: [`state::DisplayState`], [`state::InsertionMode`], [`state::TransitionHint`].
//! - [`ids`]: compact, swap-and-pop-compactable ids.
//! - [`keys`]: stable, never-reused keys and their allocator.
//! - [`wire`]: segment/part/segment-part vocabulary.
//! - [`logicitem`] and [`decoration`]: placed-element vocabulary.

pub mod decoration;
pub mod geometry;
pub mod grid;
pub mod ids;
pub mod keys;
pub mod logicitem;
pub mod message;
pub mod state;
pub mod wire;

pub use decoration::{DecorationType, PlacedDecoration};
pub use geometry::{LineInsertionType, OrderedLine, Orientation, Point, RectFine, RectGrid};
pub use grid::{Grid, Offset};
pub use ids::{DecorationId, LogicItemId, SegmentIndex, WireId};
pub use keys::{AllocatesKey, DecorationKey, KeyAllocator, LogicItemKey, SegmentKey};
pub use logicitem::{
    ClockGeneratorAttributes, ConnectionCount, InverterBits, LogicItemDefinition, LogicItemType,
    PlacedLogicItem,
};
pub use message::{Endpoints, InfoMessage, SegmentGeometry};
pub use state::{DisplayState, InsertionMode, TransitionHint};
pub use wire::{Part, Segment, SegmentPart, SegmentPointType};
