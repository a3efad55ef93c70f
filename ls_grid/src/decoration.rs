// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoration vocabulary types (spec.md §3.3): non-connecting annotations.

use crate::geometry::{Point, RectGrid};
use crate::grid::Grid;

/// The kind of decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationType {
    /// A free-floating text label.
    TextElement,
}

/// A text decoration placed in the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedDecoration {
    /// Which kind of decoration this is.
    pub decoration_type: DecorationType,
    /// Anchor position (lower-left corner of the body rectangle).
    pub position: Point,
    /// Body width in grid cells.
    pub width: u16,
    /// Body height in grid cells.
    pub height: u16,
    /// The displayed text.
    pub text: String,
}

impl PlacedDecoration {
    /// Computes the world-space body rectangle, or `None` if it would not be
    /// fully representable on the grid (spec.md §3.3 invariant).
    #[must_use]
    pub fn body_rect(&self) -> Option<RectGrid> {
        let dx = Grid::try_from_i64(i64::from(self.width))?;
        let dy = Grid::try_from_i64(i64::from(self.height))?;
        let p1 = Point::new(
            self.position.x.checked_add(dx)?,
            self.position.y.checked_add(dy)?,
        );
        Some(RectGrid::from_corners(self.position, p1))
    }
}
