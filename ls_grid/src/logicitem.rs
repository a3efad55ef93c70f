// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logic item vocabulary types (spec.md §3.2).

use crate::geometry::{Orientation, RectGrid};

/// The kind of logic element placed on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicItemType {
    /// AND gate.
    And,
    /// OR gate.
    Or,
    /// XOR gate.
    Xor,
    /// NAND gate.
    Nand,
    /// NOR gate.
    Nor,
    /// Unary buffer.
    Buffer,
    /// Periodic clock source.
    ClockGenerator,
    /// JK flip-flop.
    FlipFlopJk,
    /// D flip-flop.
    FlipFlopD,
    /// D latch.
    LatchD,
    /// Shift register.
    ShiftRegister,
    /// Interactive push button (single output).
    Button,
    /// Single-bit indicator LED (single input).
    Led,
    /// Numeric seven-segment-style display.
    DisplayNumber,
    /// ASCII character display.
    DisplayAscii,
}

/// Bounded count of connections (inputs or outputs) on a logic item.
///
/// A dedicated vocabulary type rather than a bare integer, so the valid
/// range is enforced at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionCount(u8);

impl ConnectionCount {
    /// The maximum number of connections a single logic item may expose.
    pub const MAX: u8 = 128;

    /// Attempts to construct a `ConnectionCount`, failing outside `0..=MAX`.
    #[must_use]
    pub fn try_new(count: u8) -> Option<Self> {
        (count <= Self::MAX).then_some(Self(count))
    }

    /// Returns the raw count.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Attributes specific to [`LogicItemType::ClockGenerator`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClockGeneratorAttributes {
    /// User-visible name.
    pub name: String,
    /// Duration the output stays on, in nanoseconds.
    pub on_period_ns: u64,
    /// Duration the output stays off, in nanoseconds.
    pub off_period_ns: u64,
    /// When `true`, `off_period_ns` is ignored and treated equal to `on_period_ns`.
    pub symmetric: bool,
}

impl ClockGeneratorAttributes {
    /// Returns the effective off-period, honoring `symmetric`.
    #[must_use]
    pub fn effective_off_period_ns(&self) -> u64 {
        if self.symmetric {
            self.on_period_ns
        } else {
            self.off_period_ns
        }
    }
}

/// Per-input and per-output inverter bits, one bit per connector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct InverterBits(pub Vec<bool>);

impl InverterBits {
    /// Constructs `count` cleared inverter bits.
    #[must_use]
    pub fn cleared(count: usize) -> Self {
        Self(vec![false; count])
    }
}

/// The static, placement-independent definition of a logic item.
#[derive(Clone, Debug, PartialEq)]
pub struct LogicItemDefinition {
    /// Which kind of element this is.
    pub logicitem_type: LogicItemType,
    /// Number of inputs.
    pub input_count: ConnectionCount,
    /// Number of outputs.
    pub output_count: ConnectionCount,
    /// Per-input inverter flags, length `input_count`.
    pub input_inverters: InverterBits,
    /// Per-output inverter flags, length `output_count`.
    pub output_inverters: InverterBits,
    /// Clock-specific attributes; `Some` only for `ClockGenerator`.
    pub clock_attributes: Option<ClockGeneratorAttributes>,
}

impl LogicItemDefinition {
    /// Computes the local (orientation-independent) body rectangle for this
    /// definition, anchored at the origin. Width grows with the larger of
    /// input/output count; height is always at least one cell.
    #[must_use]
    pub fn local_body_size(&self) -> (u16, u16) {
        let ports = self.input_count.value().max(self.output_count.value()).max(1);
        (2, u16::from(ports))
    }
}

/// A logic item placed in the layout: definition plus placement state.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLogicItem {
    /// The static definition.
    pub definition: LogicItemDefinition,
    /// The grid position of the item's anchor (lower-left corner, pre-rotation).
    pub position: crate::geometry::Point,
    /// The item's orientation.
    pub orientation: Orientation,
}

impl PlacedLogicItem {
    /// Computes the world-space body rectangle for this placement.
    ///
    /// Returns `None` if the rotated, translated rectangle is not fully
    /// representable on the grid (spec.md §3.2 invariant).
    #[must_use]
    pub fn body_rect(&self) -> Option<RectGrid> {
        let (w, h) = self.definition.local_body_size();
        let (w, h) = match self.orientation {
            Orientation::Right | Orientation::Left | Orientation::Undirected => (w, h),
            Orientation::Up | Orientation::Down => (h, w),
        };
        let dx = crate::grid::Grid::try_from_i64(i64::from(w))?;
        let dy = crate::grid::Grid::try_from_i64(i64::from(h))?;
        let p1 = crate::geometry::Point::new(
            self.position.x.checked_add(dx)?,
            self.position.y.checked_add(dy)?,
        );
        Some(RectGrid::from_corners(self.position, p1))
    }
}
