// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete grid coordinates with checked arithmetic.

use core::fmt;

/// A discrete location on the grid in one dimension.
///
/// Backed by a signed 16-bit integer. All fallible arithmetic is checked:
/// editing code must never silently wrap a coordinate off the representable
/// range, since that would desync the spatial index from the data it mirrors.
/// Use [`Grid::checked_add`] and friends at every editing-function boundary;
/// [`Grid::saturating_add`] exists only for display math that never feeds
/// back into a mutation decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grid(i16);

impl Grid {
    /// The zero coordinate.
    pub const ZERO: Self = Self(0);

    /// Smallest representable coordinate.
    pub const MIN: Self = Self(i16::MIN);

    /// Largest representable coordinate.
    pub const MAX: Self = Self(i16::MAX);

    /// Constructs a `Grid` from a raw `i16`.
    #[must_use]
    pub const fn new(value: i16) -> Self {
        Self(value)
    }

    /// Returns the raw `i16` value.
    #[must_use]
    pub const fn value(self) -> i16 {
        self.0
    }

    /// Attempts to construct a `Grid` from any integer, failing if it is out
    /// of the `i16` range.
    pub fn try_from_i64(value: i64) -> Option<Self> {
        i16::try_from(value).ok().map(Self)
    }

    /// Checked addition; `None` if the result does not fit in `i16`.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction; `None` if the result does not fit in `i16`.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Checked multiplication by a plain integer factor.
    #[must_use]
    pub fn checked_mul(self, rhs: i32) -> Option<Self> {
        let result = i32::from(self.0).checked_mul(rhs)?;
        i16::try_from(result).ok().map(Self)
    }

    /// Saturating addition, for display-only math. Never use this to decide
    /// whether an edit is representable.
    #[must_use]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction, for display-only math.
    #[must_use]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Grid> for i64 {
    fn from(value: Grid) -> Self {
        Self::from(value.0)
    }
}

impl From<Grid> for f64 {
    fn from(value: Grid) -> Self {
        Self::from(value.0)
    }
}

/// An unsigned length along a wire segment, used to address sub-ranges via
/// [`crate::wire::Part`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset(u16);

impl Offset {
    /// The zero offset.
    pub const ZERO: Self = Self(0);

    /// Constructs an `Offset` from a raw `u16`.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the raw `u16` value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Checked addition; `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction; `None` on underflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(Grid::new(i16::MAX).checked_add(Grid::new(1)), None);
        assert_eq!(
            Grid::new(10).checked_add(Grid::new(5)),
            Some(Grid::new(15))
        );
    }

    #[test]
    fn checked_sub_detects_underflow() {
        assert_eq!(Grid::new(i16::MIN).checked_sub(Grid::new(1)), None);
    }

    #[test]
    fn saturating_add_clamps_instead_of_failing() {
        assert_eq!(Grid::new(i16::MAX).saturating_add(Grid::new(1)), Grid::MAX);
    }

    #[test]
    fn offset_checked_arithmetic() {
        assert_eq!(Offset::new(5).checked_sub(Offset::new(10)), None);
        assert_eq!(Offset::new(10).checked_sub(Offset::new(4)), Some(Offset::new(6)));
    }
}
