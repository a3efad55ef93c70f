// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire segment vocabulary types (spec.md §3.4).

use crate::grid::Offset;
use crate::ids::{SegmentIndex, WireId};

/// The kind of endpoint a wire segment terminates in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SegmentPointType {
    /// Connects to a logic item input.
    Input,
    /// Connects to a logic item output.
    Output,
    /// An interior bend where exactly two collinear-adjacent segments meet
    /// and no other wire is attached.
    CornerPoint,
    /// A junction where three or more segment ends meet.
    CrossPoint,
    /// An endpoint with no semantic meaning yet (temporary/colliding wires).
    #[default]
    ShadowPoint,
    /// Freshly created, not yet classified by `fix_and_merge_segments`.
    NewUnknown,
}

/// A handle to one segment within a wire's segment tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    /// The owning wire.
    pub wire_id: WireId,
    /// The segment's index within that wire's tree.
    pub segment_index: SegmentIndex,
}

impl Segment {
    /// Constructs a segment handle.
    #[must_use]
    pub const fn new(wire_id: WireId, segment_index: SegmentIndex) -> Self {
        Self {
            wire_id,
            segment_index,
        }
    }
}

/// A contiguous sub-range `[begin, end)` of offsets along a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Part {
    /// Start offset, inclusive.
    pub begin: Offset,
    /// End offset, exclusive.
    pub end: Offset,
}

impl Part {
    /// Constructs a part, returning `None` if `begin >= end`.
    #[must_use]
    pub fn new(begin: Offset, end: Offset) -> Option<Self> {
        if begin < end {
            Some(Self { begin, end })
        } else {
            None
        }
    }

    /// Returns the length of this part.
    #[must_use]
    pub fn length(self) -> Offset {
        // `begin < end` is an invariant of `Part::new`, so this never underflows.
        Offset::new(self.end.value() - self.begin.value())
    }

    /// Returns `true` if this part fully covers `[0, total)`.
    #[must_use]
    pub fn is_full(self, total: Offset) -> bool {
        self.begin == Offset::ZERO && self.end == total
    }

    /// Returns `true` if `self` and `other` overlap.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    /// Returns the intersection of `self` and `other`, if any.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let begin = self.begin.max(other.begin);
        let end = self.end.min(other.end);
        Self::new(begin, end)
    }
}

/// A sub-range of a specific segment: `(segment, part)`. The primary unit of
/// currency for wire editing (spec.md §3.4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentPart {
    /// The segment being addressed.
    pub segment: Segment,
    /// The sub-range within that segment.
    pub part: Part,
}

impl SegmentPart {
    /// Constructs a segment part.
    #[must_use]
    pub const fn new(segment: Segment, part: Part) -> Self {
        Self { segment, part }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Offset;

    fn o(v: u16) -> Offset {
        Offset::new(v)
    }

    #[test]
    fn part_rejects_empty_range() {
        assert!(Part::new(o(5), o(5)).is_none());
        assert!(Part::new(o(6), o(5)).is_none());
    }

    #[test]
    fn part_overlap_and_intersect() {
        let a = Part::new(o(0), o(10)).unwrap();
        let b = Part::new(o(5), o(15)).unwrap();
        assert!(a.overlaps(b));
        assert_eq!(a.intersect(b), Part::new(o(5), o(10)));

        let c = Part::new(o(10), o(20)).unwrap();
        assert!(!a.overlaps(c));
        assert_eq!(a.intersect(c), None);
    }

    #[test]
    fn part_is_full() {
        let whole = Part::new(o(0), o(10)).unwrap();
        assert!(whole.is_full(o(10)));
        assert!(!whole.is_full(o(11)));
    }
}
