// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact, swap-and-pop-compactable element ids.

use core::fmt;

macro_rules! compact_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Constructs an id from a raw packed index.
            #[must_use]
            pub const fn from_index(index: u32) -> Self {
                Self(index)
            }

            /// Returns the packed index, usable to address a `Vec`.
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

compact_id!(LogicItemId, "Compact id of a logic item; compacts on deletion via swap-and-pop.");
compact_id!(DecorationId, "Compact id of a decoration; compacts on deletion via swap-and-pop.");

/// Id of a wire (a segment tree). Two well-known ids always exist
/// ([`WireId::TEMPORARY`] and [`WireId::COLLIDING`]); every other id
/// identifies an inserted wire and is swap-and-pop compactable like the
/// other element ids, but never collides with the two reserved ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireId(u32);

impl WireId {
    /// The wire that holds all not-yet-inserted drag previews.
    pub const TEMPORARY: Self = Self(0);
    /// The wire that holds uninsertable (colliding) previews.
    pub const COLLIDING: Self = Self(1);
    /// The first id available for inserted wires.
    pub const FIRST_INSERTED: u32 = 2;

    /// Constructs a wire id from a raw packed index.
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// Returns the packed index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if this is one of the two reserved wire ids.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        self.0 == Self::TEMPORARY.0 || self.0 == Self::COLLIDING.0
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a segment within a wire's segment tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentIndex(u32);

impl SegmentIndex {
    /// Constructs a segment index from a raw packed index.
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// Returns the packed index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SegmentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
