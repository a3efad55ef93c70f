// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable, never-reused keys (spec.md §3.5).
//!
//! Each element kind (logic item, decoration, wire segment) has its own
//! monotonically allocated 64-bit key space, matching the original
//! implementation's separate `logicitem_key_t` / `decoration_key_t` /
//! `segment_key_t` vocabulary types rather than one shared key type.

use core::fmt;

macro_rules! stable_key {
    ($name:ident, $null:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            /// The reserved "no key" sentinel.
            pub const $null: Self = Self(0);

            pub(crate) const fn from_raw(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw 64-bit value, for serialization.
            #[must_use]
            pub const fn raw(self) -> u64 {
                self.0
            }

            /// Returns `true` if this is the null key.
            #[must_use]
            pub const fn is_null(self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

stable_key!(LogicItemKey, NULL_LOGIC_ITEM_KEY, "Stable key for a logic item, surviving id compaction.");
stable_key!(DecorationKey, NULL_DECORATION_KEY, "Stable key for a decoration, surviving id compaction.");
stable_key!(SegmentKey, NULL_SEGMENT_KEY, "Stable key for a wire segment, surviving id compaction.");

/// Monotonic allocator for one kind of stable key.
///
/// Keys are never reused: even if every element of a kind is deleted, the
/// next allocation continues from the high-water mark. This is what lets
/// external holders (selections, undo entries, clipboard payloads) safely
/// outlive id compaction performed by swap-and-pop deletion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyAllocator {
    next: u64,
}

impl KeyAllocator {
    /// Constructs an allocator starting at key `1` (`0` is reserved as null).
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocates and returns the next raw key value.
    pub fn allocate_raw(&mut self) -> u64 {
        let key = self.next;
        self.next += 1;
        key
    }
}

/// Blanket helper so each stable key newtype can be allocated uniformly.
pub trait AllocatesKey: Sized {
    /// Allocates a fresh, never-before-used key.
    fn allocate(allocator: &mut KeyAllocator) -> Self;
}

impl AllocatesKey for LogicItemKey {
    fn allocate(allocator: &mut KeyAllocator) -> Self {
        Self::from_raw(allocator.allocate_raw())
    }
}

impl AllocatesKey for DecorationKey {
    fn allocate(allocator: &mut KeyAllocator) -> Self {
        Self::from_raw(allocator.allocate_raw())
    }
}

impl AllocatesKey for SegmentKey {
    fn allocate(allocator: &mut KeyAllocator) -> Self {
        Self::from_raw(allocator.allocate_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_never_repeat() {
        let mut alloc = KeyAllocator::new();
        let a = LogicItemKey::allocate(&mut alloc);
        let b = LogicItemKey::allocate(&mut alloc);
        assert_ne!(a, b);
        assert!(!a.is_null());
    }

    #[test]
    fn null_key_is_distinguishable() {
        assert!(LogicItemKey::NULL_LOGIC_ITEM_KEY.is_null());
    }
}
