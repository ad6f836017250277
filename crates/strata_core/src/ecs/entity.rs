//! # Entity Management
//!
//! Entities are plain integer identifiers:
//! - Allocated sequentially, starting at 1
//! - Never reused within a session, even after destruction
//! - Used directly as the slot in every sparse array

use std::fmt;

/// Unique identifier for an entity.
///
/// Ids are strictly increasing across `create()` calls. Zero is never handed
/// out by the allocator, so it is free to use as a sentinel in user code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Wraps a raw id.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the slot of this id in sparse arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for EntityId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id counter.
#[derive(Debug)]
pub(crate) struct EntityAllocator {
    next: u32,
    first: u32,
}

impl EntityAllocator {
    /// Creates an allocator whose first id is `first`.
    pub(crate) const fn new(first: u32) -> Self {
        Self { next: first, first }
    }

    /// Hands out the next id.
    pub(crate) fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        // Overflow past u32::MAX ids is not supported.
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub(crate) const fn allocated(&self) -> u32 {
        self.next - self.first
    }
}
