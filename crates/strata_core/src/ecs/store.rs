//! # Store Contract
//!
//! The object-safe surface every store exposes to the entity system, plus
//! the version counter they share.

use std::any::Any;

use super::entity::EntityId;
use super::liveness::LivenessTable;

/// Shape of a registered store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// Entity -> arbitrary value.
    Component,
    /// Entity -> entity, at most one owner per value.
    SingleReference,
    /// Entity -> set of entities, at most one owner per value.
    MultiReference,
}

impl StoreKind {
    /// Human-readable name used in errors and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::SingleReference => "single-reference",
            Self::MultiReference => "multi-reference",
        }
    }
}

/// Operations the entity system needs from every store it manages.
///
/// All methods are synchronous and run to completion. Removing or querying
/// an absent id is a no-op, never an error.
pub trait Store: Any + Send + Sync {
    /// Shape of this store.
    fn kind(&self) -> StoreKind;

    /// Change counter, bumped once per observable mutation.
    fn version(&self) -> u64;

    /// Installs the shared liveness table used to filter iteration.
    fn living(&mut self, table: LivenessTable);

    /// Returns whether `id` currently holds data in this store.
    fn has(&self, id: EntityId) -> bool;

    /// Removes `id` as a key. With `all_refs`, also unlinks it where it is
    /// referenced as a value. Returns whether anything was removed.
    fn remove(&mut self, id: EntityId, all_refs: bool) -> bool;

    /// Drops every entry. Always bumps the version.
    fn clear(&mut self);

    /// Upcast for typed lookups.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed lookups.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Indexed get/set sugar: `store[id]` reads like `get`, `store[id] = v`
/// writes like `add`.
pub trait IndexedStore: Store {
    /// Value accepted by [`IndexedStore::assign`].
    type Input;
    /// Value returned by [`IndexedStore::lookup`].
    type Output: ?Sized;

    /// Reads the entry for `id`.
    fn lookup(&self, id: EntityId) -> Option<&Self::Output>;

    /// Writes the entry for `id`, inserting it if absent.
    fn assign(&mut self, id: EntityId, value: Self::Input);
}

/// Monotonic change counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Version(u64);

impl Version {
    #[inline]
    pub(crate) const fn get(self) -> u64 {
        self.0
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}
