//! # Component Storage
//!
//! Sparse set component storage with O(1) insert, update and remove.
//!
//! The storage uses a dense array strategy:
//! - Values are packed contiguously, in insertion order until a removal
//! - Access is O(1) via the entity id's sparse slot
//! - Removal moves the last value into the hole (swap-remove)

use std::any::Any;

use super::entity::EntityId;
use super::liveness::LivenessTable;
use super::sparse::SparseSet;
use super::store::{IndexedStore, Store, StoreKind, Version};

/// Entity -> value storage for a single component kind.
///
/// `for_each`/`map`/`iter_alive` skip entities that are not alive in the
/// shared liveness table. `values`/`update_value`/`iter` visit every resident
/// value, including dead-but-not-yet-purged ones.
///
/// # Example
///
/// ```rust,ignore
/// let mut positions: SparseComponentStore<(f32, f32)> = SparseComponentStore::new();
/// positions.add(EntityId::new(1), (1.0, 2.0));
/// assert_eq!(positions.get(EntityId::new(1)), Some(&(1.0, 2.0)));
/// ```
#[derive(Debug)]
pub struct SparseComponentStore<T> {
    /// Packed values and id mappings.
    entries: SparseSet<T>,
    /// Change counter.
    version: Version,
    /// Shared alive/dead flags.
    living: LivenessTable,
}

impl<T> Default for SparseComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseComponentStore<T> {
    /// Creates an empty store.
    ///
    /// Until [`living`](Self::living) is called the store filters against its
    /// own empty table, so liveness-filtered iteration yields nothing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SparseSet::new(),
            version: Version::default(),
            living: LivenessTable::new(),
        }
    }

    /// Returns the change counter.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version.get()
    }

    /// Installs the shared liveness table.
    pub fn living(&mut self, table: LivenessTable) {
        self.living = table;
    }

    /// Number of resident values, dead or alive.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no value is resident.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores `value` for `id`.
    ///
    /// An existing slot is overwritten in place; otherwise the value is
    /// appended to the dense array. Always bumps the version.
    pub fn add(&mut self, id: EntityId, value: T) {
        self.version.bump();
        self.entries.insert(id, value);
    }

    /// Overwrites the value of an id that already has one.
    ///
    /// # Returns
    ///
    /// `true` if the value was written, `false` if `id` had no slot. The
    /// version only moves when data changed.
    pub fn set(&mut self, id: EntityId, value: T) -> bool {
        match self.entries.get_mut(id) {
            Some(slot) => {
                *slot = value;
                self.version.bump();
                true
            }
            None => false,
        }
    }

    /// Gets the value stored for `id`.
    #[inline]
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entries.get(id)
    }

    /// Returns whether `id` has a resident value.
    #[inline]
    #[must_use]
    pub fn has(&self, id: EntityId) -> bool {
        self.entries.contains(id)
    }

    /// Removes the value of `id`, moving the last dense value into its slot.
    ///
    /// # Returns
    ///
    /// The removed value. Absent ids return `None` and leave the version
    /// untouched.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let value = self.entries.remove(id)?;
        self.version.bump();
        Some(value)
    }

    /// Drops every value and mapping. Bumps the version even when empty.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.version.bump();
    }

    /// Calls `callback(value, id)` for every value whose owner is alive, in
    /// storage order.
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&T, EntityId),
    {
        for (id, value) in self.entries.iter() {
            if self.living.is_alive(id) {
                callback(value, id);
            }
        }
    }

    /// Collects `callback(value, id)` over every value whose owner is alive.
    pub fn map<R, F>(&self, mut callback: F) -> Vec<R>
    where
        F: FnMut(&T, EntityId) -> R,
    {
        self.entries
            .iter()
            .filter(|(id, _)| self.living.is_alive(*id))
            .map(|(id, value)| callback(value, id))
            .collect()
    }

    /// Calls `callback` on every resident value, without consulting
    /// liveness.
    pub fn values<F>(&self, callback: F)
    where
        F: FnMut(&T),
    {
        self.entries.values().iter().for_each(callback);
    }

    /// Replaces every resident value with `callback(value)`, in storage
    /// order, without consulting liveness.
    ///
    /// Does not bump the version.
    pub fn update_value<F>(&mut self, mut callback: F)
    where
        F: FnMut(&T) -> T,
    {
        for slot in self.entries.values_mut() {
            *slot = callback(&*slot);
        }
    }

    /// Iterates `(id, value)` over every resident value.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entries.iter()
    }

    /// Iterates `(id, value)` over values whose owner is alive.
    ///
    /// Liveness is read per entry, so entities created or destroyed while
    /// the iterator is live are seen as of the moment they are reached.
    pub fn iter_alive(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.entries
            .iter()
            .filter(move |(id, _)| self.living.is_alive(*id))
    }
}

impl<T: Send + Sync + 'static> Store for SparseComponentStore<T> {
    fn kind(&self) -> StoreKind {
        StoreKind::Component
    }

    fn version(&self) -> u64 {
        self.version.get()
    }

    fn living(&mut self, table: LivenessTable) {
        self.living = table;
    }

    fn has(&self, id: EntityId) -> bool {
        self.entries.contains(id)
    }

    fn remove(&mut self, id: EntityId, _all_refs: bool) -> bool {
        SparseComponentStore::remove(self, id).is_some()
    }

    fn clear(&mut self) {
        SparseComponentStore::clear(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: Send + Sync + 'static> IndexedStore for SparseComponentStore<T> {
    type Input = T;
    type Output = T;

    fn lookup(&self, id: EntityId) -> Option<&T> {
        self.get(id)
    }

    fn assign(&mut self, id: EntityId, value: T) {
        self.add(id, value);
    }
}
