//! # Single Reference Store
//!
//! 1:1 entity -> entity relations on top of the sparse set.
//!
//! The forward direction (key -> value) is packed like a component store;
//! a reverse array (value -> key) keeps every value owned by at most one key.

use std::any::Any;

use super::entity::EntityId;
use super::liveness::LivenessTable;
use super::sparse::SparseSet;
use super::store::{IndexedStore, Store, StoreKind, Version};

/// Entity -> entity relation with at most one owner per value.
#[derive(Debug, Default)]
pub struct SingleReferenceStore {
    /// Forward links, packed.
    links: SparseSet<EntityId>,
    /// Reverse links, indexed by value id.
    owners: Vec<Option<EntityId>>,
    /// Change counter.
    version: Version,
    /// Shared alive/dead flags.
    living: LivenessTable,
}

impl SingleReferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// Number of keys currently holding a value.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.links.len()
    }

    /// Links `key` to `value`.
    ///
    /// If `value` was owned by another key, that key loses its link. If
    /// `key` pointed at another value, that value loses its owner. Always
    /// bumps the version.
    pub fn add(&mut self, key: EntityId, value: EntityId) {
        self.version.bump();
        self.link(key, value);
    }

    fn link(&mut self, key: EntityId, value: EntityId) {
        if let Some(previous) = self.links.insert(key, value) {
            if previous != value && self.key_of(previous) == Some(key) {
                self.owners[previous.index()] = None;
            }
        }

        if let Some(old_key) = self.key_of(value) {
            if old_key != key {
                self.links.remove(old_key);
            }
        }

        let idx = value.index();
        if idx >= self.owners.len() {
            self.owners.resize(idx + 1, None);
        }
        self.owners[idx] = Some(key);
    }

    /// Same as [`add`](Self::add).
    pub fn set(&mut self, key: EntityId, value: EntityId) {
        self.add(key, value);
    }

    /// Returns the value linked from `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: EntityId) -> Option<EntityId> {
        self.links.get(key).copied()
    }

    /// Returns whether `key` links to a value.
    #[inline]
    #[must_use]
    pub fn has(&self, key: EntityId) -> bool {
        self.links.contains(key)
    }

    /// Returns the key that owns `value`.
    #[inline]
    #[must_use]
    pub fn key_of(&self, value: EntityId) -> Option<EntityId> {
        self.owners.get(value.index()).copied().flatten()
    }

    /// Unlinks `id` as a key, and with `all_refs` also as a value.
    ///
    /// The version moves at most once per call, and only if a link was
    /// actually removed.
    pub fn remove(&mut self, id: EntityId, all_refs: bool) -> bool {
        let mut removed = false;

        if let Some(value) = self.links.remove(id) {
            if self.key_of(value) == Some(id) {
                self.owners[value.index()] = None;
            }
            removed = true;
        }

        if all_refs {
            if let Some(key) = self.key_of(id) {
                self.links.remove(key);
                self.owners[id.index()] = None;
                removed = true;
            }
        }

        if removed {
            self.version.bump();
        }
        removed
    }

    /// Drops every link. Bumps the version even when empty.
    pub fn clear(&mut self) {
        self.links.clear();
        self.owners.clear();
        self.version.bump();
    }

    /// Calls `callback(value, key)` for every link whose key and value are
    /// both alive.
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(EntityId, EntityId),
    {
        for (key, value) in self.links.iter() {
            if self.living.is_alive(key) && self.living.is_alive(*value) {
                callback(*value, key);
            }
        }
    }

    /// Collects `callback(value, key)` over every link whose key and value
    /// are both alive.
    pub fn map<R, F>(&self, mut callback: F) -> Vec<R>
    where
        F: FnMut(EntityId, EntityId) -> R,
    {
        self.links
            .iter()
            .filter(|(key, value)| self.living.is_alive(*key) && self.living.is_alive(**value))
            .map(|(key, value)| callback(*value, key))
            .collect()
    }

    /// Calls `callback(value)` for every linked value that is alive.
    pub fn values<F>(&self, mut callback: F)
    where
        F: FnMut(EntityId),
    {
        for value in self.links.values() {
            if self.living.is_alive(*value) {
                callback(*value);
            }
        }
    }

    /// Relinks every key to `callback(value)`, in storage order, without
    /// consulting liveness.
    ///
    /// Each new link goes through the same eviction as [`add`](Self::add),
    /// so when two keys map onto one value the later key in storage order
    /// keeps it. Bumps the version once if any value changed.
    pub fn update_value<F>(&mut self, mut callback: F)
    where
        F: FnMut(EntityId) -> EntityId,
    {
        let mut changed = false;
        let relinks: Vec<(EntityId, EntityId)> = self
            .links
            .iter()
            .map(|(key, value)| {
                let next = callback(*value);
                changed |= next != *value;
                (key, next)
            })
            .collect();

        if !changed {
            return;
        }
        for (key, value) in relinks {
            self.link(key, value);
        }
        self.version.bump();
    }

    /// Iterates `(key, value)` over every link, ignoring liveness.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, EntityId)> + '_ {
        self.links.iter().map(|(key, value)| (key, *value))
    }
}

impl Store for SingleReferenceStore {
    fn kind(&self) -> StoreKind {
        StoreKind::SingleReference
    }

    fn version(&self) -> u64 {
        self.version.get()
    }

    fn living(&mut self, table: LivenessTable) {
        self.living = table;
    }

    fn has(&self, id: EntityId) -> bool {
        self.links.contains(id)
    }

    fn remove(&mut self, id: EntityId, all_refs: bool) -> bool {
        SingleReferenceStore::remove(self, id, all_refs)
    }

    fn clear(&mut self) {
        SingleReferenceStore::clear(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl IndexedStore for SingleReferenceStore {
    type Input = EntityId;
    type Output = EntityId;

    fn lookup(&self, id: EntityId) -> Option<&EntityId> {
        self.links.get(id)
    }

    fn assign(&mut self, id: EntityId, value: EntityId) {
        self.add(id, value);
    }
}
