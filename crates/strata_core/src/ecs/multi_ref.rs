//! # Multi Reference Store
//!
//! 1:many entity -> {entity} relations. A key may own many values, but each
//! value belongs to at most one key's group at a time.
//!
//! Aggregate operations (`size`, `map`, `values`, `update_value`) have no
//! single meaning for this shape and are rejected with
//! [`EcsError::UnsupportedOperation`].

use std::any::Any;
use std::collections::BTreeSet;

use super::entity::EntityId;
use super::liveness::LivenessTable;
use super::sparse::SparseSet;
use super::store::{IndexedStore, Store, StoreKind, Version};
use crate::error::{EcsError, EcsResult};

/// Entity -> set of entities, with exclusive value ownership.
///
/// Groups that lose their last member are dropped, so `has(key)` is `true`
/// only while the key owns at least one value.
#[derive(Debug, Default)]
pub struct MultiReferenceStore {
    /// Groups of values, packed by key.
    groups: SparseSet<BTreeSet<EntityId>>,
    /// Reverse links, indexed by value id.
    owners: Vec<Option<EntityId>>,
    /// Change counter.
    version: Version,
    /// Shared alive/dead flags.
    living: LivenessTable,
}

impl MultiReferenceStore {
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

    /// Adds `value` to the group of `key`, taking it away from any other
    /// key's group. Always bumps the version.
    pub fn add(&mut self, key: EntityId, value: EntityId) {
        self.version.bump();

        if let Some(old_key) = self.owner_of(value) {
            if old_key != key {
                self.detach(old_key, value);
            }
        }

        match self.groups.get_mut(key) {
            Some(members) => {
                members.insert(value);
            }
            None => {
                self.groups.insert(key, BTreeSet::from([value]));
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

    /// Returns the group owned by `key`.
    ///
    /// The set is a read-only view of live state, ordered by ascending id
    /// rather than by insertion.
    #[inline]
    #[must_use]
    pub fn get(&self, key: EntityId) -> Option<&BTreeSet<EntityId>> {
        self.groups.get(key)
    }

    /// Returns whether `key` owns at least one value.
    #[inline]
    #[must_use]
    pub fn has(&self, key: EntityId) -> bool {
        self.groups.contains(key)
    }

    /// Returns the key whose group contains `value`.
    #[inline]
    #[must_use]
    pub fn owner_of(&self, value: EntityId) -> Option<EntityId> {
        self.owners.get(value.index()).copied().flatten()
    }

    /// Drops the group of `id`, and with `all_refs` also removes `id` from
    /// the group that contains it.
    ///
    /// The version moves at most once per call, and only if something was
    /// actually removed.
    pub fn remove(&mut self, id: EntityId, all_refs: bool) -> bool {
        let mut removed = false;

        if let Some(members) = self.groups.remove(id) {
            for member in members {
                self.owners[member.index()] = None;
            }
            removed = true;
        }

        if all_refs {
            if let Some(key) = self.owner_of(id) {
                self.detach(key, id);
                removed = true;
            }
        }

        if removed {
            self.version.bump();
        }
        removed
    }

    /// Drops every group. Bumps the version even when empty.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.owners.clear();
        self.version.bump();
    }

    /// Calls `callback(value, key)` for every member of every group whose
    /// key is alive. Members are not filtered on their own liveness.
    ///
    /// Groups are visited in storage order; members within a group in
    /// ascending id order, not the order they were added.
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(EntityId, EntityId),
    {
        for (key, members) in self.groups.iter() {
            if !self.living.is_alive(key) {
                continue;
            }
            for member in members {
                callback(*member, key);
            }
        }
    }

    /// Always fails: the total cardinality of a grouped relation is
    /// ambiguous.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnsupportedOperation`].
    pub fn size(&self) -> EcsResult<usize> {
        Err(Self::unsupported("size"))
    }

    /// Always fails; use [`for_each`](Self::for_each) instead.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnsupportedOperation`].
    pub fn map<R, F>(&self, _callback: F) -> EcsResult<Vec<R>>
    where
        F: FnMut(EntityId, EntityId) -> R,
    {
        Err(Self::unsupported("map"))
    }

    /// Always fails; use [`get`](Self::get) instead.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnsupportedOperation`].
    pub fn values<F>(&self, _callback: F) -> EcsResult<()>
    where
        F: FnMut(EntityId),
    {
        Err(Self::unsupported("values"))
    }

    /// Always fails; use [`set`](Self::set) instead.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnsupportedOperation`].
    pub fn update_value<F>(&mut self, _callback: F) -> EcsResult<()>
    where
        F: FnMut(EntityId) -> EntityId,
    {
        Err(Self::unsupported("update_value"))
    }

    /// Removes `value` from the group of `key`, dropping the group if it
    /// becomes empty.
    fn detach(&mut self, key: EntityId, value: EntityId) {
        let emptied = match self.groups.get_mut(key) {
            Some(members) => {
                members.remove(&value);
                members.is_empty()
            }
            None => false,
        };
        if emptied {
            self.groups.remove(key);
        }
        self.owners[value.index()] = None;
    }

    fn unsupported(operation: &'static str) -> EcsError {
        tracing::warn!("{} called on a multi-reference store", operation);
        EcsError::UnsupportedOperation {
            store: StoreKind::MultiReference.name(),
            operation,
        }
    }
}

impl Store for MultiReferenceStore {
    fn kind(&self) -> StoreKind {
        StoreKind::MultiReference
    }

    fn version(&self) -> u64 {
        self.version.get()
    }

    fn living(&mut self, table: LivenessTable) {
        self.living = table;
    }

    fn has(&self, id: EntityId) -> bool {
        self.groups.contains(id)
    }

    fn remove(&mut self, id: EntityId, all_refs: bool) -> bool {
        MultiReferenceStore::remove(self, id, all_refs)
    }

    fn clear(&mut self) {
        MultiReferenceStore::clear(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl IndexedStore for MultiReferenceStore {
    type Input = EntityId;
    type Output = BTreeSet<EntityId>;

    fn lookup(&self, id: EntityId) -> Option<&BTreeSet<EntityId>> {
        self.groups.get(id)
    }

    fn assign(&mut self, id: EntityId, value: EntityId) {
        self.add(id, value);
    }
}
