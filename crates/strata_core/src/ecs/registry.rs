//! # Component Registry
//!
//! Named, heterogeneous collection of stores.
//!
//! The registry is filled before the entity system is built. Once the system
//! owns it, the registry is sealed: stores can still be mutated through
//! typed handles, but entries can no longer be added or swapped out.

use std::collections::BTreeMap;

use super::entity::EntityId;
use super::liveness::LivenessTable;
use super::store::Store;
use crate::error::{EcsError, EcsResult};

/// Store registry keyed by component name.
///
/// # Example
///
/// ```rust,ignore
/// let components = Components::new()
///     .with("position", SparseComponentStore::<(f32, f32)>::new())?
///     .with("parent", SingleReferenceStore::new())?;
/// let system = EntitySystem::new(components)?;
/// ```
#[derive(Default)]
pub struct Components {
    /// Stores by name, in name order.
    stores: BTreeMap<String, Box<dyn Store>>,
    /// Set once an entity system owns the registry.
    sealed: bool,
}

impl Components {
    /// Creates an empty, unsealed registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `store` under `name`.
    ///
    /// # Errors
    ///
    /// - [`EcsError::ProtectedState`] if the registry is sealed
    /// - [`EcsError::Configuration`] if `name` is already taken
    pub fn register<S: Store>(&mut self, name: impl Into<String>, store: S) -> EcsResult<()> {
        let name = name.into();
        if self.sealed {
            tracing::warn!("rejected registration of `{}` on a sealed registry", name);
            return Err(EcsError::ProtectedState(format!(
                "cannot register component `{name}` after the entity system was built"
            )));
        }
        if self.stores.contains_key(&name) {
            return Err(EcsError::Configuration(format!(
                "component `{name}` is registered twice"
            )));
        }
        self.stores.insert(name, Box::new(store));
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn with<S: Store>(mut self, name: impl Into<String>, store: S) -> EcsResult<Self> {
        self.register(name, store)?;
        Ok(self)
    }

    /// Swaps the store registered under `name`, returning the old one.
    ///
    /// # Errors
    ///
    /// - [`EcsError::ProtectedState`] if the registry is sealed
    /// - [`EcsError::UnknownComponent`] if nothing is registered as `name`
    pub fn replace<S: Store>(&mut self, name: &str, store: S) -> EcsResult<Box<dyn Store>> {
        if self.sealed {
            tracing::warn!("rejected replacement of `{}` on a sealed registry", name);
            return Err(EcsError::ProtectedState(format!(
                "cannot set component `{name}` directly"
            )));
        }
        let slot = self
            .stores
            .get_mut(name)
            .ok_or_else(|| EcsError::UnknownComponent(name.to_string()))?;
        Ok(std::mem::replace(slot, Box::new(store)))
    }

    /// Number of registered stores.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Returns `true` if no store is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Returns whether the registry is owned by an entity system.
    #[inline]
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Returns whether a store is registered as `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }

    /// Registered names, in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    /// Untyped access to a store.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&(dyn Store + 'static)> {
        self.stores.get(name).map(|store| &**store)
    }

    /// Untyped mutable access to a store.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Store + 'static)> {
        self.stores.get_mut(name).map(|store| &mut **store)
    }

    /// Typed access to a store.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnknownComponent`] if nothing is registered as `name`
    /// - [`EcsError::ComponentTypeMismatch`] if the store is not an `S`
    pub fn store<S: Store>(&self, name: &str) -> EcsResult<&S> {
        let store = self
            .stores
            .get(name)
            .ok_or_else(|| EcsError::UnknownComponent(name.to_string()))?;
        store.as_any().downcast_ref::<S>().ok_or_else(|| {
            tracing::warn!("component `{}` looked up with the wrong store type", name);
            EcsError::ComponentTypeMismatch(name.to_string())
        })
    }

    /// Typed mutable access to a store.
    ///
    /// # Errors
    ///
    /// Same as [`store`](Self::store).
    pub fn store_mut<S: Store>(&mut self, name: &str) -> EcsResult<&mut S> {
        let store = self
            .stores
            .get_mut(name)
            .ok_or_else(|| EcsError::UnknownComponent(name.to_string()))?;
        store.as_any_mut().downcast_mut::<S>().ok_or_else(|| {
            tracing::warn!("component `{}` looked up with the wrong store type", name);
            EcsError::ComponentTypeMismatch(name.to_string())
        })
    }

    /// Installs `table` in every store and seals the registry.
    pub(crate) fn adopt(&mut self, table: &LivenessTable) {
        for store in self.stores.values_mut() {
            store.living(table.clone());
        }
        self.sealed = true;
    }

    /// Removes `id` from every store, in both reference directions.
    pub(crate) fn purge(&mut self, ids: &[EntityId]) -> usize {
        let mut removed = 0;
        for (name, store) in &mut self.stores {
            for &id in ids {
                if store.remove(id, true) {
                    tracing::trace!("purged {} from `{}`", id, name);
                    removed += 1;
                }
            }
        }
        removed
    }
}

impl std::fmt::Debug for Components {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, store) in &self.stores {
            map.entry(name, &store.kind());
        }
        map.finish()
    }
}
