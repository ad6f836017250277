//! # Entity Proxy
//!
//! A per-entity view over the registry: the id is fixed, the component is
//! picked by name.

use super::entity::EntityId;
use super::registry::Components;
use super::store::IndexedStore;
use crate::error::{EcsError, EcsResult};

/// Lightweight view of one entity's components.
///
/// # Example
///
/// ```rust,ignore
/// let mut proxy = system.to_proxy(id);
/// proxy.set::<SparseComponentStore<i32>>("health", 100)?;
/// assert_eq!(proxy.get::<SparseComponentStore<i32>>("health")?, Some(&100));
/// ```
pub struct EntityProxy<'a> {
    id: EntityId,
    components: &'a mut Components,
}

impl<'a> EntityProxy<'a> {
    pub(crate) fn new(id: EntityId, components: &'a mut Components) -> Self {
        Self { id, components }
    }

    /// The entity this proxy is scoped to.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns whether the store named `name` holds data for this entity.
    ///
    /// A misspelled or unregistered name is an error rather than `false`,
    /// so callers can tell "no data" apart from "no such store".
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownComponent`] if nothing is registered as `name`.
    pub fn has(&self, name: &str) -> EcsResult<bool> {
        self.components
            .get(name)
            .map(|store| store.has(self.id))
            .ok_or_else(|| EcsError::UnknownComponent(name.to_string()))
    }

    /// Reads this entity's entry in the store named `name`.
    ///
    /// # Errors
    ///
    /// Fails if `name` is unknown or is not an `S`.
    pub fn get<S: IndexedStore>(&self, name: &str) -> EcsResult<Option<&S::Output>> {
        Ok(self.components.store::<S>(name)?.lookup(self.id))
    }

    /// Writes this entity's entry in the store named `name`.
    ///
    /// # Errors
    ///
    /// Fails if `name` is unknown or is not an `S`.
    pub fn set<S: IndexedStore>(&mut self, name: &str, value: S::Input) -> EcsResult<()> {
        self.components.store_mut::<S>(name)?.assign(self.id, value);
        Ok(())
    }
}

impl std::fmt::Debug for EntityProxy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityProxy").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{SingleReferenceStore, SparseComponentStore};

    #[test]
    fn test_proxy_reads_and_writes() {
        let mut components = Components::new()
            .with("health", SparseComponentStore::<u32>::new())
            .and_then(|c| c.with("target", SingleReferenceStore::new()))
            .unwrap();

        let id = EntityId::new(3);
        let mut proxy = EntityProxy::new(id, &mut components);
        assert_eq!(proxy.id(), id);
        assert_eq!(proxy.has("health"), Ok(false));

        proxy.set::<SparseComponentStore<u32>>("health", 40).unwrap();
        proxy.set::<SingleReferenceStore>("target", EntityId::new(9)).unwrap();

        assert_eq!(proxy.has("health"), Ok(true));
        assert_eq!(proxy.get::<SparseComponentStore<u32>>("health"), Ok(Some(&40)));
        assert_eq!(
            proxy.get::<SingleReferenceStore>("target"),
            Ok(Some(&EntityId::new(9)))
        );
        assert_eq!(
            proxy.has("mana"),
            Err(EcsError::UnknownComponent("mana".to_string()))
        );
        assert_eq!(
            proxy.set::<SparseComponentStore<i64>>("health", 1),
            Err(EcsError::ComponentTypeMismatch("health".to_string()))
        );
    }

    #[test]
    fn test_has_separates_missing_data_from_missing_store() {
        let mut components = Components::new()
            .with("health", SparseComponentStore::<u32>::new())
            .unwrap();
        let proxy = EntityProxy::new(EntityId::new(1), &mut components);

        assert_eq!(proxy.has("health"), Ok(false));
        assert_eq!(
            proxy.has("helth"),
            Err(EcsError::UnknownComponent("helth".to_string()))
        );
    }
}
