//! # Entity System
//!
//! Owns entity identity and liveness, and coordinates deferred destruction
//! across every registered store.
//!
//! ## Lifecycle
//!
//! ```text
//!   create()        destroy()                cleanup()
//!  ─────────► alive ─────────► dead, resident ─────────► purged
//! ```
//!
//! `destroy()` only flips the liveness flag, which is safe while anything is
//! iterating. Physical removal from the dense arrays waits for `cleanup()`,
//! which must run outside any iteration (once per tick).

use super::entity::{EntityAllocator, EntityId};
use super::liveness::LivenessTable;
use super::proxy::EntityProxy;
use super::registry::Components;
use super::store::Store;
use crate::config::EcsConfig;
use crate::error::{EcsError, EcsResult};

/// The entity system - orchestrator for ids, liveness and stores.
///
/// # Example
///
/// ```rust,ignore
/// let components = Components::new().with("position", SparseComponentStore::<i32>::new())?;
/// let mut system = EntitySystem::new(components)?;
///
/// let id = system.create();
/// system.store_mut::<SparseComponentStore<i32>>("position")?.add(id, 5);
/// system.destroy(id);
/// system.cleanup();
/// assert!(!system.is_alive(id));
/// ```
#[derive(Debug)]
pub struct EntitySystem {
    /// Sealed store registry.
    components: Components,
    /// Alive/dead flags, shared with every store.
    living: LivenessTable,
    /// Sequential id source.
    allocator: EntityAllocator,
    /// Destroyed ids awaiting `cleanup()`.
    kill_queue: Vec<EntityId>,
    /// Settings the system was built with.
    config: EcsConfig,
}

impl EntitySystem {
    /// Builds a system over `components` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Configuration`] if `components` is empty.
    pub fn new(components: Components) -> EcsResult<Self> {
        Self::with_config(components, EcsConfig::default())
    }

    /// Builds a system over `components`.
    ///
    /// Every store receives the shared liveness table, and the registry is
    /// sealed against further registration.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Configuration`] if `components` is empty or
    /// `config` is invalid.
    pub fn with_config(mut components: Components, config: EcsConfig) -> EcsResult<Self> {
        config.validate()?;
        if components.is_empty() {
            return Err(EcsError::Configuration(
                "at least one component store must be registered up front".to_string(),
            ));
        }

        let living = LivenessTable::with_capacity(config.capacity_hint);
        components.adopt(&living);

        tracing::debug!(
            "entity system built with {} stores, first id {}",
            components.len(),
            config.first_id
        );

        Ok(Self {
            components,
            living,
            allocator: EntityAllocator::new(config.first_id),
            kill_queue: Vec::new(),
            config,
        })
    }

    /// Allocates the next id and marks it alive.
    pub fn create(&mut self) -> EntityId {
        let id = self.allocator.allocate();
        self.living.mark(id, true);
        tracing::debug!("created entity {}", id);
        id
    }

    /// Marks `id` dead and queues it for purging.
    ///
    /// The id disappears from liveness-filtered iteration immediately; its
    /// data stays resident until the next [`cleanup`](Self::cleanup).
    /// Destroying an id twice queues it twice.
    pub fn destroy(&mut self, id: EntityId) {
        self.living.mark(id, false);
        self.kill_queue.push(id);
        tracing::debug!("destroyed entity {} ({} pending)", id, self.kill_queue.len());
    }

    /// Returns whether `id` was created and not yet destroyed.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.living.is_alive(id)
    }

    /// Removes every queued id from every store, in both reference
    /// directions.
    ///
    /// The queue is drained afterwards unless the system was configured
    /// with `retain_kill_queue`. Calling this with an empty queue does
    /// nothing.
    ///
    /// # Returns
    ///
    /// The number of store entries that were removed.
    pub fn cleanup(&mut self) -> usize {
        if self.kill_queue.is_empty() {
            return 0;
        }

        let removed = self.components.purge(&self.kill_queue);
        tracing::debug!(
            "cleanup purged {} ids ({} store entries)",
            self.kill_queue.len(),
            removed
        );

        if !self.config.retain_kill_queue {
            self.kill_queue.clear();
        }
        removed
    }

    /// Returns a view of `id` scoped to the registered stores.
    pub fn to_proxy(&mut self, id: EntityId) -> EntityProxy<'_> {
        EntityProxy::new(id, &mut self.components)
    }

    /// Read-only access to the registry.
    #[inline]
    #[must_use]
    pub const fn components(&self) -> &Components {
        &self.components
    }

    /// Mutable access to the sealed registry.
    ///
    /// Stores can be mutated through it, but registering or replacing
    /// entries fails with [`EcsError::ProtectedState`].
    #[inline]
    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    /// Typed access to a registered store.
    ///
    /// # Errors
    ///
    /// Fails if `name` is unknown or is not an `S`.
    pub fn store<S: Store>(&self, name: &str) -> EcsResult<&S> {
        self.components.store(name)
    }

    /// Typed mutable access to a registered store.
    ///
    /// # Errors
    ///
    /// Fails if `name` is unknown or is not an `S`.
    pub fn store_mut<S: Store>(&mut self, name: &str) -> EcsResult<&mut S> {
        self.components.store_mut(name)
    }

    /// Ids destroyed but not yet purged, in destruction order.
    #[inline]
    #[must_use]
    pub fn pending_kills(&self) -> &[EntityId] {
        &self.kill_queue
    }

    /// Number of ids currently alive.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.living.alive_count()
    }

    /// Number of ids handed out since construction.
    #[must_use]
    pub const fn created_count(&self) -> u32 {
        self.allocator.allocated()
    }

    /// Handle to the shared liveness table.
    #[must_use]
    pub fn liveness(&self) -> LivenessTable {
        self.living.clone()
    }

    /// Settings the system was built with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &EcsConfig {
        &self.config
    }
}
