//! # Liveness Table
//!
//! A single alive/dead flag per entity id, owned by the entity system and
//! shared by handle with every store it manages.
//!
//! Stores only read the table (to filter `for_each`/`map`). Writes go
//! through crate-private methods called by [`EntitySystem`]. Every access
//! takes the lock for a single lookup and never holds it across user code.
//!
//! [`EntitySystem`]: crate::ecs::EntitySystem

use std::sync::Arc;

use parking_lot::RwLock;

use super::entity::EntityId;

/// Shared handle to the alive/dead flags.
///
/// Cloning the handle shares the underlying table; it never copies it.
#[derive(Clone, Debug, Default)]
pub struct LivenessTable {
    flags: Arc<RwLock<Vec<bool>>>,
}

impl LivenessTable {
    /// Creates an empty table where nobody is alive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` ids.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            flags: Arc::new(RwLock::new(Vec::with_capacity(capacity))),
        }
    }

    /// Returns whether `id` is currently marked alive.
    ///
    /// Ids that were never marked are reported dead.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.flags.read().get(id.index()).copied().unwrap_or(false)
    }

    /// Number of ids currently marked alive.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.flags.read().iter().filter(|alive| **alive).count()
    }

    /// Returns whether two handles point at the same table.
    #[must_use]
    pub fn shares_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.flags, &other.flags)
    }

    pub(crate) fn mark(&self, id: EntityId, alive: bool) {
        let mut flags = self.flags.write();
        let idx = id.index();
        if idx >= flags.len() {
            if !alive {
                return;
            }
            flags.resize(idx + 1, false);
        }
        flags[idx] = alive;
    }
}
