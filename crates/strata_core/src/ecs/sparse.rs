//! # Sparse Set
//!
//! The indexing core shared by every store:
//! - `sparse[id]` maps an entity id to a dense slot (or `None`)
//! - `dense` holds the values, packed contiguously
//! - `owners[i]` is the id that owns `dense[i]`
//!
//! Invariant: for every id with `sparse[id] == Some(i)`, `owners[i] == id`.
//! Removal moves the last dense element into the vacated slot, so dense
//! order is storage order, not id order.

use super::entity::EntityId;

/// Sparse id -> dense slot mapping with packed values.
#[derive(Debug, Clone)]
pub(crate) struct SparseSet<V> {
    sparse: Vec<Option<u32>>,
    dense: Vec<V>,
    owners: Vec<EntityId>,
}

impl<V> Default for SparseSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SparseSet<V> {
    pub(crate) const fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            owners: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.dense.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    #[inline]
    pub(crate) fn slot(&self, id: EntityId) -> Option<usize> {
        self.sparse
            .get(id.index())
            .copied()
            .flatten()
            .map(|slot| slot as usize)
    }

    #[inline]
    pub(crate) fn contains(&self, id: EntityId) -> bool {
        self.slot(id).is_some()
    }

    #[inline]
    pub(crate) fn get(&self, id: EntityId) -> Option<&V> {
        self.slot(id).map(|slot| &self.dense[slot])
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut V> {
        let slot = self.slot(id)?;
        Some(&mut self.dense[slot])
    }

    /// Stores `value` for `id`, overwriting in place if the id already has a
    /// slot. Returns the previous value, if any.
    pub(crate) fn insert(&mut self, id: EntityId, value: V) -> Option<V> {
        if let Some(slot) = self.slot(id) {
            return Some(std::mem::replace(&mut self.dense[slot], value));
        }

        let idx = id.index();
        if idx >= self.sparse.len() {
            self.sparse.resize(idx + 1, None);
        }
        // Dense slots never exceed the id space, which is u32.
        #[allow(clippy::cast_possible_truncation)]
        let slot = self.dense.len() as u32;
        self.sparse[idx] = Some(slot);
        self.dense.push(value);
        self.owners.push(id);
        None
    }

    /// Swap-removes the value owned by `id`.
    pub(crate) fn remove(&mut self, id: EntityId) -> Option<V> {
        let slot = self.slot(id)?;
        let last = self.dense.len() - 1;

        if slot != last {
            let moved = self.owners[last];
            self.sparse[moved.index()] = self.sparse[id.index()];
        }

        let value = self.dense.swap_remove(slot);
        self.owners.swap_remove(slot);
        self.sparse[id.index()] = None;
        Some(value)
    }

    pub(crate) fn clear(&mut self) {
        self.sparse.clear();
        self.dense.clear();
        self.owners.clear();
    }

    /// Iterates `(owner, value)` pairs in storage order.
    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (EntityId, &V)> {
        self.owners.iter().copied().zip(self.dense.iter())
    }

    #[inline]
    pub(crate) fn values(&self) -> &[V] {
        &self.dense
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut [V] {
        &mut self.dense
    }
}
