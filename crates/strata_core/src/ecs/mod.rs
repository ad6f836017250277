//! # Entity Component System
//!
//! Sparse set storage plus the entity lifecycle that drives it.
//!
//! ## Design Philosophy
//!
//! - Every store packs its values densely and maps ids to slots in O(1)
//! - Entity ids are plain sequential integers, never reused
//! - Destruction is two-phase: mark dead now, purge at `cleanup()`
//! - Stores read the shared liveness table, only the system writes it

mod entity;
mod liveness;
mod multi_ref;
mod proxy;
mod registry;
mod single_ref;
mod sparse;
mod storage;
mod store;
mod system;

pub use entity::EntityId;
pub use liveness::LivenessTable;
pub use multi_ref::MultiReferenceStore;
pub use proxy::EntityProxy;
pub use registry::Components;
pub use single_ref::SingleReferenceStore;
pub use storage::SparseComponentStore;
pub use store::{IndexedStore, Store, StoreKind};
pub use system::EntitySystem;
