//! # STRATA Core
//!
//! Sparse set Entity Component System (ECS) storage kernel:
//! - Generic component stores with O(1) insert/update/remove
//! - 1:1 and 1:many entity reference stores with exclusive ownership
//! - An entity system with deferred, iteration-safe destruction
//!
//! ## Architecture Rules
//!
//! 1. **Dense packing** - Values live in contiguous arrays, repacked by swap-remove
//! 2. **Two-phase destruction** - `destroy()` flips a flag, `cleanup()` moves memory
//! 3. **Single caller** - All mutation is sequential; no internal locking contract
//!
//! ## Example
//!
//! ```rust,ignore
//! use strata_core::{Components, EntitySystem, SparseComponentStore};
//!
//! let components = Components::new().with("position", SparseComponentStore::<i32>::new())?;
//! let mut system = EntitySystem::new(components)?;
//! let id = system.create();
//! system.store_mut::<SparseComponentStore<i32>>("position")?.add(id, 5);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;

pub use config::EcsConfig;
pub use ecs::{
    Components, EntityId, EntityProxy, EntitySystem, IndexedStore, LivenessTable,
    MultiReferenceStore, SingleReferenceStore, SparseComponentStore, Store, StoreKind,
};
pub use error::{EcsError, EcsResult};
