//! # ECS Error Types
//!
//! All errors that can be raised by the entity system and its stores.
//!
//! Missing ids are never errors: lookups return `None` and removals of
//! absent ids leave the store untouched.

use thiserror::Error;

/// Errors that can occur in the entity system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity system was built without any component store, or the
    /// supplied configuration is invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Attempted to write into the sealed component registry.
    #[error("protected state: {0}")]
    ProtectedState(String),

    /// The store kind cannot answer this operation.
    #[error("operation `{operation}` is not supported by {store} stores")]
    UnsupportedOperation {
        /// Kind of the store that rejected the call.
        store: &'static str,
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// No store is registered under the requested name.
    #[error("no component store registered as `{0}`")]
    UnknownComponent(String),

    /// A store exists under the name but has a different concrete type.
    #[error("component store `{0}` is not of the requested type")]
    ComponentTypeMismatch(String),
}

/// Result type for entity system operations.
pub type EcsResult<T> = Result<T, EcsError>;
