//! # Entity System Configuration
//!
//! Settings are plain data, loaded once at startup from TOML:
//!
//! ```toml
//! first_id = 1
//! capacity_hint = 10000
//! retain_kill_queue = false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EcsError, EcsResult};

/// Tunables for an [`EntitySystem`](crate::ecs::EntitySystem).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EcsConfig {
    /// First id handed out by `create()`. Must be at least 1.
    pub first_id: u32,
    /// Number of entity ids to reserve room for in the liveness table.
    pub capacity_hint: usize,
    /// Keep destroyed ids queued after `cleanup()`, so every later cleanup
    /// replays them.
    pub retain_kill_queue: bool,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            first_id: 1,
            capacity_hint: 0,
            retain_kill_queue: false,
        }
    }
}

impl EcsConfig {
    /// Parses and validates a TOML document.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Configuration`] if the document does not parse or
    /// fails validation.
    pub fn from_toml_str(source: &str) -> EcsResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| EcsError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Configuration`] if serialization fails.
    pub fn to_toml_string(&self) -> EcsResult<String> {
        toml::to_string(self).map_err(|e| EcsError::Configuration(e.to_string()))
    }

    /// Checks the invariants the entity system relies on.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Configuration`] if `first_id` is zero.
    pub fn validate(&self) -> EcsResult<()> {
        if self.first_id == 0 {
            return Err(EcsError::Configuration(
                "first_id must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the first id.
    #[must_use]
    pub const fn with_first_id(mut self, first_id: u32) -> Self {
        self.first_id = first_id;
        self
    }

    /// Sets the liveness table reservation.
    #[must_use]
    pub const fn with_capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.capacity_hint = capacity_hint;
        self
    }

    /// Keeps destroyed ids queued across cleanups.
    #[must_use]
    pub const fn with_retained_kill_queue(mut self, retain: bool) -> Self {
        self.retain_kill_queue = retain;
        self
    }
}
