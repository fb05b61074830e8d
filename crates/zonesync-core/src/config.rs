//! Configuration types for the zone synchronization system
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

use crate::domain;

/// Main sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Managed parent zone under which subdomains are delegated
    ///
    /// When a deleted domain is a subdomain of this zone, its DS and NS
    /// delegation record sets in the parent zone are removed as part of
    /// the delete cascade. `None` disables the cascade.
    #[serde(default)]
    pub parent_zone: Option<String>,

    /// Capacity of the internal sync event channel
    ///
    /// When full, new sync events will be dropped (with a warning log).
    /// This prevents unbounded memory growth under high update churn.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl SyncConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            parent_zone: None,
            event_channel_capacity: default_event_channel_capacity(),
        }
    }

    /// Set the managed parent zone
    pub fn with_parent_zone(mut self, parent_zone: impl Into<String>) -> Self {
        self.parent_zone = Some(parent_zone.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if let Some(ref parent) = self.parent_zone {
            domain::validate_zone_name(parent)
                .map_err(|e| crate::Error::config(format!("invalid parent zone: {}", e)))?;
        }

        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config("event channel capacity must be > 0"));
        }

        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Domain store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// In-memory store (not persistent)
    #[default]
    Memory,

    /// File-based store
    File {
        /// Path to the catalog file
        path: String,
    },
}

fn default_event_channel_capacity() -> usize {
    1000
}
