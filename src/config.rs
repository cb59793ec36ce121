//! RECSTORE - Store Configuration
//! Defines tunable parameters for the in-memory record store.

use crate::error::{Result, StoreError};

/// Per-call parameters for write operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WritePolicy {
    /// Expiration marker in seconds written by `touch`. 0 means none set.
    pub expiration: u32,
}

impl WritePolicy {
    /// Create a write policy with the given expiration.
    pub fn with_expiration(expiration: u32) -> Self {
        Self { expiration }
    }
}

/// Configuration for the record store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Policy used by `touch` when the caller passes none.
    pub default_write_policy: WritePolicy,

    /// Capacity hint for the record map.
    pub initial_capacity: usize,

    /// Number of shards in the concurrent map. Must be a power of two greater than 1.
    pub shard_amount: usize,

    /// Whether operations update the metrics counters.
    pub track_metrics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_write_policy: WritePolicy::default(),
            initial_capacity: 0,
            shard_amount: 64,
            track_metrics: true,
        }
    }
}

impl Config {
    /// Set the policy `touch` falls back to.
    pub fn with_default_write_policy(mut self, policy: WritePolicy) -> Self {
        self.default_write_policy = policy;
        self
    }

    /// Set the initial capacity hint.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the number of map shards.
    pub fn with_shard_amount(mut self, shards: usize) -> Self {
        self.shard_amount = shards;
        self
    }

    /// Enable or disable metrics collection.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Check the configuration before the map is built.
    pub fn validate(&self) -> Result<()> {
        if self.shard_amount <= 1 || !self.shard_amount.is_power_of_two() {
            return Err(StoreError::Config(format!(
                "shard_amount must be a power of two greater than 1, got {}",
                self.shard_amount
            )));
        }
        Ok(())
    }
}
