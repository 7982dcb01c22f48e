//! Vote lock settings.

use dblapi_error::{ConfigError, DblResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

const MAX_TIMEOUT_SECS: u64 = 365 * 24 * 60 * 60;

/// Configuration for vote lock tracking.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct VoteLockConfig {
    /// Whether votes are tracked at all
    #[serde(default)]
    on: bool,

    /// How long a vote keeps its voter locked (seconds)
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// How often expired entries are pruned (seconds)
    #[serde(default = "default_sweep_interval_secs")]
    sweep_interval_secs: u64,
}

fn default_timeout_secs() -> u64 {
    12 * 60 * 60 // the directory's vote cooldown
}

fn default_sweep_interval_secs() -> u64 {
    300 // 5 minutes
}

impl Default for VoteLockConfig {
    fn default() -> Self {
        Self {
            on: false,
            timeout_secs: default_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl VoteLockConfig {
    /// Creates a new config builder.
    pub fn builder() -> VoteLockConfigBuilder {
        VoteLockConfigBuilder::default()
    }

    /// Enabled config with default timings.
    pub fn enabled() -> Self {
        Self::default().with_on(true)
    }

    /// Lock duration as a chrono duration.
    pub fn lock_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.timeout_secs.min(MAX_TIMEOUT_SECS) as i64)
    }

    /// Sweep interval as a std duration.
    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_secs)
    }

    /// Rejects zero or out-of-range timings.
    #[track_caller]
    pub fn validate(&self) -> DblResult<()> {
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::new(format!(
                "Vote lock timeout must be between 1 and {} seconds, got {}",
                MAX_TIMEOUT_SECS, self.timeout_secs
            ))
            .into());
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::new("Vote lock sweep interval must be positive").into());
        }
        Ok(())
    }
}
