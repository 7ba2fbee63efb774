//! Session lifetime configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
pub use crate::domain::interview::UnknownSessionPolicy;

/// Longest accepted session expiry, one hundred years.
pub const MAX_EXPIRY_HOURS: u64 = 100 * 365 * 24;

/// Session store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Sessions idle for longer than this are evicted
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: u64,

    /// How often the eviction sweep runs
    #[serde(default = "default_eviction_interval")]
    pub eviction_interval_secs: u64,

    #[serde(default)]
    pub unknown_session: UnknownSessionPolicy,
}

impl SessionConfig {
    pub fn eviction_interval(&self) -> Duration {
        Duration::from_secs(self.eviction_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.expiry_hours == 0 || self.expiry_hours > MAX_EXPIRY_HOURS {
            return Err(ValidationError::InvalidSessionExpiry);
        }
        if self.eviction_interval_secs == 0 {
            return Err(ValidationError::InvalidEvictionInterval);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_hours: default_expiry_hours(),
            eviction_interval_secs: default_eviction_interval(),
            unknown_session: UnknownSessionPolicy::default(),
        }
    }
}

fn default_expiry_hours() -> u64 {
    24
}

fn default_eviction_interval() -> u64 {
    300
}
