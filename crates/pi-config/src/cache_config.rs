use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_REFRESH_INTERVAL_SECS, MAX_REFRESH_INTERVAL_SECS,
    MIN_REFRESH_INTERVAL_SECS,
};

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Background re-fetch period while the owning scope is foregrounded
    pub refresh_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.refresh_interval_secs < MIN_REFRESH_INTERVAL_SECS
            || self.refresh_interval_secs > MAX_REFRESH_INTERVAL_SECS
        {
            return Err(ConfigError::config(format!(
                "cache.refresh_interval_secs must be {}-{}, got {}",
                MIN_REFRESH_INTERVAL_SECS, MAX_REFRESH_INTERVAL_SECS, self.refresh_interval_secs
            )));
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}
