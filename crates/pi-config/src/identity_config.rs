use crate::{ConfigError, ConfigErrorResult, DEFAULT_SENTINEL_ID, DEFAULT_USERNAME_PREFIX};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Session-only identity used when local storage is unusable
    pub sentinel_id: i64,
    /// Prefix of generated usernames
    pub username_prefix: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            sentinel_id: DEFAULT_SENTINEL_ID,
            username_prefix: String::from(DEFAULT_USERNAME_PREFIX),
        }
    }
}

impl IdentityConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.username_prefix.trim().is_empty() {
            return Err(ConfigError::identity(
                "identity.username_prefix cannot be empty",
            ));
        }

        Ok(())
    }
}
