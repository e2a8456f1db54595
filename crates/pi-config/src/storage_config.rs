use crate::{ConfigError, ConfigErrorResult, DEFAULT_IDENTITY_KEY, DEFAULT_STORAGE_DIR};

use std::path::Path;

use serde::Deserialize;

/// Where the device identity is persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the identity file, relative to the config dir
    pub dir: String,
    /// Key under which the player id is stored
    pub identity_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: String::from(DEFAULT_STORAGE_DIR),
            identity_key: String::from(DEFAULT_IDENTITY_KEY),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if Path::new(&self.dir).is_absolute() || self.dir.contains("..") {
            return Err(ConfigError::storage(
                "storage.dir must be relative and cannot contain '..'",
            ));
        }

        if self.identity_key.trim().is_empty() {
            return Err(ConfigError::storage("storage.identity_key cannot be empty"));
        }

        Ok(())
    }
}
