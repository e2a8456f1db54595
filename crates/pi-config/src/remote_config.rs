use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BASE_URL, DEFAULT_DATABASE_FILENAME,
    DEFAULT_REMOTE_TIMEOUT_SECS, DEFAULT_TABLE, MAX_REMOTE_TIMEOUT_SECS, MIN_REMOTE_TIMEOUT_SECS,
};

use std::fmt;
use std::path::Path;
use std::time::Duration;
use std::str::FromStr;

use serde::Deserialize;

/// Which remote directory implementation backs the player records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteBackend {
    /// REST table API
    Http,
    /// Local SQLite file (development)
    #[default]
    Sqlite,
}

impl RemoteBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Sqlite => "sqlite",
        }
    }
}

impl FromStr for RemoteBackend {
    type Err = ConfigError;

    #[track_caller]
    fn from_str(s: &str) -> ConfigErrorResult<Self> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(ConfigError::remote(format!(
                "remote.backend must be 'http' or 'sqlite', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for RemoteBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub backend: RemoteBackend,
    /// Base URL of the REST table API (http backend)
    pub base_url: String,
    /// Sent as `apikey` and bearer token when present
    pub api_key: Option<String>,
    /// Table holding player rows (http backend; the sqlite schema is fixed)
    pub table: String,
    /// SQLite file, relative to the config dir (sqlite backend)
    pub database_path: String,
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            backend: RemoteBackend::default(),
            base_url: String::from(DEFAULT_BASE_URL),
            api_key: None,
            table: String::from(DEFAULT_TABLE),
            database_path: String::from(DEFAULT_DATABASE_FILENAME),
            timeout_secs: DEFAULT_REMOTE_TIMEOUT_SECS,
        }
    }
}

impl RemoteConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.timeout_secs < MIN_REMOTE_TIMEOUT_SECS || self.timeout_secs > MAX_REMOTE_TIMEOUT_SECS
        {
            return Err(ConfigError::remote(format!(
                "remote.timeout_secs must be {}-{}, got {}",
                MIN_REMOTE_TIMEOUT_SECS, MAX_REMOTE_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if self.table.trim().is_empty()
            || !self
                .table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::remote(format!(
                "remote.table must be a plain identifier, got '{}'",
                self.table
            )));
        }

        match self.backend {
            RemoteBackend::Http => {
                if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
                {
                    return Err(ConfigError::remote(format!(
                        "remote.base_url must start with http:// or https://, got '{}'",
                        self.base_url
                    )));
                }
            }
            RemoteBackend::Sqlite => {
                if Path::new(&self.database_path).is_absolute()
                    || self.database_path.contains("..")
                {
                    return Err(ConfigError::remote(
                        "remote.database_path must be relative and cannot contain '..'",
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
