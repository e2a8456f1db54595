mod cache_config;
mod config;
mod error;
mod identity_config;
mod log_level;
mod logging_config;
mod remote_config;
mod retry_config;
mod storage_config;

#[cfg(test)]
mod tests;

pub use cache_config::CacheConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use identity_config::IdentityConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use remote_config::{RemoteBackend, RemoteConfig};
pub use retry_config::RetryConfig;
pub use storage_config::StorageConfig;

pub const CONFIG_DIR_ENV: &str = "PI_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = ".pi";
pub const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;

pub const DEFAULT_STORAGE_DIR: &str = "data";
pub const DEFAULT_IDENTITY_KEY: &str = "player_id";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:54321";
pub const DEFAULT_TABLE: &str = "players";
pub const DEFAULT_DATABASE_FILENAME: &str = "players.db";
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 10;
pub const MIN_REMOTE_TIMEOUT_SECS: u64 = 1;
pub const MAX_REMOTE_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 5;
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 3600;

pub const DEFAULT_SENTINEL_ID: i64 = 1;
pub const DEFAULT_USERNAME_PREFIX: &str = "Player";
