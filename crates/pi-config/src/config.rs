use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, CacheConfig, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, IdentityConfig, LoggingConfig, RemoteBackend, RemoteConfig, RetryConfig,
    StorageConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub remote: RemoteConfig,
    pub cache: CacheConfig,
    pub retry: RetryConfig,
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
    #[serde(skip)]
    config_dir: PathBuf,
}

impl Config {
    /// Load config from the default config directory.
    ///
    /// Loading order:
    /// 1. Check for PI_CONFIG_DIR env var, else use ./.pi/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply PI_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        Self::load_from(&config_dir)
    }

    /// Load config rooted at an explicit directory.
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.config_dir = config_dir.to_path_buf();
        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: PI_CONFIG_DIR env var > ./.pi/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Directory this config was loaded from.
    pub fn root(&self) -> &Path {
        &self.config_dir
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.storage.validate()?;
        self.remote.validate()?;
        self.cache.validate()?;
        self.retry.validate()?;
        self.identity.validate()?;
        Ok(())
    }

    /// Absolute directory holding the identity file.
    pub fn storage_dir(&self) -> PathBuf {
        self.config_dir.join(&self.storage.dir)
    }

    /// Absolute path of the SQLite player directory.
    pub fn database_path(&self) -> PathBuf {
        self.config_dir.join(&self.remote.database_path)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded from {}:", self.config_dir.display());
        info!(
            "  storage: dir={}, key={}",
            self.storage.dir, self.storage.identity_key
        );

        match self.remote.backend {
            RemoteBackend::Http => info!(
                "  remote: http {} table={} timeout={}s api_key={}",
                self.remote.base_url,
                self.remote.table,
                self.remote.timeout_secs,
                if self.remote.api_key.is_some() {
                    "set"
                } else {
                    "none"
                }
            ),
            RemoteBackend::Sqlite => info!("  remote: sqlite {}", self.remote.database_path),
        }

        info!(
            "  cache: refresh every {}s",
            self.cache.refresh_interval_secs
        );

        info!(
            "  retry: attempts={}, initial={}ms, max={}s, backoff={}x",
            self.retry.max_attempts,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier
        );

        info!(
            "  identity: sentinel={}, prefix={}",
            self.identity.sentinel_id, self.identity.username_prefix
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Storage
        Self::apply_env_string("PI_STORAGE_DIR", &mut self.storage.dir);
        Self::apply_env_string("PI_STORAGE_IDENTITY_KEY", &mut self.storage.identity_key);

        // Remote
        Self::apply_env_parse("PI_REMOTE_BACKEND", &mut self.remote.backend);
        Self::apply_env_string("PI_REMOTE_BASE_URL", &mut self.remote.base_url);
        Self::apply_env_option_string("PI_REMOTE_API_KEY", &mut self.remote.api_key);
        Self::apply_env_string("PI_REMOTE_TABLE", &mut self.remote.table);
        Self::apply_env_string("PI_REMOTE_DATABASE_PATH", &mut self.remote.database_path);
        Self::apply_env_parse("PI_REMOTE_TIMEOUT_SECS", &mut self.remote.timeout_secs);

        // Cache
        Self::apply_env_parse(
            "PI_CACHE_REFRESH_INTERVAL_SECS",
            &mut self.cache.refresh_interval_secs,
        );

        // Retry
        Self::apply_env_parse("PI_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse(
            "PI_RETRY_INITIAL_DELAY_MS",
            &mut self.retry.initial_delay_ms,
        );
        Self::apply_env_parse("PI_RETRY_MAX_DELAY_SECS", &mut self.retry.max_delay_secs);
        Self::apply_env_parse(
            "PI_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("PI_RETRY_JITTER", &mut self.retry.jitter);

        // Identity
        Self::apply_env_parse("PI_IDENTITY_SENTINEL_ID", &mut self.identity.sentinel_id);
        Self::apply_env_string(
            "PI_IDENTITY_USERNAME_PREFIX",
            &mut self.identity.username_prefix,
        );

        // Logging
        Self::apply_env_parse("PI_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("PI_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("PI_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
