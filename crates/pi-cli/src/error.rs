use pi_config::ConfigError;
use pi_remote::DirectoryError;
use pi_store::StorageError;
use pi_sync::ReconcileError;

use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {source} {location}")]
    Config {
        #[source]
        source: ConfigError,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Player directory error: {source} {location}")]
    Directory {
        #[source]
        source: DirectoryError,
        location: ErrorLocation,
    },

    #[error("Local storage error: {source}. {hint} {location}")]
    Storage {
        #[source]
        source: StorageError,
        hint: &'static str,
        location: ErrorLocation,
    },

    #[error("{source} {location}")]
    Reconcile {
        #[source]
        source: ReconcileError,
        location: ErrorLocation,
    },

    #[error("Failed to render output: {source} {location}")]
    Output {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Signal handling failed: {source} {location}")]
    Signal {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl CliError {
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for CliError {
    #[track_caller]
    fn from(source: ConfigError) -> Self {
        Self::Config {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DirectoryError> for CliError {
    #[track_caller]
    fn from(source: DirectoryError) -> Self {
        Self::Directory {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StorageError> for CliError {
    #[track_caller]
    fn from(source: StorageError) -> Self {
        Self::Storage {
            hint: source.recovery_hint(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ReconcileError> for CliError {
    #[track_caller]
    fn from(source: ReconcileError) -> Self {
        Self::Reconcile {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Output {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for CliError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Signal {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CliError>;
