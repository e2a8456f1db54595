use pi_core::PlayerId;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures reported by a [`crate::RemoteDirectory`].
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Player {id} not found {location}")]
    NotFound {
        id: PlayerId,
        location: ErrorLocation,
    },

    #[error("Player directory unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Player directory rejected request (status {status:?}): {message} {location}")]
    Rejected {
        status: Option<u16>,
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed player record: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Player directory setup failed: {message} {location}")]
    Setup {
        message: String,
        location: ErrorLocation,
    },
}

impl DirectoryError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[track_caller]
    pub fn not_found(id: PlayerId) -> Self {
        Self::NotFound {
            id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rejected(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Map an HTTP status that is not a success.
    ///
    /// Timeouts, throttling and server faults are transient; anything else
    /// is a rejection that will not change on retry.
    #[track_caller]
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let message = body.into();
        match status {
            408 | 429 | 500..=599 => Self::unavailable(format!("HTTP {status}: {message}")),
            _ => Self::rejected(Some(status), message),
        }
    }
}

impl From<reqwest::Error> for DirectoryError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::unavailable(err.to_string())
        }
    }
}

impl From<sqlx::Error> for DirectoryError {
    #[track_caller]
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::unavailable(err.to_string()),
            sqlx::Error::Database(db)
                if db.message().contains("locked") || db.message().contains("busy") =>
            {
                Self::unavailable(err.to_string())
            }
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_)
            | sqlx::Error::RowNotFound => Self::decode(err.to_string()),
            _ => Self::rejected(None, err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DirectoryError {
    #[track_caller]
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::setup(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
