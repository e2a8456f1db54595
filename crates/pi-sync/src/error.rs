use crate::BootstrapState;

use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Cannot {operation} while {state} {location}")]
    InvalidState {
        operation: &'static str,
        state: BootstrapState,
        location: ErrorLocation,
    },

    #[error("Invalid reconciler settings: {message} {location}")]
    Settings {
        message: String,
        location: ErrorLocation,
    },
}

impl ReconcileError {
    #[track_caller]
    pub fn invalid_state(operation: &'static str, state: BootstrapState) -> Self {
        Self::InvalidState {
            operation,
            state,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, ReconcileError>;
