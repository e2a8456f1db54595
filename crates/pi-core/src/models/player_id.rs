use crate::{CoreError, Result as CoreErrorResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Identifier of a player record, assigned by the remote directory.
///
/// Persisted locally as its decimal string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(i64);

impl PlayerId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for PlayerId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<PlayerId> for i64 {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl FromStr for PlayerId {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|source| CoreError::InvalidPlayerId {
                value: s.to_string(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
