use crate::{CoreError, Result as CoreErrorResult};

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_USERNAME_PREFIX: &str = "Player";

/// Generated suffixes fall in `[0, USERNAME_SUFFIX_BOUND)`.
pub const USERNAME_SUFFIX_BOUND: u32 = 10_000;

/// Input for generating the username of a freshly created player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameSeed {
    prefix: String,
}

impl UsernameSeed {
    pub fn new(prefix: impl Into<String>) -> CoreErrorResult<Self> {
        let prefix = prefix.into();
        if prefix.trim().is_empty() {
            return Err(CoreError::validation("username prefix cannot be empty"));
        }
        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Prefix followed by a uniformly random integer in `[0, 10000)`.
    pub fn generate(&self) -> String {
        self.generate_with(&mut rand::rng())
    }

    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> String {
        let suffix = rng.random_range(0..USERNAME_SUFFIX_BOUND);
        format!("{}{}", self.prefix, suffix)
    }

    /// Whether `username` has the shape produced by [`UsernameSeed::generate`].
    pub fn matches(&self, username: &str) -> bool {
        username
            .strip_prefix(&self.prefix)
            .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|suffix| suffix.parse::<u32>().ok())
            .is_some_and(|n| n < USERNAME_SUFFIX_BOUND)
    }
}

impl Default for UsernameSeed {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_USERNAME_PREFIX.to_string(),
        }
    }
}
