pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::player_id::PlayerId;
pub use models::profile::Profile;
pub use models::username_seed::{DEFAULT_USERNAME_PREFIX, USERNAME_SUFFIX_BOUND, UsernameSeed};

#[cfg(test)]
mod tests;
