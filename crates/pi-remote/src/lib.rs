//! Remote player directory: the source of truth for player profiles.

pub mod error;
pub mod http_directory;
pub mod player_row;
pub mod sqlite_directory;


pub use error::{DirectoryError, Result};
pub use http_directory::HttpDirectory;
pub use sqlite_directory::SqliteDirectory;

use pi_core::{PlayerId, Profile, UsernameSeed};

use async_trait::async_trait;

/// Remote store of player records.
///
/// Both operations are network calls. Callers own retry policy; the
/// directory reports each failure once.
#[async_trait]
pub trait RemoteDirectory: Send + Sync {
    /// Insert a new unlinked player with a username generated from `seed`
    /// and return the stored row, including its assigned id.
    async fn create_profile(&self, seed: &UsernameSeed) -> Result<Profile>;

    /// Point lookup by id.
    async fn fetch_profile(&self, id: PlayerId) -> Result<Profile>;
}
