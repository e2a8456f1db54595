//! Identity bootstrap and profile synchronization.
//!
//! [`Reconciler`] decides on startup whether this device needs a new player
//! record or already has one, and [`ProfileCache`] keeps the remote profile
//! fresh behind it.

pub mod bootstrap_state;
pub mod cached_profile_entry;
pub mod error;
pub mod player_snapshot;
pub mod profile_cache;
pub mod reconciler;
pub mod refresh;
pub mod retry;
pub mod scope;

#[cfg(test)]
mod tests;

pub use bootstrap_state::BootstrapState;
pub use cached_profile_entry::CachedProfileEntry;
pub use error::{ReconcileError, Result};
pub use player_snapshot::PlayerSnapshot;
pub use profile_cache::ProfileCache;
pub use reconciler::{Reconciler, ReconcilerSettings};
pub use refresh::{RefreshHandle, spawn_refresh};
pub use retry::{IsRetryable, with_retry};
pub use scope::{ScopeController, ScopePhase};
