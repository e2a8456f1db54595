//! Durable local persistence for the device identity.
//!
//! The store is a tiny key-value map; the only key the rest of the workspace
//! writes is the player id under the configured identity key.

pub(crate) mod error;
pub(crate) mod file_store;
pub(crate) mod identity_document;

#[cfg(test)]
mod tests;

pub use error::{Result, StorageError};
pub use file_store::{FileIdentityStore, IDENTITY_FILENAME};
pub use identity_document::{IdentityDocument, SCHEMA_VERSION};

use async_trait::async_trait;

/// Local key-value persistence for the device identity.
///
/// Implementations never retry; a failure is reported to the caller as-is.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Durably store `value` under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
