use crate::BootstrapState;

use pi_core::{PlayerId, Profile};
use pi_remote::DirectoryError;

use std::sync::Arc;

/// What collaborators see of the current identity.
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub state: BootstrapState,
    pub identity: Option<PlayerId>,
    pub profile: Option<Profile>,
    pub loading: bool,
    pub error: Option<Arc<DirectoryError>>,
    pub has_account: bool,
}
