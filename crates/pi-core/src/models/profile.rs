use crate::PlayerId;

use serde::{Deserialize, Serialize};

/// Remote player record.
///
/// The directory owns every field: `id` never changes after creation,
/// `username` may be edited remotely, and `account_ref` is set once the
/// player links a full account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: PlayerId,
    pub username: String,
    #[serde(default)]
    pub account_ref: Option<String>,
}

impl Profile {
    /// Whether this profile is bound to an external account.
    pub fn has_account(&self) -> bool {
        self.account_ref.is_some()
    }
}
