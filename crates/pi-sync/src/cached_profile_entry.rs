use pi_core::Profile;
use pi_remote::DirectoryError;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

/// Last known state of one player's profile.
///
/// Local and disposable: a failed fetch keeps `profile` and `has_account`
/// from the last success and only records the error.
#[derive(Debug, Clone, Default)]
pub struct CachedProfileEntry {
    pub profile: Option<Profile>,
    pub loading: bool,
    pub error: Option<Arc<DirectoryError>>,
    /// `None` until the first successful fetch
    pub has_account: Option<bool>,
    /// When the last fetch cycle completed, successful or not
    pub fetched_at: Option<Instant>,
}

impl CachedProfileEntry {
    pub(crate) fn record(&mut self, result: Result<Profile, DirectoryError>, now: Instant) {
        self.loading = false;
        self.fetched_at = Some(now);

        match result {
            Ok(profile) => {
                self.has_account = Some(profile.has_account());
                self.profile = Some(profile);
                self.error = None;
            }
            Err(e) => {
                self.error = Some(Arc::new(e));
            }
        }
    }

    /// Never fetched, or the last fetch is older than `interval`.
    pub fn is_due(&self, interval: Duration, now: Instant) -> bool {
        match self.fetched_at {
            None => true,
            Some(at) => now.saturating_duration_since(at) >= interval,
        }
    }
}
