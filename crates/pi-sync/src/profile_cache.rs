use crate::{CachedProfileEntry, with_retry};

use pi_config::RetryConfig;
use pi_core::{PlayerId, Profile};
use pi_remote::RemoteDirectory;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use log::{debug, warn};
use tokio::time::Instant;

/// One fetch cycle; every caller interested in the same id awaits the same one.
pub type FetchFuture = Shared<BoxFuture<'static, CachedProfileEntry>>;

#[derive(Default)]
struct Slot {
    entry: CachedProfileEntry,
    in_flight: Option<FetchFuture>,
}

struct CacheInner {
    directory: Arc<dyn RemoteDirectory>,
    retry: RetryConfig,
    refresh_interval: Duration,
    slots: Mutex<HashMap<PlayerId, Slot>>,
}

impl CacheInner {
    fn lock_slots(&self) -> MutexGuard<'_, HashMap<PlayerId, Slot>> {
        // Slots are only mutated in short non-panicking sections
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Per-player profile cache keyed by [`PlayerId`].
///
/// At most one fetch per id is in flight at any time. Concurrent readers of
/// the same id share it, and readers of different ids never block each
/// other beyond the brief slot lock. Cheap to clone.
#[derive(Clone)]
pub struct ProfileCache {
    inner: Arc<CacheInner>,
}

impl ProfileCache {
    pub fn new(
        directory: Arc<dyn RemoteDirectory>,
        retry: RetryConfig,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                directory,
                retry,
                refresh_interval,
                slots: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.inner.refresh_interval
    }

    /// Current entry for `id`, starting a background fetch when the entry
    /// has never been fetched or has gone stale and nothing is in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn get(&self, id: PlayerId) -> CachedProfileEntry {
        let mut slots = self.inner.lock_slots();
        let slot = slots.entry(id).or_default();
        if slot.in_flight.is_none() && slot.entry.is_due(self.inner.refresh_interval, Instant::now())
        {
            let _ = self.begin(slot, id);
        }
        slot.entry.clone()
    }

    /// Fetch `id` now, ignoring freshness.
    ///
    /// Joins the in-flight fetch when there is one. The returned future
    /// resolves to the entry as it stood when that cycle completed; dropping
    /// it does not cancel the fetch.
    pub fn fetch(&self, id: PlayerId) -> FetchFuture {
        let mut slots = self.inner.lock_slots();
        let slot = slots.entry(id).or_default();
        if let Some(fetch) = &slot.in_flight {
            return fetch.clone();
        }
        self.begin(slot, id)
    }

    /// Like [`ProfileCache::fetch`] but served from cache while the entry is
    /// still fresh.
    pub async fn load(&self, id: PlayerId) -> CachedProfileEntry {
        let (pending, cached) = {
            let mut slots = self.inner.lock_slots();
            let slot = slots.entry(id).or_default();
            let pending = if let Some(fetch) = &slot.in_flight {
                Some(fetch.clone())
            } else if slot.entry.is_due(self.inner.refresh_interval, Instant::now()) {
                Some(self.begin(slot, id))
            } else {
                None
            };
            (pending, slot.entry.clone())
        };

        match pending {
            Some(fetch) => fetch.await,
            None => cached,
        }
    }

    /// Fire-and-forget [`ProfileCache::fetch`].
    pub fn spawn_fetch(&self, id: PlayerId) {
        let _ = self.fetch(id);
    }

    /// Seed the cache with a profile obtained elsewhere, e.g. right after
    /// creating it.
    pub fn prime(&self, profile: Profile) {
        let mut slots = self.inner.lock_slots();
        let slot = slots.entry(profile.id).or_default();
        slot.entry.record(Ok(profile), Instant::now());
    }

    /// Current entry without side effects.
    pub fn peek(&self, id: PlayerId) -> Option<CachedProfileEntry> {
        self.inner
            .lock_slots()
            .get(&id)
            .map(|slot| slot.entry.clone())
    }

    // Every cycle runs on its own task so `in_flight` is always cleared,
    // even when no caller is left awaiting it.
    fn begin(&self, slot: &mut Slot, id: PlayerId) -> FetchFuture {
        slot.entry.loading = true;
        let fetch = run_fetch(Arc::clone(&self.inner), id).boxed().shared();
        slot.in_flight = Some(fetch.clone());
        tokio::spawn(fetch.clone());
        fetch
    }
}

async fn run_fetch(inner: Arc<CacheInner>, id: PlayerId) -> CachedProfileEntry {
    let operation_name = format!("Profile fetch for player {id}");
    let directory = Arc::clone(&inner.directory);
    let result = with_retry(&inner.retry, &operation_name, || {
        let directory = Arc::clone(&directory);
        async move { directory.fetch_profile(id).await }
    })
    .await;

    match &result {
        Ok(profile) => debug!(
            "Fetched player {id} ({}, linked: {})",
            profile.username,
            profile.has_account()
        ),
        Err(e) if e.is_not_found() => warn!("Player {id} does not exist remotely"),
        Err(e) => warn!("{operation_name} failed: {e}"),
    }

    let mut slots = inner.lock_slots();
    let slot = slots.entry(id).or_default();
    slot.entry.record(result, Instant::now());
    slot.in_flight = None;
    slot.entry.clone()
}
