//! In-memory collaborators for exercising the reconciler without disk or network.

use crate::BootstrapState;

use pi_config::RetryConfig;
use pi_core::{PlayerId, Profile, UsernameSeed};
use pi_remote::{DirectoryError, RemoteDirectory, Result as DirectoryResult};
use pi_store::{IdentityStore, Result as StoreResult, StorageError};

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

pub(crate) const FIRST_CREATED_ID: i64 = 100;

pub(crate) fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_delay_ms: 10,
        max_delay_secs: 1,
        backoff_multiplier: 2.0,
        jitter: false,
    }
}

pub(crate) fn profile(id: i64, username: &str, account_ref: Option<&str>) -> Profile {
    Profile {
        id: PlayerId::new(id),
        username: username.to_string(),
        account_ref: account_ref.map(str::to_string),
    }
}

type Observation = (BootstrapState, Option<PlayerId>);

#[derive(Default)]
pub(crate) struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
    probe: Mutex<Option<(watch::Receiver<BootstrapState>, watch::Receiver<Option<PlayerId>>)>>,
    observed: Mutex<Vec<Observation>>,
}

impl MemoryStore {
    pub(crate) fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub(crate) fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub(crate) fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Record what the reconciler was publishing at the moment of each write.
    pub(crate) fn watch(
        &self,
        state: watch::Receiver<BootstrapState>,
        identity: watch::Receiver<Option<PlayerId>>,
    ) {
        *self.probe.lock().unwrap() = Some((state, identity));
    }

    pub(crate) fn observed(&self) -> Vec<Observation> {
        self.observed.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable("disk unplugged"));
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if let Some((state, identity)) = self.probe.lock().unwrap().as_ref() {
            self.observed
                .lock()
                .unwrap()
                .push((*state.borrow(), *identity.borrow()));
        }

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable("disk full"));
        }

        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FetchMode {
    Normal,
    Unavailable,
    Rejected,
}

pub(crate) struct FakeDirectory {
    next_id: AtomicI64,
    profiles: Mutex<HashMap<PlayerId, Profile>>,
    create_calls: AtomicUsize,
    fetched: Mutex<Vec<PlayerId>>,
    fail_creates: AtomicBool,
    fetch_mode: Mutex<FetchMode>,
    latency: Mutex<Duration>,
}

impl Default for FakeDirectory {
    fn default() -> Self {
        Self {
            next_id: AtomicI64::new(FIRST_CREATED_ID),
            profiles: Mutex::new(HashMap::new()),
            create_calls: AtomicUsize::new(0),
            fetched: Mutex::new(Vec::new()),
            fail_creates: AtomicBool::new(false),
            fetch_mode: Mutex::new(FetchMode::Normal),
            latency: Mutex::new(Duration::ZERO),
        }
    }
}

impl FakeDirectory {
    pub(crate) fn insert(&self, profile: Profile) {
        self.profiles.lock().unwrap().insert(profile.id, profile);
    }

    pub(crate) fn fail_creates(&self) {
        self.fail_creates.store(true, Ordering::SeqCst);
    }

    pub(crate) fn set_fetch_mode(&self, mode: FetchMode) {
        *self.fetch_mode.lock().unwrap() = mode;
    }

    pub(crate) fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }

    pub(crate) fn fetched_ids(&self) -> Vec<PlayerId> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteDirectory for FakeDirectory {
    async fn create_profile(&self, seed: &UsernameSeed) -> DirectoryResult<Profile> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(DirectoryError::unavailable("connection refused"));
        }

        let id = PlayerId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = Profile {
            id,
            username: seed.generate(),
            account_ref: None,
        };
        self.insert(created.clone());
        Ok(created)
    }

    async fn fetch_profile(&self, id: PlayerId) -> DirectoryResult<Profile> {
        self.fetched.lock().unwrap().push(id);

        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let mode = *self.fetch_mode.lock().unwrap();
        match mode {
            FetchMode::Unavailable => Err(DirectoryError::unavailable("503 from upstream")),
            FetchMode::Rejected => Err(DirectoryError::rejected(Some(401), "bad api key")),
            FetchMode::Normal => self
                .profiles
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| DirectoryError::not_found(id)),
        }
    }
}
