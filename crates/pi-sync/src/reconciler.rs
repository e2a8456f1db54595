use crate::{
    BootstrapState, CachedProfileEntry, PlayerSnapshot, ProfileCache, ReconcileError, RefreshHandle,
    Result as ReconcileResult, ScopeController, spawn_refresh,
};

use pi_config::Config;
use pi_core::{PlayerId, UsernameSeed};
use pi_remote::{DirectoryError, RemoteDirectory};
use pi_store::IdentityStore;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};
use tokio::sync::{Mutex as AsyncMutex, watch};

#[derive(Debug, Clone)]
pub struct ReconcilerSettings {
    /// Store key holding the persisted player id
    pub identity_key: String,
    /// Identity used for the session when local storage is unusable
    pub sentinel: PlayerId,
    pub username_seed: UsernameSeed,
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self {
            identity_key: String::from(pi_config::DEFAULT_IDENTITY_KEY),
            sentinel: PlayerId::new(pi_config::DEFAULT_SENTINEL_ID),
            username_seed: UsernameSeed::default(),
        }
    }
}

impl ReconcilerSettings {
    pub fn from_config(config: &Config) -> ReconcileResult<Self> {
        let username_seed = UsernameSeed::new(config.identity.username_prefix.as_str())
            .map_err(|e| ReconcileError::settings(e.to_string()))?;

        Ok(Self {
            identity_key: config.storage.identity_key.clone(),
            sentinel: PlayerId::new(config.identity.sentinel_id),
            username_seed,
        })
    }
}

/// Decides, once per session, which player this device is.
///
/// A stored id is reused and its profile loaded; a missing one triggers a
/// remote create whose id is persisted before anyone sees it. Unusable local
/// storage degrades the session to the configured sentinel id instead of
/// failing.
pub struct Reconciler {
    store: Arc<dyn IdentityStore>,
    directory: Arc<dyn RemoteDirectory>,
    cache: ProfileCache,
    settings: ReconcilerSettings,
    state_tx: watch::Sender<BootstrapState>,
    identity_tx: watch::Sender<Option<PlayerId>>,
    has_account: AtomicBool,
    create_error: Mutex<Option<Arc<DirectoryError>>>,
    // Serializes bootstrap and override transitions
    transition_lock: AsyncMutex<()>,
}

impl Reconciler {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        directory: Arc<dyn RemoteDirectory>,
        cache: ProfileCache,
        settings: ReconcilerSettings,
    ) -> Self {
        let (state_tx, _) = watch::channel(BootstrapState::Uninitialized);
        let (identity_tx, _) = watch::channel(None);

        Self {
            store,
            directory,
            cache,
            settings,
            state_tx,
            identity_tx,
            has_account: AtomicBool::new(false),
            create_error: Mutex::new(None),
            transition_lock: AsyncMutex::new(()),
        }
    }

    pub fn state(&self) -> BootstrapState {
        *self.state_tx.borrow()
    }

    pub fn current_identity(&self) -> Option<PlayerId> {
        *self.identity_tx.borrow()
    }

    pub fn settings(&self) -> &ReconcilerSettings {
        &self.settings
    }

    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }

    /// State changes, starting with the current state.
    pub fn subscribe(&self) -> watch::Receiver<BootstrapState> {
        self.state_tx.subscribe()
    }

    /// Identity changes. Only ever carries ids that are persisted, or the
    /// sentinel, or an explicit override.
    pub fn identity(&self) -> watch::Receiver<Option<PlayerId>> {
        self.identity_tx.subscribe()
    }

    /// Establish the device identity.
    ///
    /// Runs once; calling it again, or concurrently, returns the snapshot of
    /// the first run without touching the store or directory again. A run
    /// whose caller was cancelled midway is resumed by the next call: an
    /// interrupted load continues with the same id, anything earlier starts
    /// over from the local read.
    pub async fn bootstrap(&self) -> PlayerSnapshot {
        let _guard = self.transition_lock.lock().await;
        match self.state() {
            BootstrapState::Ready | BootstrapState::Degraded => {
                debug!("Bootstrap already ran ({})", self.state());
            }
            BootstrapState::LoadingRemote(id) => {
                info!("Resuming interrupted load of player {id}");
                self.load_identity(id).await;
            }
            BootstrapState::Uninitialized
            | BootstrapState::LoadingLocal
            | BootstrapState::CreatingRemote => self.establish().await,
        }

        self.snapshot()
    }

    /// Current view of the identity and its profile.
    ///
    /// Starts a background fetch when the cached profile is missing or stale.
    pub fn snapshot(&self) -> PlayerSnapshot {
        let state = self.state();
        let identity = self.current_identity();
        let entry = identity
            .map(|id| self.cache.get(id))
            .unwrap_or_default();

        self.build_snapshot(state, identity, entry)
    }

    /// Fetch the current identity's profile now, ignoring the refresh cadence.
    pub async fn refetch(&self) -> ReconcileResult<PlayerSnapshot> {
        let state = self.state();
        let Some(id) = self.current_identity() else {
            return Err(ReconcileError::invalid_state("refetch", state));
        };

        let entry = self.cache.fetch(id).await;
        Ok(self.build_snapshot(self.state(), Some(id), entry))
    }

    /// Switch the session to `id` without touching local storage.
    ///
    /// Only allowed once bootstrap has reached `Ready`.
    pub async fn override_identity(&self, id: PlayerId) -> ReconcileResult<PlayerSnapshot> {
        let _guard = self.transition_lock.lock().await;
        let state = self.state();
        if state != BootstrapState::Ready {
            return Err(ReconcileError::invalid_state("override identity", state));
        }

        info!("Overriding session identity with player {id}");
        self.load_identity(id).await;
        Ok(self.snapshot())
    }

    /// Keep the current identity's profile fresh while `scope` is in the
    /// foreground.
    pub fn start_refresh(&self, scope: &ScopeController) -> RefreshHandle {
        spawn_refresh(self.cache.clone(), self.identity(), scope.subscribe())
    }

    async fn establish(&self) {
        self.transition(BootstrapState::LoadingLocal);
        match self.store.get(&self.settings.identity_key).await {
            Ok(None) => self.create_identity().await,
            Ok(Some(raw)) => match raw.parse::<PlayerId>() {
                Ok(id) => self.load_identity(id).await,
                Err(e) => self.degrade(&format!("stored identity is unreadable: {e}")),
            },
            Err(e) => self.degrade(&format!(
                "cannot read local identity: {e}. {}",
                e.recovery_hint()
            )),
        }
    }

    async fn create_identity(&self) {
        self.transition(BootstrapState::CreatingRemote);

        let profile = match self
            .directory
            .create_profile(&self.settings.username_seed)
            .await
        {
            Ok(profile) => profile,
            Err(e) => {
                let reason = format!("cannot create player: {e}");
                self.set_create_error(Some(Arc::new(e)));
                self.degrade(&reason);
                return;
            }
        };

        if let Err(e) = self
            .store
            .set(&self.settings.identity_key, &profile.id.to_string())
            .await
        {
            self.degrade(&format!(
                "created player {} but cannot persist it: {e}. {}",
                profile.id,
                e.recovery_hint()
            ));
            return;
        }

        info!("Created player {} ({})", profile.id, profile.username);
        let id = profile.id;
        self.has_account
            .store(profile.has_account(), Ordering::Relaxed);
        self.cache.prime(profile);
        self.set_create_error(None);
        self.identity_tx.send_replace(Some(id));
        self.transition(BootstrapState::Ready);
    }

    async fn load_identity(&self, id: PlayerId) {
        self.transition(BootstrapState::LoadingRemote(id));
        let previous = self.identity_tx.send_replace(Some(id));
        if previous != Some(id) {
            self.has_account.store(false, Ordering::Relaxed);
        }

        let entry = self.cache.load(id).await;
        if let Some(linked) = entry.has_account {
            self.has_account.store(linked, Ordering::Relaxed);
        }
        self.transition(BootstrapState::Ready);
    }

    fn degrade(&self, reason: &str) {
        warn!(
            "Identity degraded to sentinel player {}: {reason}",
            self.settings.sentinel
        );
        self.identity_tx.send_replace(Some(self.settings.sentinel));
        self.transition(BootstrapState::Degraded);
    }

    fn transition(&self, next: BootstrapState) {
        let previous = self.state_tx.send_replace(next);
        debug!("Bootstrap {previous} -> {next}");
    }

    fn set_create_error(&self, error: Option<Arc<DirectoryError>>) {
        *self
            .create_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = error;
    }

    fn build_snapshot(
        &self,
        state: BootstrapState,
        identity: Option<PlayerId>,
        entry: CachedProfileEntry,
    ) -> PlayerSnapshot {
        // Keep the last known link status across failed fetches
        let has_account = match entry.has_account {
            Some(linked) => {
                self.has_account.store(linked, Ordering::Relaxed);
                linked
            }
            None => self.has_account.load(Ordering::Relaxed),
        };

        let error = entry.error.or_else(|| {
            self.create_error
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        });

        PlayerSnapshot {
            state,
            identity,
            profile: entry.profile,
            loading: entry.loading || state.is_transitional(),
            error,
            has_account,
        }
    }
}
