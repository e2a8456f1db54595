use crate::{ProfileCache, ScopePhase};

use pi_core::PlayerId;

use log::debug;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Owns a running refresh task. Dropping the handle stops the task.
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Re-fetch the current identity every refresh interval while the scope is
/// in the foreground.
///
/// The first tick comes one full interval after (re-)entering the
/// foreground; resuming never fetches immediately. The task ends when the
/// scope closes or its controller is dropped.
pub fn spawn_refresh(
    cache: ProfileCache,
    identity: watch::Receiver<Option<PlayerId>>,
    phase: watch::Receiver<ScopePhase>,
) -> RefreshHandle {
    RefreshHandle {
        task: tokio::spawn(run(cache, identity, phase)),
    }
}

async fn run(
    cache: ProfileCache,
    identity: watch::Receiver<Option<PlayerId>>,
    mut phase: watch::Receiver<ScopePhase>,
) {
    let period = cache.refresh_interval();

    'scope: loop {
        let current = *phase.borrow_and_update();
        match current {
            ScopePhase::Closed => break,
            ScopePhase::Background => {
                if phase.changed().await.is_err() {
                    break;
                }
                continue;
            }
            ScopePhase::Foreground => {}
        }

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let current_id = *identity.borrow();
                    if let Some(id) = current_id {
                        debug!("Refreshing player {id}");
                        cache.spawn_fetch(id);
                    }
                }
                changed = phase.changed() => {
                    if changed.is_err() {
                        break 'scope;
                    }
                    if *phase.borrow() != ScopePhase::Foreground {
                        continue 'scope;
                    }
                }
            }
        }
    }

    debug!("Profile refresh stopped");
}
