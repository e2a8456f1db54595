use std::sync::Arc;

use log::debug;
use tokio::sync::watch;

/// Visibility of whatever owns the identity: a window, a session, a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopePhase {
    Foreground,
    Background,
    /// Terminal
    Closed,
}

/// Broadcasts [`ScopePhase`] changes to refresh tasks.
///
/// Starts in `Foreground`. Once closed, further transitions are ignored.
/// Dropping the last clone closes every subscriber as well.
#[derive(Clone)]
pub struct ScopeController {
    phase_tx: Arc<watch::Sender<ScopePhase>>,
}

impl ScopeController {
    pub fn new() -> Self {
        let (phase_tx, _) = watch::channel(ScopePhase::Foreground);
        Self {
            phase_tx: Arc::new(phase_tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ScopePhase> {
        self.phase_tx.subscribe()
    }

    pub fn phase(&self) -> ScopePhase {
        *self.phase_tx.borrow()
    }

    pub fn is_closed(&self) -> bool {
        self.phase() == ScopePhase::Closed
    }

    pub fn foreground(&self) {
        self.transition(ScopePhase::Foreground);
    }

    pub fn background(&self) {
        self.transition(ScopePhase::Background);
    }

    /// Tear the scope down. Refresh tasks bound to it stop.
    pub fn close(&self) {
        self.transition(ScopePhase::Closed);
    }

    fn transition(&self, next: ScopePhase) {
        self.phase_tx.send_if_modified(|phase| {
            if *phase == next || *phase == ScopePhase::Closed {
                return false;
            }
            debug!("Scope {:?} -> {:?}", phase, next);
            *phase = next;
            true
        });
    }
}

impl Default for ScopeController {
    fn default() -> Self {
        Self::new()
    }
}
