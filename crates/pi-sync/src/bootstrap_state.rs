use pi_core::PlayerId;

use std::fmt;

/// Lifecycle of the device identity within one session.
///
/// `Uninitialized → LoadingLocal → {CreatingRemote | LoadingRemote} → Ready`,
/// with `Degraded` absorbing any unrecoverable local-storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootstrapState {
    #[default]
    Uninitialized,
    LoadingLocal,
    CreatingRemote,
    LoadingRemote(PlayerId),
    Ready,
    Degraded,
}

impl BootstrapState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::LoadingLocal => "loading_local",
            Self::CreatingRemote => "creating_remote",
            Self::LoadingRemote(_) => "loading_remote",
            Self::Ready => "ready",
            Self::Degraded => "degraded",
        }
    }

    /// Bootstrap work is still underway.
    pub fn is_transitional(&self) -> bool {
        matches!(
            self,
            Self::LoadingLocal | Self::CreatingRemote | Self::LoadingRemote(_)
        )
    }

    /// An identity is assigned and collaborators may use it.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready | Self::Degraded)
    }
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadingRemote(id) => write!(f, "{}({id})", self.as_str()),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}
