use std::sync::{Mutex, MutexGuard, PoisonError};

use cruiser_sync_shared::{
    HostType, Instant, MessageSender, NetworkSettings, PeerId, Protocol, Version,
};

use crate::{hooks::SyncHooks, PeerRegistry};

/// How the handshake ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncOutcome {
    /// Settings came from the host, or this peer is the host
    SyncedWithHost,
    /// The host never answered (or answered with garbage); only client-side
    /// effects apply and local settings stay in force
    SyncedLocalOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncState {
    Pending,
    SyncedWithHost,
    SyncedLocalOnly,
}

impl SyncState {
    pub fn is_terminal(self) -> bool {
        self != SyncState::Pending
    }

    pub fn outcome(self) -> Option<SyncOutcome> {
        match self {
            SyncState::Pending => None,
            SyncState::SyncedWithHost => Some(SyncOutcome::SyncedWithHost),
            SyncState::SyncedLocalOnly => Some(SyncOutcome::SyncedLocalOnly),
        }
    }
}

impl From<SyncOutcome> for SyncState {
    fn from(outcome: SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::SyncedWithHost => SyncState::SyncedWithHost,
            SyncOutcome::SyncedLocalOnly => SyncState::SyncedLocalOnly,
        }
    }
}

/// Where a coordinator is in its session lifecycle. A host passes straight
/// from `Uninitialized` to `Synced` during `init`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionLifecycle {
    Uninitialized,
    ClientPending,
    Synced(SyncOutcome),
}

pub(crate) struct SessionState {
    pub sync_state: SyncState,
    pub settings: NetworkSettings,
    /// Only the host tracks synced peers
    pub peers: Option<PeerRegistry>,
    pub contact_sent_at: Option<Instant>,
    /// Set once the coordinator has cleaned this session up
    pub closed: bool,
}

/// Everything that lives for exactly one network session. Shared between the
/// coordinator and every handler it registers; all mutable state sits behind
/// one lock because the transport may call handlers from any thread.
pub(crate) struct Session {
    pub host_type: HostType,
    pub local_id: PeerId,
    pub host_id: PeerId,
    pub local_version: Version,
    pub protocol: Protocol,
    pub sender: Box<dyn MessageSender>,
    pub hooks: SyncHooks,
    state: Mutex<SessionState>,
}

impl Session {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        host_type: HostType,
        local_id: PeerId,
        host_id: PeerId,
        local_version: Version,
        protocol: Protocol,
        sender: Box<dyn MessageSender>,
        hooks: SyncHooks,
        settings: NetworkSettings,
    ) -> Self {
        let peers = match host_type {
            HostType::Host => Some(PeerRegistry::new()),
            HostType::Client => None,
        };

        Self {
            host_type,
            local_id,
            host_id,
            local_version,
            protocol,
            sender,
            hooks,
            state: Mutex::new(SessionState {
                sync_state: SyncState::Pending,
                settings,
                peers,
                contact_sent_at: None,
                closed: false,
            }),
        }
    }

    // Every mutation is a plain assignment, so state behind a poisoned lock
    // is still whole
    pub fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
