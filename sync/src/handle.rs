use std::sync::Arc;

use log::{error, info, warn};

use cruiser_sync_shared::{HostType, NetworkSettings, PeerId, Version};

use crate::{
    session::{Session, SyncOutcome, SyncState},
    SyncCoordinatorError,
};

/// A cloneable reference to the live session, handed to every hook and
/// routed message handler. Once the coordinator cleans up, a handle still
/// reads the discarded session's state but can no longer send or settle it.
#[derive(Clone)]
pub struct SyncHandle {
    pub(crate) session: Arc<Session>,
}

impl SyncHandle {
    pub(crate) fn new(session: Session) -> Self {
        Self {
            session: Arc::new(session),
        }
    }

    // Accessors

    pub fn host_type(&self) -> HostType {
        self.session.host_type
    }

    pub fn local_id(&self) -> PeerId {
        self.session.local_id
    }

    pub fn host_id(&self) -> PeerId {
        self.session.host_id
    }

    pub fn local_version(&self) -> Version {
        self.session.local_version
    }

    pub fn sync_state(&self) -> SyncState {
        self.session.lock_state().sync_state
    }

    /// Snapshot of the session's shared settings
    pub fn settings(&self) -> NetworkSettings {
        self.session.lock_state().settings.clone()
    }

    /// Clients the host has recorded as speaking this protocol. Always empty
    /// on a client.
    /// False once the session has been cleaned up
    pub fn is_live(&self) -> bool {
        !self.session.lock_state().closed
    }

    pub fn synced_peers(&self) -> Vec<PeerId> {
        self.session
            .lock_state()
            .peers
            .as_ref()
            .map(|peers| peers.to_vec())
            .unwrap_or_default()
    }

    // Sending

    /// Host only: send a message to one client
    pub fn send_to_one(
        &self,
        name: &str,
        target: PeerId,
        payload: &[u8],
    ) -> Result<(), SyncCoordinatorError> {
        self.require(HostType::Host, "send_to_one")?;
        self.send_raw(name, &[target], payload)
    }

    /// Host only: send a message to each of `targets`
    pub fn send_to_set(
        &self,
        name: &str,
        targets: &[PeerId],
        payload: &[u8],
    ) -> Result<(), SyncCoordinatorError> {
        self.require(HostType::Host, "send_to_set")?;
        self.send_raw(name, targets, payload)
    }

    /// Host only: send a message to every synced client
    pub fn send_to_all_synced_peers(
        &self,
        name: &str,
        payload: &[u8],
    ) -> Result<(), SyncCoordinatorError> {
        self.require(HostType::Host, "send_to_all_synced_peers")?;
        let targets = self.synced_peers();
        if targets.is_empty() {
            return Ok(());
        }
        self.send_raw(name, &targets, payload)
    }

    /// Client only: send a message to the host.
    ///
    /// Until the handshake has synced with the host the message is dropped
    /// and `Ok(false)` is returned, unless `force` is set.
    pub fn send_to_host(
        &self,
        name: &str,
        payload: &[u8],
        force: bool,
    ) -> Result<bool, SyncCoordinatorError> {
        self.require(HostType::Client, "send_to_host")?;
        if !force && self.sync_state() != SyncState::SyncedWithHost {
            return Ok(false);
        }
        self.send_raw(name, &[self.session.host_id], payload)?;
        Ok(true)
    }

    // Handshake

    /// Settles the handshake. Only the first call per session has any
    /// effect; it returns true and runs the sync hook.
    pub fn finish_sync(&self, success: bool) -> Result<bool, SyncCoordinatorError> {
        self.ensure_live("finish_sync")?;
        let outcome = if success {
            SyncOutcome::SyncedWithHost
        } else {
            SyncOutcome::SyncedLocalOnly
        };
        Ok(self.finish_sync_with(outcome, None))
    }

    /// As `finish_sync`, but also installs the host's settings in the same
    /// critical section, so a late reply can never overwrite a settled
    /// session.
    pub(crate) fn finish_sync_with(
        &self,
        outcome: SyncOutcome,
        host_settings: Option<NetworkSettings>,
    ) -> bool {
        let settings = {
            let mut state = self.session.lock_state();
            if state.closed || state.sync_state.is_terminal() {
                return false;
            }
            if let Some(host_settings) = host_settings {
                state.settings = host_settings;
            }
            state.sync_state = outcome.into();
            state.contact_sent_at = None;
            state.settings.clone()
        };

        if outcome == SyncOutcome::SyncedLocalOnly {
            info!("Could not sync with host settings. Only client-side effects will apply.");
        }

        // Lock is released, so the hook may use this handle freely
        if let Some(on_sync) = &self.session.hooks.on_sync {
            on_sync(self, outcome, &settings);
        }
        true
    }

    // Internal

    /// Ends the session for every clone of this handle
    pub(crate) fn close(&self) {
        self.session.lock_state().closed = true;
    }

    pub(crate) fn send_raw(
        &self,
        name: &str,
        targets: &[PeerId],
        payload: &[u8],
    ) -> Result<(), SyncCoordinatorError> {
        let wire_name = self.session.protocol.wire_name(name);
        self.session.sender.send(&wire_name, targets, payload)?;
        Ok(())
    }

    fn ensure_live(&self, operation: &'static str) -> Result<(), SyncCoordinatorError> {
        if self.is_live() {
            return Ok(());
        }
        warn!("{} called on a session that was cleaned up", operation);
        Err(SyncCoordinatorError::NotInitialized)
    }

    fn require(
        &self,
        required: HostType,
        operation: &'static str,
    ) -> Result<(), SyncCoordinatorError> {
        self.ensure_live(operation)?;
        let actual = self.session.host_type;
        if actual == required {
            return Ok(());
        }
        error!("{} called from {:?}!", operation, actual);
        Err(SyncCoordinatorError::ProtocolMisuse {
            operation,
            required,
            actual,
        })
    }
}
