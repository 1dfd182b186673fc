use std::sync::{Arc, Mutex};

use cruiser_sync::{SyncCoordinator, SyncOutcome};
use cruiser_sync_shared::{NetworkSettings, PeerId};

/// Records every hook call a coordinator makes
#[derive(Clone, Default)]
pub struct SyncRecorder {
    syncs: Arc<Mutex<Vec<(SyncOutcome, NetworkSettings)>>>,
    synced_peers: Arc<Mutex<Vec<PeerId>>>,
}

impl SyncRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs both hooks on `coordinator`
    pub fn attach(&self, coordinator: &mut SyncCoordinator) {
        let syncs = self.syncs.clone();
        coordinator.on_sync(move |_, outcome, settings| {
            syncs.lock().unwrap().push((outcome, settings.clone()));
        });

        let synced_peers = self.synced_peers.clone();
        coordinator.on_peer_synced(move |_, peer| {
            synced_peers.lock().unwrap().push(peer);
        });
    }

    pub fn syncs(&self) -> Vec<(SyncOutcome, NetworkSettings)> {
        self.syncs.lock().unwrap().clone()
    }

    pub fn outcomes(&self) -> Vec<SyncOutcome> {
        self.syncs().into_iter().map(|(outcome, _)| outcome).collect()
    }

    /// Settings passed to the most recent sync hook call
    pub fn last_settings(&self) -> Option<NetworkSettings> {
        self.syncs().pop().map(|(_, settings)| settings)
    }

    pub fn synced_peers(&self) -> Vec<PeerId> {
        self.synced_peers.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.syncs.lock().unwrap().clear();
        self.synced_peers.lock().unwrap().clear();
    }
}
