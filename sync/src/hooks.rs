use std::sync::Arc;

use cruiser_sync_shared::{NetworkSettings, PeerId};

use crate::{SyncHandle, SyncOutcome};

/// Called once per session when the handshake settles, with the settings
/// every synchronized system should now use
pub type SyncHook = Arc<dyn Fn(&SyncHandle, SyncOutcome, &NetworkSettings) + Send + Sync>;

/// Called on the host each time a client finishes the contact step, so
/// gameplay systems can push their current state to that client
pub type PeerSyncedHook = Arc<dyn Fn(&SyncHandle, PeerId) + Send + Sync>;

/// Handler for a gameplay message routed through the session
pub type SessionMessageHandler = Arc<dyn Fn(&SyncHandle, PeerId, &[u8]) + Send + Sync>;

#[derive(Clone, Default)]
pub(crate) struct SyncHooks {
    pub on_sync: Option<SyncHook>,
    pub on_peer_synced: Option<PeerSyncedHook>,
}
