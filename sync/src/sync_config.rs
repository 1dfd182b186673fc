use std::{default::Default, time::Duration};

use cruiser_sync_shared::{Version, CURRENT_SCHEMA};

/// Contains Config properties which will be used by the SyncCoordinator
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Version this peer reports during the handshake and stamps on its own
    /// settings. Clients never read settings tiers newer than this.
    pub local_version: Version,
    /// How long a client waits for the host's settings before falling back
    /// to local-only behaviour. `None` waits forever.
    pub handshake_timeout: Option<Duration>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            local_version: CURRENT_SCHEMA,
            handshake_timeout: Some(Duration::from_secs(10)),
        }
    }
}
