use std::{cmp::Ordering, time::Duration};

use log::{debug, error, info, warn};

use cruiser_sync_shared::{
    BitReader, BitWriter, ConfigError, Instant, NetworkSettings, PeerId, Serde, Version,
    CONFIG_MESSAGE, CURRENT_SCHEMA,
};

use crate::{session::SyncOutcome, SyncHandle};

/// Contact payload: the client's version as a length-prefixed string
pub(crate) fn write_contact(version: &Version) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(16);
    version.to_string().ser(&mut writer);
    writer.to_bytes()
}

pub(crate) fn read_contact(payload: &[u8]) -> Result<Version, ConfigError> {
    let mut reader = BitReader::new(payload);
    let version_string = String::de(&mut reader).map_err(ConfigError::Version)?;
    Ok(Version::parse(&version_string)?)
}

impl SyncHandle {
    /// Host side of the handshake: record the client and answer with the
    /// authoritative settings
    pub(crate) fn receive_contact(&self, client: PeerId, payload: &[u8]) {
        let client_version = match read_contact(payload) {
            Ok(version) => version,
            Err(err) => {
                warn!("Ignoring contact from client {}: {}", client, err);
                return;
            }
        };

        let local_version = self.session.local_version;
        match client_version.cmp(&local_version) {
            Ordering::Greater => warn!(
                "Client {} connected with newer version {}. We're running outdated {}",
                client, client_version, local_version
            ),
            Ordering::Less => warn!(
                "Client {} connected with outdated version {}. We're running {}",
                client, client_version, local_version
            ),
            Ordering::Equal => info!(
                "Client {} connected with version match {}",
                client, client_version
            ),
        }

        let (payload, inserted) = {
            let mut state = self.session.lock_state();
            let Some(peers) = state.peers.as_mut() else {
                error!("Contact from client {} reached a peer that isn't hosting", client);
                return;
            };
            let inserted = peers.insert(client);
            if !inserted {
                debug!("Client {} contacted again", client);
            }
            (state.settings.to_bytes(), inserted)
        };

        if let Err(err) = self.send_to_one(CONFIG_MESSAGE, client, &payload) {
            warn!("Failed to send settings to client {}: {}", client, err);
            // A client that never got the settings isn't synced
            if inserted {
                if let Some(peers) = self.session.lock_state().peers.as_mut() {
                    peers.remove(&client);
                }
            }
            return;
        }

        info!("Sent sync for client {}.", client);
        if let Some(on_peer_synced) = &self.session.hooks.on_peer_synced {
            on_peer_synced(self, client);
        }
    }

    /// Client side of the handshake: adopt the host's settings and settle
    pub(crate) fn receive_config(&self, sender: PeerId, payload: &[u8]) {
        if sender != self.session.host_id {
            warn!("Ignoring settings from non-host peer {}", sender);
            return;
        }
        if self.sync_state().is_terminal() {
            info!("Ignoring settings from host: handshake already finished");
            return;
        }

        // A build never reads tiers newer than it was written against
        let reader_schema = self.session.local_version.min(CURRENT_SCHEMA);
        let host_settings = match NetworkSettings::from_bytes_with_schema(payload, &reader_schema)
        {
            Ok(settings) => settings,
            Err(err) => {
                error!("Failed to decode settings from host: {}", err);
                self.finish_sync_with(SyncOutcome::SyncedLocalOnly, None);
                return;
            }
        };

        let host_version = host_settings.version;
        let local_version = self.session.local_version;
        match host_version.cmp(&local_version) {
            Ordering::Greater => warn!(
                "Host successfully synced with newer version {}. We're running outdated {}",
                host_version, local_version
            ),
            Ordering::Less => warn!(
                "Host successfully synced with outdated version {}. We're running {}",
                host_version, local_version
            ),
            Ordering::Equal => info!("Host successfully synced with version {}", host_version),
        }

        self.finish_sync_with(SyncOutcome::SyncedWithHost, Some(host_settings));
    }

    pub(crate) fn receive_disconnect(&self, client: PeerId) {
        let removed = self
            .session
            .lock_state()
            .peers
            .as_mut()
            .map(|peers| peers.remove(&client))
            .unwrap_or(false);

        if removed {
            info!("Synced client {} disconnected.", client);
        }
    }

    /// Falls back to local settings once a client has waited `timeout`
    /// for the host. Returns true if this call settled the handshake.
    pub(crate) fn expire_handshake(&self, now: &Instant, timeout: Duration) -> bool {
        let expired = {
            let state = self.session.lock_state();
            match state.contact_sent_at {
                Some(sent_at) if !state.sync_state.is_terminal() => {
                    now.duration_since(&sent_at) >= timeout
                }
                _ => false,
            }
        };

        if !expired {
            return false;
        }

        warn!(
            "Host did not answer the settings handshake within {:?}",
            timeout
        );
        self.finish_sync_with(SyncOutcome::SyncedLocalOnly, None)
    }

    pub(crate) fn mark_contact_sent(&self, now: Instant) {
        self.session.lock_state().contact_sent_at = Some(now);
    }
}
