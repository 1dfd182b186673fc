use std::sync::Arc;

use log::{info, warn};

use cruiser_sync_shared::{
    DisconnectKey, HostType, Instant, MessageHandler, NetworkSettings, PeerId, Protocol,
    ProtocolError, Transport, CONFIG_MESSAGE, CONTACT_MESSAGE,
};

use crate::{
    handshake::write_contact,
    hooks::{SessionMessageHandler, SyncHooks},
    session::{Session, SessionLifecycle, SyncOutcome, SyncState},
    SettingsSource, SyncConfig, SyncCoordinatorError, SyncHandle,
};

/// Runs the settings handshake for one peer, one session at a time.
///
/// On the host, the locally loaded settings are authoritative and the
/// session is synced as soon as it starts. On a client, the session waits
/// for the host to answer its contact message, falling back to local-only
/// behaviour if the answer never comes or can't be read.
pub struct SyncCoordinator {
    config: SyncConfig,
    protocol: Protocol,
    settings_source: Box<dyn SettingsSource>,
    hooks: SyncHooks,
    message_handlers: Vec<(String, SessionMessageHandler)>,
    session: Option<SyncHandle>,
    disconnect_key: Option<DisconnectKey>,
    registered_names: Vec<String>,
}

impl SyncCoordinator {
    /// Create a new SyncCoordinator
    pub fn new<P: Into<Protocol>, S: SettingsSource + 'static>(
        config: SyncConfig,
        protocol: P,
        settings_source: S,
    ) -> Self {
        let mut protocol: Protocol = protocol.into();
        if !protocol.is_locked() {
            protocol.lock();
        }

        Self {
            config,
            protocol,
            settings_source: Box::new(settings_source),
            hooks: SyncHooks::default(),
            message_handlers: Vec::new(),
            session: None,
            disconnect_key: None,
            registered_names: Vec::new(),
        }
    }

    // Hooks & handlers. All take effect from the next `init`.

    /// Called exactly once per session, when the handshake settles
    pub fn on_sync<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&SyncHandle, SyncOutcome, &NetworkSettings) + Send + Sync + 'static,
    {
        self.hooks.on_sync = Some(Arc::new(hook));
        self
    }

    /// Called on the host after each client's contact has been answered
    pub fn on_peer_synced<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&SyncHandle, PeerId) + Send + Sync + 'static,
    {
        self.hooks.on_peer_synced = Some(Arc::new(hook));
        self
    }

    /// Routes a gameplay message declared in the Protocol to `handler`.
    /// Replaces any handler already added under `name`.
    pub fn add_message_handler<F>(
        &mut self,
        name: &str,
        handler: F,
    ) -> Result<(), SyncCoordinatorError>
    where
        F: Fn(&SyncHandle, PeerId, &[u8]) + Send + Sync + 'static,
    {
        if Protocol::is_handshake_message(name) {
            return Err(ProtocolError::ReservedName {
                name: name.to_string(),
            }
            .into());
        }
        if !self.protocol.has_message(name) {
            return Err(ProtocolError::UnknownMessage {
                name: name.to_string(),
            }
            .into());
        }

        let handler: SessionMessageHandler = Arc::new(handler);
        match self.message_handlers.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = handler,
            None => self.message_handlers.push((name.to_string(), handler)),
        }
        Ok(())
    }

    /// Stops routing `name`, including for the live session. Returns false
    /// if no handler was added under that name.
    pub fn remove_message_handler(&mut self, transport: &mut dyn Transport, name: &str) -> bool {
        let Some(index) = self.message_handlers.iter().position(|(n, _)| n == name) else {
            return false;
        };
        self.message_handlers.remove(index);

        let wire_name = self.protocol.wire_name(name);
        if let Some(index) = self.registered_names.iter().position(|n| *n == wire_name) {
            self.registered_names.remove(index);
            transport.unregister_handler(&wire_name);
        }
        true
    }

    // Lifecycle

    /// Starts a session over `transport`. A live session is cleaned up
    /// first.
    pub fn init(&mut self, transport: &mut dyn Transport) {
        if self.session.is_some() {
            warn!("SyncCoordinator::init() called with a live session. Cleaning it up first");
            self.cleanup(transport);
        }

        let host_type = transport.host_type();
        let local_version = self.config.local_version;

        let mut settings = self.settings_source.load();
        settings.version = local_version;

        let handle = SyncHandle::new(Session::new(
            host_type,
            transport.local_id(),
            transport.host_id(),
            local_version,
            self.protocol.clone(),
            transport.sender_cloned(),
            self.hooks.clone(),
            settings,
        ));
        self.session = Some(handle.clone());

        for (name, handler) in &self.message_handlers {
            let wire_name = self.protocol.wire_name(name);
            let handler = handler.clone();
            let handle = handle.clone();
            transport.register_handler(
                &wire_name,
                Box::new(move |peer: PeerId, payload: &[u8]| {
                    handler(&handle, peer, payload)
                }),
            );
            self.registered_names.push(wire_name);
        }

        match host_type {
            HostType::Host => {
                let contact_handle = handle.clone();
                self.register(
                    transport,
                    CONTACT_MESSAGE,
                    Box::new(move |client: PeerId, payload: &[u8]| {
                        contact_handle.receive_contact(client, payload)
                    }),
                );

                let disconnect_handle = handle.clone();
                self.disconnect_key = Some(transport.subscribe_disconnect(Box::new(
                    move |client: PeerId| disconnect_handle.receive_disconnect(client),
                )));

                handle.finish_sync_with(SyncOutcome::SyncedWithHost, None);
                info!("Setup as host!");
            }
            HostType::Client => {
                let config_handle = handle.clone();
                self.register(
                    transport,
                    CONFIG_MESSAGE,
                    Box::new(move |host: PeerId, payload: &[u8]| {
                        config_handle.receive_config(host, payload)
                    }),
                );

                handle.mark_contact_sent(Instant::now());
                let payload = write_contact(&local_version);
                if let Err(err) = handle.send_to_host(CONTACT_MESSAGE, &payload, true) {
                    warn!("Failed to contact host: {}", err);
                    handle.finish_sync_with(SyncOutcome::SyncedLocalOnly, None);
                }
                info!("Setup as client!");
            }
        }
    }

    /// Ends the session: unsubscribes and unregisters everything `init` put
    /// on the transport and discards the session state. Safe to call at any
    /// time.
    pub fn cleanup(&mut self, transport: &mut dyn Transport) {
        if let Some(key) = self.disconnect_key.take() {
            transport.unsubscribe_disconnect(key);
        }
        for wire_name in self.registered_names.drain(..) {
            transport.unregister_handler(&wire_name);
        }
        if let Some(handle) = self.session.take() {
            handle.close();
            info!("Sync session cleaned up");
        }
    }

    /// Must be called regularly by a client so a host that never answers
    /// can't leave the session pending. Returns true if this call settled
    /// the handshake.
    pub fn update(&self, now: &Instant) -> bool {
        let (Some(handle), Some(timeout)) = (&self.session, self.config.handshake_timeout) else {
            return false;
        };
        handle.expire_handshake(now, timeout)
    }

    // Accessors

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn lifecycle(&self) -> SessionLifecycle {
        match self.session.as_ref().map(SyncHandle::sync_state) {
            None => SessionLifecycle::Uninitialized,
            Some(SyncState::Pending) => SessionLifecycle::ClientPending,
            Some(SyncState::SyncedWithHost) => {
                SessionLifecycle::Synced(SyncOutcome::SyncedWithHost)
            }
            Some(SyncState::SyncedLocalOnly) => {
                SessionLifecycle::Synced(SyncOutcome::SyncedLocalOnly)
            }
        }
    }

    /// `None` outside of a session
    pub fn sync_state(&self) -> Option<SyncState> {
        self.session.as_ref().map(SyncHandle::sync_state)
    }

    /// The settings every synchronized system should use. `None` outside of
    /// a session.
    pub fn settings(&self) -> Option<NetworkSettings> {
        self.session.as_ref().map(SyncHandle::settings)
    }

    pub fn synced_peers(&self) -> Vec<PeerId> {
        self.session
            .as_ref()
            .map(SyncHandle::synced_peers)
            .unwrap_or_default()
    }

    pub fn handle(&self) -> Option<&SyncHandle> {
        self.session.as_ref()
    }

    // Session operations

    pub fn finish_sync(&self, success: bool) -> Result<bool, SyncCoordinatorError> {
        self.live()?.finish_sync(success)
    }

    pub fn send_to_one(
        &self,
        name: &str,
        target: PeerId,
        payload: &[u8],
    ) -> Result<(), SyncCoordinatorError> {
        self.live()?.send_to_one(name, target, payload)
    }

    pub fn send_to_set(
        &self,
        name: &str,
        targets: &[PeerId],
        payload: &[u8],
    ) -> Result<(), SyncCoordinatorError> {
        self.live()?.send_to_set(name, targets, payload)
    }

    pub fn send_to_all_synced_peers(
        &self,
        name: &str,
        payload: &[u8],
    ) -> Result<(), SyncCoordinatorError> {
        self.live()?.send_to_all_synced_peers(name, payload)
    }

    pub fn send_to_host(
        &self,
        name: &str,
        payload: &[u8],
        force: bool,
    ) -> Result<bool, SyncCoordinatorError> {
        self.live()?.send_to_host(name, payload, force)
    }

    // Private methods

    fn live(&self) -> Result<&SyncHandle, SyncCoordinatorError> {
        self.session
            .as_ref()
            .ok_or(SyncCoordinatorError::NotInitialized)
    }

    fn register(
        &mut self,
        transport: &mut dyn Transport,
        name: &str,
        handler: MessageHandler,
    ) {
        let wire_name = self.protocol.wire_name(name);
        transport.register_handler(&wire_name, handler);
        self.registered_names.push(wire_name);
    }
}
