pub mod error;
pub use error::ProtocolError;

/// Prefix shared by every message this protocol puts on the bus, so it can't
/// collide with unrelated traffic.
pub const DEFAULT_NAMESPACE: &str = "CruiserImproved";

// Handshake
pub const CONTACT_MESSAGE: &str = "ContactServerRpc";
pub const CONFIG_MESSAGE: &str = "SendConfigClientRpc";

// Routed on behalf of gameplay systems, never interpreted here
pub const SYNC_STEERING_MESSAGE: &str = "SyncSteeringRpc";
pub const SYNC_RADIO_TIME_MESSAGE: &str = "SyncRadioTimeRpc";
pub const TOGGLE_CAB_LIGHT_MESSAGE: &str = "ToggleCabLightRpc";

const HANDSHAKE_MESSAGES: [&str; 2] = [CONTACT_MESSAGE, CONFIG_MESSAGE];

// Protocol
#[derive(Clone, Debug)]
pub struct Protocol {
    namespace: String,
    message_names: Vec<String>,
    locked: bool,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            message_names: Vec::new(),
            locked: false,
        }
    }
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if the Protocol is locked or the namespace is invalid.
    pub fn namespace(&mut self, namespace: &str) -> &mut Self {
        if let Err(err) = self.try_namespace(namespace) {
            panic!("{}", err);
        }
        self
    }

    /// Adds the steering, radio time and cab light messages
    pub fn add_default_messages(&mut self) -> &mut Self {
        self.check_lock();
        for name in [
            SYNC_STEERING_MESSAGE,
            SYNC_RADIO_TIME_MESSAGE,
            TOGGLE_CAB_LIGHT_MESSAGE,
        ] {
            self.push_message(name);
        }
        self
    }

    /// # Panics
    ///
    /// Panics if the Protocol is locked or the name is reserved or invalid.
    pub fn add_message(&mut self, name: &str) -> &mut Self {
        if let Err(err) = self.try_add_message(name) {
            panic!("{}", err);
        }
        self
    }

    // Non-panicking builder methods

    pub fn try_namespace(&mut self, namespace: &str) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        if !is_valid_segment(namespace) {
            return Err(ProtocolError::InvalidNamespace {
                namespace: namespace.to_string(),
            });
        }
        self.namespace = namespace.to_string();
        Ok(self)
    }

    pub fn try_add_message(&mut self, name: &str) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        if !is_valid_segment(name) {
            return Err(ProtocolError::InvalidName {
                name: name.to_string(),
            });
        }
        if HANDSHAKE_MESSAGES.contains(&name) {
            return Err(ProtocolError::ReservedName {
                name: name.to_string(),
            });
        }
        self.push_message(name);
        Ok(self)
    }

    pub fn try_lock(&mut self) -> Result<(), ProtocolError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    /// Checks if protocol is locked without panicking
    pub fn try_check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    pub fn check_lock(&self) {
        if let Err(err) = self.try_check_lock() {
            panic!("{}", err);
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // Lookup

    pub fn namespace_str(&self) -> &str {
        &self.namespace
    }

    pub fn message_names(&self) -> impl Iterator<Item = &str> {
        self.message_names.iter().map(String::as_str)
    }

    pub fn has_message(&self, name: &str) -> bool {
        HANDSHAKE_MESSAGES.contains(&name) || self.message_names.iter().any(|n| n == name)
    }

    pub fn is_handshake_message(name: &str) -> bool {
        HANDSHAKE_MESSAGES.contains(&name)
    }

    /// The name a message travels under on the bus
    pub fn wire_name(&self, name: &str) -> String {
        format!("{}.{}", self.namespace, name)
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }

    fn push_message(&mut self, name: &str) {
        if !self.message_names.iter().any(|n| n == name) {
            self.message_names.push(name.to_string());
        }
    }
}

// One dot-free component of a wire name
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains('.')
}
