use thiserror::Error;

/// Errors that can occur during protocol operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Protocol is locked and cannot be modified
    #[error("Protocol is already locked and cannot be modified. Protocol.lock() has been called and no further changes are allowed")]
    AlreadyLocked,

    /// Message name collides with a handshake message
    #[error("Message name {name:?} is reserved for the settings handshake")]
    ReservedName { name: String },

    /// Message name is empty or contains the namespace separator
    #[error("Message name {name:?} is invalid. Names must be non-empty and must not contain '.'")]
    InvalidName { name: String },

    /// Namespace is empty or contains the separator
    #[error("Namespace {namespace:?} is invalid. Namespaces must be non-empty and must not contain '.'")]
    InvalidNamespace { namespace: String },

    /// Message was never added to the Protocol
    #[error("Message {name:?} is not registered. Message names must be added with Protocol::add_message()")]
    UnknownMessage { name: String },
}
