use thiserror::Error;

use cruiser_sync_shared::{HostType, ProtocolError, TransportError};

/// Errors returned by SyncCoordinator operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncCoordinatorError {
    /// An operation reserved for one role was called by the other
    #[error("{operation} may only be called by the {required:?}, but this peer is the {actual:?}")]
    ProtocolMisuse {
        operation: &'static str,
        required: HostType,
        actual: HostType,
    },

    /// No session is active
    #[error("No session is active. SyncCoordinator::init() must be called first")]
    NotInitialized,

    /// The transport failed to send
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The message name is not usable with the current Protocol
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}
