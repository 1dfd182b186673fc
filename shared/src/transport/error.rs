use thiserror::Error;

use crate::PeerId;

/// Errors a transport can report when handing a message to the bus
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The bus refused or failed to queue the message
    #[error("Failed to send message {name:?} to peer {target}")]
    SendFailed { name: String, target: PeerId },

    /// The target is not connected to this session
    #[error("Peer {peer} is not connected to this session")]
    UnknownPeer { peer: PeerId },
}
