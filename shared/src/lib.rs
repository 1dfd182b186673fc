//! # Cruiser Sync Shared
//! Versioned settings codec, protocol message names and the transport
//! contract shared by host & client peers.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

cfg_if! {
    if #[cfg(all(target_arch = "wasm32", not(feature = "wbindgen")))]
    {
        compile_error!("wasm target for 'cruiser_sync_shared' crate requires the 'wbindgen' feature to be enabled.");
    }
}

pub use cruiser_sync_serde::{
    BitReader, BitWrite, BitWriter, Serde, SerdeErr, UnsignedInteger, UnsignedVariableInteger,
};

mod backends;
mod protocol;
mod settings;
mod transport;
mod types;
mod version;

pub use backends::Instant;
pub use protocol::{
    Protocol, ProtocolError, CONFIG_MESSAGE, CONTACT_MESSAGE, DEFAULT_NAMESPACE,
    SYNC_RADIO_TIME_MESSAGE, SYNC_STEERING_MESSAGE, TOGGLE_CAB_LIGHT_MESSAGE,
};
pub use settings::{ConfigError, NetworkSettings, ScanNodeOptions, CURRENT_SCHEMA};
pub use transport::{
    DisconnectHandler, DisconnectKey, MessageHandler, MessageSender, MessageSenderClone,
    Transport, TransportError,
};
pub use types::{HostType, PeerId};
pub use version::{Version, VersionParseError};
