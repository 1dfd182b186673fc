//! # Cruiser Sync
//! Negotiates one authoritative set of settings between the host of a game
//! session and every client that speaks the protocol, tolerating peers
//! running older or newer builds.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use cruiser_sync_shared::{
        HostType, Instant, NetworkSettings, PeerId, Protocol, ScanNodeOptions, Transport,
        Version, CURRENT_SCHEMA,
    };
}

mod coordinator;
mod error;
mod handle;
mod handshake;
mod hooks;
mod peer_registry;
mod session;
mod settings_source;
mod sync_config;

pub use coordinator::SyncCoordinator;
pub use error::SyncCoordinatorError;
pub use handle::SyncHandle;
pub use hooks::{PeerSyncedHook, SessionMessageHandler, SyncHook};
pub use peer_registry::PeerRegistry;
pub use session::{SessionLifecycle, SyncOutcome, SyncState};
pub use settings_source::SettingsSource;
pub use sync_config::SyncConfig;
