pub mod recorder;

pub use recorder::SyncRecorder;
pub use test_peer::{test_protocol, TestPeer};
pub use test_settings::{custom_settings, settings_source};
