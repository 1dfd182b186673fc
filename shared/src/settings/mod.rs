mod error;
mod network_settings;
mod scan_node;
mod tier;

pub use error::ConfigError;
pub use network_settings::NetworkSettings;
pub use scan_node::ScanNodeOptions;
pub use tier::CURRENT_SCHEMA;
