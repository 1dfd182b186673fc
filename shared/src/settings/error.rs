use cruiser_sync_serde::SerdeErr;
use thiserror::Error;

use crate::{Version, VersionParseError};

/// Errors that can occur while decoding a NetworkSettings payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The leading version string could not be read at all
    #[error("Failed to read settings version string: {0}")]
    Version(SerdeErr),

    /// The leading version string was read but is not a valid version
    #[error("Settings payload carries a malformed version: {0}")]
    Parse(#[from] VersionParseError),

    /// The payload ended (or was corrupt) inside a tier's fields
    #[error("Failed to decode settings tier {tier}: {source}. The payload is truncated or corrupt")]
    Decode { tier: Version, source: SerdeErr },
}
