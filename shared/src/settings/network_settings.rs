use cruiser_sync_serde::{BitReader, BitWrite, BitWriter, Serde};
use log::debug;

use super::tier::{CURRENT_SCHEMA, TIERS};
use crate::{ConfigError, ScanNodeOptions, Version};

/// Settings the host is authoritative for. `version` records which peer
/// build produced the instance and decides which tiers go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSettings {
    pub version: Version,

    // v1.2.0
    pub sync_seat: bool,
    /// Only on the wire when `sync_seat` is set
    pub seat_boost_scale: f32,
    pub allow_lean: bool,
    pub prevent_missile_knockback: bool,
    pub allow_push_destroyed_car: bool,
    pub prevent_passengers_ejecting_driver: bool,
    pub entities_avoid_cruiser: bool,
    pub silent_collisions: bool,
    pub cruiser_invulnerability_duration: f32,
    pub cruiser_critical_invulnerability_duration: f32,
    pub max_critical_hit_count: i32,
    pub anti_sideslip: bool,

    // v1.3.0
    pub disable_radio_static: bool,

    // v1.4.0
    pub handsfree_doors: bool,
    pub standing_key_removal: bool,
    pub cruiser_scan_node: ScanNodeOptions,
    pub turbo_exhaust: bool,

    // v1.5.0
    pub scan_while_seated: bool,
    pub cabin_light_toggle: bool,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self::new(CURRENT_SCHEMA)
    }
}

impl NetworkSettings {
    /// All fields at their defaults, stamped with `version`
    pub fn new(version: Version) -> Self {
        Self {
            version,
            sync_seat: false,
            seat_boost_scale: 0.0,
            allow_lean: false,
            prevent_missile_knockback: false,
            allow_push_destroyed_car: false,
            prevent_passengers_ejecting_driver: false,
            entities_avoid_cruiser: false,
            silent_collisions: false,
            cruiser_invulnerability_duration: 0.0,
            cruiser_critical_invulnerability_duration: 0.0,
            max_critical_hit_count: 0,
            anti_sideslip: false,
            disable_radio_static: false,
            handsfree_doors: false,
            standing_key_removal: false,
            cruiser_scan_node: ScanNodeOptions::Unchanged,
            turbo_exhaust: false,
            scan_while_seated: false,
            cabin_light_toggle: false,
        }
    }

    /// The schema version of every tier, oldest first
    pub fn tier_versions() -> impl Iterator<Item = Version> {
        TIERS.iter().map(|tier| tier.since)
    }

    /// Number of tiers a payload stamped with `version` carries
    pub fn tiers_for(version: &Version) -> usize {
        TIERS.iter().take_while(|tier| *version >= tier.since).count()
    }

    pub fn ser(&self, writer: &mut dyn BitWrite) {
        self.version.to_string().ser(writer);

        for tier in TIERS {
            if self.version < tier.since {
                return;
            }
            (tier.write)(self, writer);
        }
    }

    /// Reads a payload written by any peer, assuming this build's schema.
    pub fn de(reader: &mut BitReader) -> Result<Self, ConfigError> {
        Self::de_with_schema(reader, &CURRENT_SCHEMA)
    }

    /// Reads a payload as a build that only knows tiers up to `reader_schema`.
    ///
    /// The embedded version (the writer's) decides where the payload stops;
    /// `reader_schema` additionally stops before tiers the reader can't
    /// interpret. Those are always trailing, so the unread bytes are ignored.
    /// Fields of tiers that aren't read keep their defaults.
    pub fn de_with_schema(
        reader: &mut BitReader,
        reader_schema: &Version,
    ) -> Result<Self, ConfigError> {
        let version_string = String::de(reader).map_err(ConfigError::Version)?;
        let version = Version::parse(&version_string)?;

        let mut settings = Self::new(version);
        for tier in TIERS {
            if version < tier.since {
                break;
            }
            if *reader_schema < tier.since {
                debug!(
                    "Settings {} carry tiers newer than {}, leaving them unread",
                    version, reader_schema
                );
                break;
            }
            (tier.read)(&mut settings, reader).map_err(|source| ConfigError::Decode {
                tier: tier.since,
                source,
            })?;
        }

        Ok(settings)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::new();
        self.ser(&mut writer);
        writer.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let mut reader = BitReader::new(bytes);
        Self::de(&mut reader)
    }

    pub fn from_bytes_with_schema(
        bytes: &[u8],
        reader_schema: &Version,
    ) -> Result<Self, ConfigError> {
        let mut reader = BitReader::new(bytes);
        Self::de_with_schema(&mut reader, reader_schema)
    }
}
