use cruiser_sync_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{NetworkSettings, ScanNodeOptions, Version};

/// The newest settings schema this build knows how to read and write.
pub const CURRENT_SCHEMA: Version = Version::new(1, 5, 0);

/// A group of fields introduced together at `since`. Tiers are written and
/// read in table order and the first tier a version doesn't reach ends the
/// payload, so new tiers may only ever be appended.
pub(crate) struct Tier {
    pub since: Version,
    pub write: fn(&NetworkSettings, &mut dyn BitWrite),
    pub read: fn(&mut NetworkSettings, &mut BitReader) -> Result<(), SerdeErr>,
}

pub(crate) const TIERS: &[Tier] = &[
    Tier {
        since: Version::new(1, 2, 0),
        write: write_v1_2,
        read: read_v1_2,
    },
    Tier {
        since: Version::new(1, 3, 0),
        write: write_v1_3,
        read: read_v1_3,
    },
    Tier {
        since: Version::new(1, 4, 0),
        write: write_v1_4,
        read: read_v1_4,
    },
    Tier {
        since: Version::new(1, 5, 0),
        write: write_v1_5,
        read: read_v1_5,
    },
];

// v1.2.0

fn write_v1_2(settings: &NetworkSettings, writer: &mut dyn BitWrite) {
    settings.sync_seat.ser(writer);
    if settings.sync_seat {
        settings.seat_boost_scale.ser(writer);
    }
    settings.allow_lean.ser(writer);
    settings.prevent_missile_knockback.ser(writer);
    settings.allow_push_destroyed_car.ser(writer);
    settings.prevent_passengers_ejecting_driver.ser(writer);
    settings.entities_avoid_cruiser.ser(writer);
    settings.silent_collisions.ser(writer);

    settings.cruiser_invulnerability_duration.ser(writer);
    settings.cruiser_critical_invulnerability_duration.ser(writer);
    settings.max_critical_hit_count.ser(writer);

    settings.anti_sideslip.ser(writer);
}

fn read_v1_2(settings: &mut NetworkSettings, reader: &mut BitReader) -> Result<(), SerdeErr> {
    settings.sync_seat = bool::de(reader)?;
    if settings.sync_seat {
        settings.seat_boost_scale = f32::de(reader)?;
    }
    settings.allow_lean = bool::de(reader)?;
    settings.prevent_missile_knockback = bool::de(reader)?;
    settings.allow_push_destroyed_car = bool::de(reader)?;
    settings.prevent_passengers_ejecting_driver = bool::de(reader)?;
    settings.entities_avoid_cruiser = bool::de(reader)?;
    settings.silent_collisions = bool::de(reader)?;

    settings.cruiser_invulnerability_duration = f32::de(reader)?;
    settings.cruiser_critical_invulnerability_duration = f32::de(reader)?;
    settings.max_critical_hit_count = i32::de(reader)?;

    settings.anti_sideslip = bool::de(reader)?;
    Ok(())
}

// v1.3.0

fn write_v1_3(settings: &NetworkSettings, writer: &mut dyn BitWrite) {
    settings.disable_radio_static.ser(writer);
}

fn read_v1_3(settings: &mut NetworkSettings, reader: &mut BitReader) -> Result<(), SerdeErr> {
    settings.disable_radio_static = bool::de(reader)?;
    Ok(())
}

// v1.4.0

fn write_v1_4(settings: &NetworkSettings, writer: &mut dyn BitWrite) {
    settings.handsfree_doors.ser(writer);
    settings.standing_key_removal.ser(writer);
    settings.cruiser_scan_node.ser(writer);
    settings.turbo_exhaust.ser(writer);
}

fn read_v1_4(settings: &mut NetworkSettings, reader: &mut BitReader) -> Result<(), SerdeErr> {
    settings.handsfree_doors = bool::de(reader)?;
    settings.standing_key_removal = bool::de(reader)?;
    settings.cruiser_scan_node = ScanNodeOptions::de(reader)?;
    settings.turbo_exhaust = bool::de(reader)?;
    Ok(())
}

// v1.5.0

fn write_v1_5(settings: &NetworkSettings, writer: &mut dyn BitWrite) {
    settings.scan_while_seated.ser(writer);
    settings.cabin_light_toggle.ser(writer);
}

fn read_v1_5(settings: &mut NetworkSettings, reader: &mut BitReader) -> Result<(), SerdeErr> {
    settings.scan_while_seated = bool::de(reader)?;
    settings.cabin_light_toggle = bool::de(reader)?;
    Ok(())
}
