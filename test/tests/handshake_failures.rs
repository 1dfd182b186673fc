//! A client whose handshake can't complete still ends up with a definite
//! outcome and keeps its local settings

use std::time::Duration;

use cruiser_sync::{SessionLifecycle, SyncConfig, SyncOutcome, SyncState};
use cruiser_sync_shared::{BitWriter, Instant, NetworkSettings, Serde, Version, CURRENT_SCHEMA};
use cruiser_sync_test::{custom_settings, LocalHub, TestPeer};

const HOST: u64 = 1;
const CLIENT: u64 = 2;
const CONFIG_WIRE_NAME: &str = "CruiserImproved.SendConfigClientRpc";

fn init_logger() {
    env_logger::builder().is_test(true).try_init().ok();
}

fn later_by(duration: Duration) -> Instant {
    let mut instant = Instant::now();
    instant.add_duration(duration);
    instant
}

/// A client whose host never runs a coordinator, so contact goes unanswered
fn unanswered_client(hub: &LocalHub, config: SyncConfig) -> TestPeer {
    let mut client = TestPeer::with_config(hub, CLIENT, config, custom_settings(CURRENT_SCHEMA));
    client.init();
    hub.deliver_all();
    client
}

#[test]
fn unanswered_client_falls_back_after_timeout() {
    init_logger();

    let hub = LocalHub::new(HOST, 1);
    let client = unanswered_client(&hub, SyncConfig::default());
    assert_eq!(client.coordinator.lifecycle(), SessionLifecycle::ClientPending);

    assert!(!client.coordinator.update(&Instant::now()));
    assert_eq!(client.coordinator.sync_state(), Some(SyncState::Pending));

    assert!(client.coordinator.update(&later_by(Duration::from_secs(10))));
    assert_eq!(
        client.coordinator.lifecycle(),
        SessionLifecycle::Synced(SyncOutcome::SyncedLocalOnly)
    );
    assert_eq!(client.recorder.outcomes(), vec![SyncOutcome::SyncedLocalOnly]);
    assert_eq!(
        client.coordinator.settings(),
        Some(custom_settings(CURRENT_SCHEMA))
    );

    // already settled
    assert!(!client.coordinator.update(&later_by(Duration::from_secs(60))));
    assert_eq!(client.recorder.outcomes().len(), 1);
}

#[test]
fn custom_timeout_is_respected() {
    init_logger();

    let hub = LocalHub::new(HOST, 1);
    let config = SyncConfig {
        handshake_timeout: Some(Duration::from_secs(2)),
        ..Default::default()
    };
    let client = unanswered_client(&hub, config);

    assert!(client.coordinator.update(&later_by(Duration::from_secs(2))));
    assert_eq!(
        client.coordinator.sync_state(),
        Some(SyncState::SyncedLocalOnly)
    );
}

#[test]
fn disabled_timeout_waits_forever() {
    init_logger();

    let hub = LocalHub::new(HOST, 1);
    let config = SyncConfig {
        handshake_timeout: None,
        ..Default::default()
    };
    let client = unanswered_client(&hub, config);

    assert!(!client.coordinator.update(&later_by(Duration::from_secs(3600))));
    assert_eq!(client.coordinator.lifecycle(), SessionLifecycle::ClientPending);
    assert!(client.recorder.outcomes().is_empty());
}

#[test]
fn update_is_a_no_op_for_host_and_uninitialized_peers() {
    init_logger();

    let hub = LocalHub::new(HOST, 1);
    let mut host = TestPeer::new(&hub, HOST, CURRENT_SCHEMA, NetworkSettings::default());
    assert!(!host.coordinator.update(&later_by(Duration::from_secs(60))));

    host.init();
    assert!(!host.coordinator.update(&later_by(Duration::from_secs(60))));
    assert_eq!(host.recorder.outcomes(), vec![SyncOutcome::SyncedWithHost]);
}

#[test]
fn reply_after_timeout_is_ignored() {
    init_logger();

    let hub = LocalHub::new(HOST, 1);
    let client = unanswered_client(&hub, SyncConfig::default());
    assert!(client.coordinator.update(&later_by(Duration::from_secs(10))));

    let mut host_settings = custom_settings(CURRENT_SCHEMA);
    host_settings.sync_seat = false;
    host_settings.max_critical_hit_count = 9;
    hub.inject(HOST, CLIENT, CONFIG_WIRE_NAME, &host_settings.to_bytes());
    assert_eq!(hub.deliver_all(), 1);

    assert_eq!(
        client.coordinator.sync_state(),
        Some(SyncState::SyncedLocalOnly)
    );
    assert_eq!(
        client.coordinator.settings(),
        Some(custom_settings(CURRENT_SCHEMA))
    );
    assert_eq!(client.recorder.outcomes(), vec![SyncOutcome::SyncedLocalOnly]);
}

#[test]
fn unreadable_settings_fall_back_to_local() {
    init_logger();

    let hub = LocalHub::new(HOST, 1);
    let client = unanswered_client(&hub, SyncConfig::default());

    hub.inject(HOST, CLIENT, CONFIG_WIRE_NAME, &[]);
    hub.deliver_all();

    assert_eq!(
        client.coordinator.lifecycle(),
        SessionLifecycle::Synced(SyncOutcome::SyncedLocalOnly)
    );
    assert_eq!(
        client.coordinator.settings(),
        Some(custom_settings(CURRENT_SCHEMA))
    );
}

#[test]
fn truncated_settings_fall_back_to_local() {
    init_logger();

    let hub = LocalHub::new(HOST, 1);
    let client = unanswered_client(&hub, SyncConfig::default());

    let mut host_settings = NetworkSettings::new(CURRENT_SCHEMA);
    host_settings.allow_lean = true;
    let bytes = host_settings.to_bytes();
    hub.inject(HOST, CLIENT, CONFIG_WIRE_NAME, &bytes[..bytes.len() / 2]);
    hub.deliver_all();

    assert_eq!(
        client.coordinator.sync_state(),
        Some(SyncState::SyncedLocalOnly)
    );
    // nothing from the partial payload leaks into the session
    assert_eq!(
        client.coordinator.settings(),
        Some(custom_settings(CURRENT_SCHEMA))
    );
    assert_eq!(client.recorder.outcomes(), vec![SyncOutcome::SyncedLocalOnly]);
}

#[test]
fn malformed_host_version_falls_back_to_local() {
    init_logger();

    let hub = LocalHub::new(HOST, 1);
    let client = unanswered_client(&hub, SyncConfig::default());

    let mut writer = BitWriter::new();
    String::from("one.two.three").ser(&mut writer);
    hub.inject(HOST, CLIENT, CONFIG_WIRE_NAME, &writer.to_bytes());
    hub.deliver_all();

    assert_eq!(
        client.coordinator.sync_state(),
        Some(SyncState::SyncedLocalOnly)
    );
}

#[test]
fn settings_from_a_non_host_peer_are_ignored() {
    init_logger();

    let hub = LocalHub::new(HOST, 1);
    let client = unanswered_client(&hub, SyncConfig::default());

    hub.inject(
        3,
        CLIENT,
        CONFIG_WIRE_NAME,
        &NetworkSettings::default().to_bytes(),
    );
    hub.deliver_all();

    assert_eq!(client.coordinator.lifecycle(), SessionLifecycle::ClientPending);
    assert!(client.recorder.outcomes().is_empty());
}

#[test]
fn failed_contact_settles_local_only_during_init() {
    init_logger();

    let hub = LocalHub::new(HOST, 1);
    hub.fail_sends_from(CLIENT, true);

    let mut client = TestPeer::new(
        &hub,
        CLIENT,
        Version::new(1, 4, 0),
        custom_settings(CURRENT_SCHEMA),
    );
    client.init();

    assert_eq!(
        client.coordinator.lifecycle(),
        SessionLifecycle::Synced(SyncOutcome::SyncedLocalOnly)
    );
    assert_eq!(client.recorder.outcomes(), vec![SyncOutcome::SyncedLocalOnly]);

    // the local settings carry this peer's own version
    let Some(settings) = client.recorder.last_settings() else {
        panic!("sync hook should have run");
    };
    assert_eq!(settings.version, Version::new(1, 4, 0));
    assert!(hub.sent_messages().is_empty());
}
