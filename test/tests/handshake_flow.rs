//! End-to-end settings handshake between a host and clients over LocalHub

use cruiser_sync::{SessionLifecycle, SyncConfig, SyncCoordinator, SyncOutcome, SyncState};
use cruiser_sync_shared::{
    NetworkSettings, Protocol, ScanNodeOptions, Transport, Version, CONFIG_MESSAGE,
    CONTACT_MESSAGE, CURRENT_SCHEMA,
};
use cruiser_sync_test::{custom_settings, LocalHub, TestPeer};

const HOST: u64 = 1;

fn init_logger() {
    env_logger::builder().is_test(true).try_init().ok();
}

#[test]
fn host_is_synced_as_soon_as_it_starts() {
    init_logger();

    let hub = LocalHub::new(HOST, 7);
    let mut host = TestPeer::new(&hub, HOST, CURRENT_SCHEMA, custom_settings(CURRENT_SCHEMA));
    assert_eq!(host.coordinator.lifecycle(), SessionLifecycle::Uninitialized);

    host.init();

    assert_eq!(
        host.coordinator.lifecycle(),
        SessionLifecycle::Synced(SyncOutcome::SyncedWithHost)
    );
    assert_eq!(host.recorder.outcomes(), vec![SyncOutcome::SyncedWithHost]);
    assert_eq!(
        host.recorder.last_settings(),
        Some(custom_settings(CURRENT_SCHEMA))
    );
    assert!(host.coordinator.synced_peers().is_empty());
    assert!(hub.sent_messages().is_empty());
}

#[test]
fn matching_client_adopts_host_settings() {
    init_logger();

    let hub = LocalHub::new(HOST, 7);
    let mut host = TestPeer::new(&hub, HOST, CURRENT_SCHEMA, custom_settings(CURRENT_SCHEMA));
    let mut client = TestPeer::new(&hub, 2, CURRENT_SCHEMA, NetworkSettings::default());
    host.init();
    client.init();

    assert_eq!(client.coordinator.lifecycle(), SessionLifecycle::ClientPending);
    assert!(client.recorder.outcomes().is_empty());

    let contacts = hub.sent_named("CruiserImproved.ContactServerRpc");
    assert_eq!(contacts.len(), 1);
    assert_eq!((contacts[0].from, contacts[0].to), (2, HOST));

    assert_eq!(hub.deliver_all(), 2);

    assert_eq!(
        client.coordinator.lifecycle(),
        SessionLifecycle::Synced(SyncOutcome::SyncedWithHost)
    );
    assert_eq!(
        client.coordinator.settings(),
        Some(custom_settings(CURRENT_SCHEMA))
    );
    assert_eq!(client.recorder.outcomes(), vec![SyncOutcome::SyncedWithHost]);
    assert_eq!(
        client.recorder.last_settings(),
        Some(custom_settings(CURRENT_SCHEMA))
    );

    assert_eq!(host.coordinator.synced_peers(), vec![2]);
    assert_eq!(host.recorder.synced_peers(), vec![2]);

    let configs = hub.sent_named("CruiserImproved.SendConfigClientRpc");
    assert_eq!(configs.len(), 1);
    assert_eq!((configs[0].from, configs[0].to), (HOST, 2));
    assert_eq!(
        configs[0].payload,
        custom_settings(CURRENT_SCHEMA).to_bytes()
    );
}

#[test]
fn older_client_keeps_defaults_for_tiers_it_does_not_know() {
    init_logger();

    let host_version = Version::new(1, 4, 0);
    let client_version = Version::new(1, 2, 0);

    let hub = LocalHub::new(HOST, 11);
    let mut host = TestPeer::new(&hub, HOST, host_version, custom_settings(CURRENT_SCHEMA));
    let mut client = TestPeer::new(&hub, 2, client_version, NetworkSettings::default());
    host.init();
    client.init();
    hub.deliver_all();

    let Some(settings) = client.coordinator.settings() else {
        panic!("client session should be live");
    };

    // the host's version travels with its settings
    assert_eq!(settings.version, host_version);

    // v1.2.0 fields come from the host
    assert!(settings.sync_seat);
    assert_eq!(settings.seat_boost_scale, 1.75);
    assert!(settings.allow_lean);
    assert_eq!(settings.cruiser_critical_invulnerability_duration, 2.25);
    assert_eq!(settings.max_critical_hit_count, 3);
    assert!(settings.anti_sideslip);

    // everything newer stays at its default
    assert!(!settings.disable_radio_static);
    assert!(!settings.handsfree_doors);
    assert!(!settings.standing_key_removal);
    assert_eq!(settings.cruiser_scan_node, ScanNodeOptions::Unchanged);
    assert!(!settings.scan_while_seated);

    assert_eq!(client.recorder.outcomes(), vec![SyncOutcome::SyncedWithHost]);
}

#[test]
fn newer_client_reads_only_what_an_older_host_wrote() {
    init_logger();

    let host_version = Version::new(1, 3, 0);

    let hub = LocalHub::new(HOST, 3);
    let mut host = TestPeer::new(&hub, HOST, host_version, custom_settings(CURRENT_SCHEMA));
    let mut client = TestPeer::new(&hub, 2, CURRENT_SCHEMA, custom_settings(CURRENT_SCHEMA));
    host.init();
    client.init();
    hub.deliver_all();

    let Some(settings) = client.coordinator.settings() else {
        panic!("client session should be live");
    };

    assert_eq!(settings.version, host_version);
    assert!(settings.sync_seat);
    assert!(settings.disable_radio_static);

    // the client's own values for newer tiers are replaced by defaults, not kept
    assert!(!settings.handsfree_doors);
    assert!(!settings.turbo_exhaust);
    assert!(!settings.cabin_light_toggle);

    assert_eq!(client.coordinator.sync_state(), Some(SyncState::SyncedWithHost));
}

#[test]
fn many_clients_sync_independently() {
    init_logger();

    let hub = LocalHub::new(HOST, 42);
    let mut host = TestPeer::new(&hub, HOST, CURRENT_SCHEMA, custom_settings(CURRENT_SCHEMA));
    host.init();

    let versions = [
        Version::new(1, 2, 0),
        Version::new(1, 3, 1),
        Version::new(1, 4, 0),
        CURRENT_SCHEMA,
        Version::new(2, 0, 0),
    ];
    let mut clients: Vec<TestPeer> = versions
        .iter()
        .enumerate()
        .map(|(index, version)| {
            TestPeer::new(&hub, 10 + index as u64, *version, NetworkSettings::default())
        })
        .collect();
    for client in clients.iter_mut() {
        client.init();
    }

    hub.deliver_all();

    let mut synced = host.coordinator.synced_peers();
    synced.sort_unstable();
    assert_eq!(synced, vec![10, 11, 12, 13, 14]);

    for (client, version) in clients.iter().zip(versions.iter()) {
        assert_eq!(
            client.coordinator.lifecycle(),
            SessionLifecycle::Synced(SyncOutcome::SyncedWithHost),
            "client at {} should be synced",
            version
        );
        let Some(settings) = client.coordinator.settings() else {
            panic!("client session should be live");
        };
        assert_eq!(settings.version, CURRENT_SCHEMA);
        assert!(settings.sync_seat);
        assert_eq!(settings.handsfree_doors, *version >= Version::new(1, 4, 0));
        assert_eq!(settings.cabin_light_toggle, *version >= Version::new(1, 5, 0));
    }
}

#[test]
fn handshake_messages_use_the_configured_namespace() {
    init_logger();

    let hub = LocalHub::new(HOST, 5);

    let mut protocol = Protocol::builder();
    protocol.namespace("Modded").add_default_messages();
    let protocol = protocol.build();

    let mut host = SyncCoordinator::new(
        SyncConfig::default(),
        protocol.clone(),
        NetworkSettings::default,
    );
    let mut client = SyncCoordinator::new(SyncConfig::default(), protocol, NetworkSettings::default);

    let mut host_transport = hub.connect(HOST);
    let mut client_transport = hub.connect(2);
    assert!(host_transport.is_host());
    assert!(client_transport.is_client());

    host.init(&mut host_transport);
    client.init(&mut client_transport);
    hub.deliver_all();

    assert_eq!(
        hub.handler_names(HOST),
        vec![format!("Modded.{}", CONTACT_MESSAGE)]
    );
    assert_eq!(hub.handler_names(2), vec![format!("Modded.{}", CONFIG_MESSAGE)]);
    assert_eq!(client.sync_state(), Some(SyncState::SyncedWithHost));
    assert!(hub
        .sent_messages()
        .iter()
        .all(|message| message.name.starts_with("Modded.")));
}
