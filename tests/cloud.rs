use core::time::Duration;
use libplatform::cloud::{Cloud, ConnectionState, DisconnectOptions, SyncPolicy};
use libplatform::mock::{DEFAULT_SERVER_EPOCH, MockClock, MockCloud, MockSystem, MockTime};
use libplatform::system::System;
use libplatform::time::TimeProvider;

const TIMEOUT: Duration = Duration::from_secs(5);

fn connect(cloud: &mut dyn Cloud, system: &mut dyn System) -> bool {
    cloud.connect();
    system.wait_for_condition(&mut || cloud.process(), TIMEOUT)
}

/// Application logic under test: request two syncs back to back, then wait
/// for synchronization to settle.
fn double_sync(cloud: &mut dyn Cloud, system: &mut dyn System) -> (bool, bool, bool) {
    let first = cloud.sync_time();
    let second = cloud.sync_time();
    let settled = system.wait_for_condition(
        &mut || {
            cloud.process();
            cloud.sync_time_done()
        },
        TIMEOUT,
    );
    (first, second, settled)
}

#[test]
fn test_connect_takes_latency() {
    let clock = MockClock::new();
    let mut system = MockSystem::new(&clock);
    let mut cloud = MockCloud::new(&clock).with_connect_latency(Duration::from_millis(250));

    assert!(!cloud.connected());
    assert!(connect(&mut cloud, &mut system));
    assert_eq!(cloud.state(), ConnectionState::Connected);
    assert_eq!(clock.uptime_ms(), 250);
}

#[test]
fn test_connect_is_idempotent() {
    let clock = MockClock::new();
    let mut cloud = MockCloud::new(&clock);
    cloud.connect();
    clock.advance_ms(300);
    cloud.connect();
    clock.advance_ms(200);
    assert!(cloud.process());
}

#[test]
fn test_unreachable_service() {
    let clock = MockClock::new();
    let mut system = MockSystem::new(&clock);
    let mut cloud = MockCloud::new(&clock);
    cloud.set_reachable(false);

    assert!(!connect(&mut cloud, &mut system));
    assert_eq!(cloud.state(), ConnectionState::Connecting);

    cloud.set_reachable(true);
    assert!(cloud.process());
}

#[test]
fn test_sync_requires_connection() {
    let clock = MockClock::new();
    let mut cloud = MockCloud::new(&clock);
    assert!(!cloud.sync_time());
    assert!(!cloud.sync_time_pending());
    assert!(!cloud.sync_time_done());
}

#[test]
fn test_sync_sets_wall_clock() {
    let clock = MockClock::new();
    let mut system = MockSystem::new(&clock);
    let time = MockTime::new(&clock);
    let mut cloud = MockCloud::new(&clock).with_server_time(1_749_976_245);

    assert!(connect(&mut cloud, &mut system));
    assert!(!time.is_valid());

    assert!(cloud.sync_time());
    assert!(cloud.sync_time_pending());
    assert!(!cloud.sync_time_done());

    assert!(system.wait_for_condition(
        &mut || {
            cloud.process();
            cloud.sync_time_done()
        },
        TIMEOUT
    ));
    assert!(time.is_valid());
    assert_eq!(time.now(), cloud.server_time());
    assert_eq!(time.year(), 2025);
}

#[test]
fn test_reject_policy() {
    let clock = MockClock::new();
    let mut system = MockSystem::new(&clock);
    let mut cloud = MockCloud::new(&clock).with_policy(SyncPolicy::Reject);
    assert!(connect(&mut cloud, &mut system));

    assert_eq!(double_sync(&mut cloud, &mut system), (true, false, true));
    assert_eq!(cloud.syncs_completed(), 1);
}

#[test]
fn test_queue_policy() {
    let clock = MockClock::new();
    let mut system = MockSystem::new(&clock);
    let mut cloud = MockCloud::new(&clock).with_policy(SyncPolicy::Queue);
    assert!(connect(&mut cloud, &mut system));

    let started = clock.uptime_ms();
    assert_eq!(double_sync(&mut cloud, &mut system), (true, true, true));
    assert_eq!(cloud.syncs_completed(), 2);
    assert_eq!(clock.uptime_ms() - started, 400);
}

#[test]
fn test_restart_policy() {
    let clock = MockClock::new();
    let mut system = MockSystem::new(&clock);
    let mut cloud = MockCloud::new(&clock).with_policy(SyncPolicy::Restart);
    assert!(connect(&mut cloud, &mut system));

    assert!(cloud.sync_time());
    clock.advance_ms(150);
    assert!(cloud.sync_time());
    clock.advance_ms(150);
    assert!(cloud.process());
    assert!(cloud.sync_time_pending());

    clock.advance_ms(50);
    cloud.process();
    assert!(cloud.sync_time_done());
    assert_eq!(cloud.syncs_completed(), 1);
}

#[test]
fn test_connection_loss_abandons_sync() {
    let clock = MockClock::new();
    let mut system = MockSystem::new(&clock);
    let mut cloud = MockCloud::new(&clock);
    assert!(connect(&mut cloud, &mut system));
    assert!(cloud.sync_time());

    cloud.set_reachable(false);
    assert!(!cloud.process());
    assert_eq!(cloud.state(), ConnectionState::Connecting);
    assert!(!cloud.sync_time_pending());
    assert!(!cloud.sync_time_done());

    cloud.set_reachable(true);
    assert!(system.wait_for_condition(&mut || cloud.process(), TIMEOUT));
}

#[test]
fn test_graceful_disconnect_finishes_sync() {
    let clock = MockClock::new();
    let mut system = MockSystem::new(&clock);
    let time = MockTime::new(&clock);
    let mut cloud = MockCloud::new(&clock);
    assert!(connect(&mut cloud, &mut system));
    assert!(cloud.sync_time());

    cloud.disconnect(&DisconnectOptions::graceful(Duration::from_secs(1)));
    assert!(!cloud.connected());
    assert!(cloud.sync_time_done());
    assert!(time.is_valid());
    assert_eq!(time.now(), DEFAULT_SERVER_EPOCH);
}

#[test]
fn test_graceful_disconnect_timeout_cancels_sync() {
    let clock = MockClock::new();
    let mut system = MockSystem::new(&clock);
    let mut cloud = MockCloud::new(&clock);
    assert!(connect(&mut cloud, &mut system));
    assert!(cloud.sync_time());

    let before = clock.uptime_ms();
    cloud.disconnect(&DisconnectOptions::graceful(Duration::from_millis(50)));
    assert_eq!(clock.uptime_ms(), before);
    assert!(!cloud.sync_time_pending());
    assert!(!cloud.sync_time_done());
}

#[test]
fn test_immediate_disconnect() {
    let clock = MockClock::new();
    let mut system = MockSystem::new(&clock);
    let mut cloud = MockCloud::new(&clock);
    assert!(connect(&mut cloud, &mut system));
    assert!(cloud.sync_time());

    let options = DisconnectOptions::immediate();
    cloud.disconnect(&options);
    assert_eq!(cloud.state(), ConnectionState::Disconnected);
    assert_eq!(cloud.last_disconnect(), Some(options));
    assert_eq!(cloud.syncs_completed(), 0);
    assert!(!cloud.process());
}

#[test]
fn test_disconnect_options_json() {
    let parsed = DisconnectOptions::from_json(r#"{"graceful":true,"timeout_ms":2500}"#).unwrap();
    assert_eq!(parsed, DisconnectOptions::graceful(Duration::from_millis(2500)));

    let defaults = DisconnectOptions::from_json("{}").unwrap();
    assert_eq!(defaults, DisconnectOptions::immediate());
    assert_eq!(defaults, DisconnectOptions::default());

    assert!(DisconnectOptions::from_json("not json").is_err());
}
