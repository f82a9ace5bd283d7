#![cfg(feature = "async")]

use core::time::Duration;
use futures::executor::block_on;
use libplatform::mock::{MockClock, MockSerial, MockSystem, MockTime};
use libplatform::serial::{AsyncSerial, Serial};
use libplatform::system::{AsyncSystem, SleepConfig, SleepMode, WakeupReason};
use libplatform::time::{AsyncTimeProvider, TimeProvider};

#[test]
fn test_async_delay() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    block_on(AsyncTimeProvider::delay(&mut time, 250));
    assert_eq!(time.millis(), 250);
}

#[test]
fn test_async_flush() {
    let clock = MockClock::new();
    let mut serial = MockSerial::new(&clock);
    serial.begin(9600);
    serial.print_str("ping");
    block_on(AsyncSerial::flush(&mut serial));
    assert!(serial.pending().is_empty());
    assert_eq!(serial.output(), "ping");
}

#[test]
fn test_async_wait_and_sleep() {
    let clock = MockClock::new();
    let mut system = MockSystem::new(&clock);

    let met = block_on(AsyncSystem::wait_for_condition(
        &mut system,
        &mut || clock.uptime_ms() >= 100,
        Duration::from_secs(1),
    ));
    assert!(met);

    let config = SleepConfig::new(SleepMode::Stop).with_duration(Duration::from_millis(400));
    let reason = block_on(AsyncSystem::sleep(&mut system, &config));
    assert_eq!(reason, WakeupReason::ByRtc);
    assert_eq!(clock.uptime_ms(), 500);
}

#[test]
fn test_async_tasks_share_clock() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    let mut serial = MockSerial::new(&clock);
    serial.begin(1000);
    serial.print_str("x");

    block_on(async {
        AsyncSerial::flush(&mut serial).await;
        AsyncTimeProvider::delay(&mut time, 5).await;
    });
    // One 10-bit frame at 1000 baud, then the delay.
    assert_eq!(clock.uptime_ms(), 15);
}
