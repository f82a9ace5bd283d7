use libplatform::mock::{MockClock, MockTime};
use libplatform::time::{DateTime, MAX_ZONE_OFFSET, MIN_ZONE_OFFSET, TimeProvider, calendar};
use rand::Rng;

// 2025-06-15 08:30:45 UTC
const T: i64 = 1_749_976_245;

#[test]
fn test_invalid_until_set() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    assert!(!time.is_valid());

    clock.advance_ms(3_500);
    assert_eq!(time.now(), 3);

    time.set_time(T);
    assert!(time.is_valid());
    assert_eq!(time.now(), T);
}

#[test]
fn test_wall_clock_ticks_with_uptime() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    time.set_time(T);
    time.delay(2_500);
    assert_eq!(time.now(), T + 2);
    assert_eq!(time.millis(), 2_500);
}

#[test]
fn test_set_time_does_not_touch_millis() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    time.delay(1_234);
    let before = time.millis();
    time.set_time(T);
    time.set_time(0);
    assert_eq!(time.millis(), before);
}

#[test]
fn test_millis_is_monotonic_across_wall_jumps() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    let mut last = time.millis();
    for (i, t) in [T, T - 86_400, T + 3_600, 0].into_iter().enumerate() {
        time.set_time(t);
        time.delay(i as u32 * 10);
        assert!(time.millis() >= last);
        last = time.millis();
    }
}

#[test]
fn test_millis_wraps() {
    let clock = MockClock::new();
    let time = MockTime::new(&clock);
    clock.advance_ms(u32::MAX as u64 + 6);
    assert_eq!(time.millis(), 5);
}

#[test]
fn test_decomposed_accessors_utc() {
    let clock = MockClock::new();
    let time = MockTime::new(&clock);
    assert_eq!(time.year_at(T), 2025);
    assert_eq!(time.month_at(T), 6);
    assert_eq!(time.day_at(T), 15);
    assert_eq!(time.hour_at(T), 8);
    assert_eq!(time.minute_at(T), 30);
    assert_eq!(time.second_at(T), 45);
}

#[test]
fn test_zone_applies_to_decomposition_only() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    time.set_time(T);
    time.zone(5.5);

    assert_eq!(time.zone_offset(), 5.5);
    assert_eq!(time.now(), T);
    assert_eq!(time.hour(), 14);
    assert_eq!(time.minute(), 0);
    assert_eq!(time.hour_at(T), 14);

    time.zone(-10.0);
    assert_eq!(time.day_at(T), 14);
    assert_eq!(time.hour_at(T), 22);
}

#[test]
fn test_zone_is_clamped() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    time.zone(20.0);
    assert_eq!(time.zone_offset(), MAX_ZONE_OFFSET);
    time.zone(-13.0);
    assert_eq!(time.zone_offset(), MIN_ZONE_OFFSET);
}

#[test]
fn test_date_time_single_read() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    time.set_time(T);
    assert_eq!(
        time.date_time(),
        DateTime {
            year: 2025,
            month: 6,
            day: 15,
            hour: 8,
            minute: 30,
            second: 45,
        }
    );
}

#[test]
fn test_new_year_rollover() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    // 2024-12-31 23:59:59 UTC
    time.set_time(1_735_689_599);
    assert_eq!(time.year(), 2024);
    time.delay(1_000);
    assert_eq!(time.year(), 2025);
    assert_eq!(time.month(), 1);
    assert_eq!(time.day(), 1);
    assert_eq!(time.second(), 0);
}

#[test]
fn test_random_round_trip() {
    let clock = MockClock::new();
    let time = MockTime::new(&clock);
    let mut rng = rand::thread_rng();
    for _ in 0..1_000 {
        let t = rng.gen_range(-2_208_988_800i64..4_102_444_800i64);
        let dt = time.date_time_at(t);
        assert_eq!(dt.to_unix(), t);
        assert_eq!(time.year_at(t), dt.year);
        assert!(calendar::days_from_civil(dt.year, dt.month, dt.day) * 86_400 <= t);
    }
}

#[test]
fn test_set_time_round_trip_through_accessors() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let year = rng.gen_range(1900..2100);
        let month = rng.gen_range(1..=12u8);
        let day = rng.gen_range(1..=28u8);
        let hour = rng.gen_range(0..24u8);
        let minute = rng.gen_range(0..60u8);
        let second = rng.gen_range(0..60u8);

        time.set_time(calendar::to_unix(year, month, day, hour, minute, second));
        assert_eq!(time.year(), year);
        assert_eq!(time.month(), month as i32);
        assert_eq!(time.day(), day as i32);
        assert_eq!(time.hour(), hour as i32);
        assert_eq!(time.minute(), minute as i32);
        assert_eq!(time.second(), second as i32);
    }
}

#[test]
fn test_set_time_extremes() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    time.set_time(1_700_000_000);
    time.set_time(i64::MIN);
    assert_eq!(time.now(), i64::MIN);

    time.set_time(i64::MAX);
    time.delay(5_000);
    assert_eq!(time.now(), i64::MAX);
    assert!(clock.take_adjustment().is_some());
}

#[test]
fn test_date_time_at_extremes() {
    let clock = MockClock::new();
    let mut time = MockTime::new(&clock);
    time.zone(1.0);
    assert_eq!(time.date_time_at(i64::MAX).year, i32::MAX);
    assert_eq!(time.year_at(i64::MAX), i32::MAX);

    time.zone(-12.0);
    assert_eq!(time.date_time_at(i64::MIN).year, i32::MIN);
    assert_eq!(time.year_at(i64::MIN), i32::MIN);
}
