//! Mock time provider.

use super::MockClock;
use crate::time::{TimeProvider, UnixTime, clamp_zone};

/// [`TimeProvider`] over a [`MockClock`].
///
/// Before the wall clock is first set, [`now`](TimeProvider::now) counts
/// seconds of uptime from the epoch, like an unsynchronized RTC, and
/// [`is_valid`](TimeProvider::is_valid) is `false`.
#[derive(Debug)]
pub struct MockTime<'a> {
    clock: &'a MockClock,
    zone: f32,
}

impl<'a> MockTime<'a> {
    /// A time provider reading `clock`, zone offset zero.
    pub fn new(clock: &'a MockClock) -> Self {
        Self { clock, zone: 0.0 }
    }

    /// The underlying clock.
    pub fn clock(&self) -> &'a MockClock {
        self.clock
    }
}

impl TimeProvider for MockTime<'_> {
    fn now(&self) -> UnixTime {
        self.clock
            .wall_time()
            .unwrap_or((self.clock.uptime_ms() / 1000) as i64)
    }

    fn set_time(&mut self, t: UnixTime) {
        let delta = self.clock.set_wall_time(t);
        debug!("wall clock set to {} ({} s)", t, delta);
    }

    fn is_valid(&self) -> bool {
        self.clock.is_set()
    }

    fn zone(&mut self, offset_hours: f32) {
        self.zone = clamp_zone(offset_hours);
    }

    fn zone_offset(&self) -> f32 {
        self.zone
    }

    fn millis(&self) -> u32 {
        self.clock.millis()
    }

    fn delay(&mut self, ms: u32) {
        self.clock.advance_ms(ms as u64);
    }
}

#[cfg(feature = "async")]
impl crate::time::AsyncTimeProvider for MockTime<'_> {
    async fn delay(&mut self, ms: u32) {
        TimeProvider::delay(self, ms);
    }
}
