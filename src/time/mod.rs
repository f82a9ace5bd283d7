//! Wall-clock time and uptime capability.
//!
//! [`TimeProvider`] exposes two clocks that must never be confused:
//!
//! - the **wall clock** ([`now`](TimeProvider::now),
//!   [`set_time`](TimeProvider::set_time)): epoch seconds, adjustable, only
//!   trustworthy once [`is_valid`](TimeProvider::is_valid) is `true`;
//! - the **uptime counter** ([`millis`](TimeProvider::millis)): monotonic,
//!   unaffected by wall clock adjustments.
//!
//! The decomposed accessors (`year()` .. `second()` and their `_at`
//! variants) have default bodies built on [`calendar`]. They apply the GMT
//! offset set with [`zone`](TimeProvider::zone); [`now`](TimeProvider::now)
//! never does.

/// Epoch/civil date conversions
pub mod calendar;

use serde::{Deserialize, Serialize};

/// Seconds since 1970-01-01T00:00:00Z.
pub type UnixTime = i64;

/// Most negative GMT offset accepted by [`TimeProvider::zone`], in hours.
pub const MIN_ZONE_OFFSET: f32 = -12.0;

/// Most positive GMT offset accepted by [`TimeProvider::zone`], in hours.
pub const MAX_ZONE_OFFSET: f32 = 14.0;

/// Civil date and time of day, all fields taken from one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Full year, e.g. 2025.
    pub year: i32,
    /// Month, 1..=12.
    pub month: u8,
    /// Day of month, 1..=31.
    pub day: u8,
    /// Hour, 0..=23.
    pub hour: u8,
    /// Minute, 0..=59.
    pub minute: u8,
    /// Second, 0..=59.
    pub second: u8,
}

impl DateTime {
    /// Epoch seconds for this civil time, read as UTC.
    pub fn to_unix(&self) -> UnixTime {
        calendar::to_unix(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

/// Clamp a GMT offset to the accepted range.
pub fn clamp_zone(offset_hours: f32) -> f32 {
    offset_hours.clamp(MIN_ZONE_OFFSET, MAX_ZONE_OFFSET)
}

/// Offset in seconds for a GMT offset given in (possibly fractional) hours.
pub fn zone_offset_seconds(offset_hours: f32) -> i64 {
    (offset_hours * 3600.0) as i64
}

/// Time source.
pub trait TimeProvider {
    /// Current wall clock time in epoch seconds, zone not applied.
    fn now(&self) -> UnixTime;

    /// Overwrite the wall clock.
    ///
    /// Must not affect [`millis`](Self::millis).
    fn set_time(&mut self, t: UnixTime);

    /// Whether the wall clock has been set from a trustworthy source.
    ///
    /// `false` until the first [`set_time`](Self::set_time) or cloud sync.
    fn is_valid(&self) -> bool;

    /// Set a fixed GMT offset in hours for the decomposed accessors.
    fn zone(&mut self, offset_hours: f32);

    /// The offset last set with [`zone`](Self::zone), `0.0` by default.
    fn zone_offset(&self) -> f32;

    /// Milliseconds since start-up. Monotonic, wraps at `u32::MAX`.
    fn millis(&self) -> u32;

    /// Block for at least `ms` milliseconds.
    fn delay(&mut self, ms: u32);

    /// Decompose `t` with the current zone offset applied.
    fn date_time_at(&self, t: UnixTime) -> DateTime {
        calendar::to_date_time(t.saturating_add(zone_offset_seconds(self.zone_offset())))
    }

    /// Decompose a single read of [`now`](Self::now).
    fn date_time(&self) -> DateTime {
        self.date_time_at(self.now())
    }

    /// Current year.
    fn year(&self) -> i32 {
        self.date_time().year
    }

    /// Year of `t`.
    fn year_at(&self, t: UnixTime) -> i32 {
        self.date_time_at(t).year
    }

    /// Current month, 1..=12.
    fn month(&self) -> i32 {
        self.date_time().month as i32
    }

    /// Month of `t`, 1..=12.
    fn month_at(&self, t: UnixTime) -> i32 {
        self.date_time_at(t).month as i32
    }

    /// Current day of month.
    fn day(&self) -> i32 {
        self.date_time().day as i32
    }

    /// Day of month of `t`.
    fn day_at(&self, t: UnixTime) -> i32 {
        self.date_time_at(t).day as i32
    }

    /// Current hour.
    fn hour(&self) -> i32 {
        self.date_time().hour as i32
    }

    /// Hour of `t`.
    fn hour_at(&self, t: UnixTime) -> i32 {
        self.date_time_at(t).hour as i32
    }

    /// Current minute.
    fn minute(&self) -> i32 {
        self.date_time().minute as i32
    }

    /// Minute of `t`.
    fn minute_at(&self, t: UnixTime) -> i32 {
        self.date_time_at(t).minute as i32
    }

    /// Current second.
    fn second(&self) -> i32 {
        self.date_time().second as i32
    }

    /// Second of `t`.
    fn second_at(&self, t: UnixTime) -> i32 {
        self.date_time_at(t).second as i32
    }
}

/// Async counterpart of [`TimeProvider::delay`].
#[cfg(feature = "async")]
pub trait AsyncTimeProvider {
    /// Resolve after at least `ms` milliseconds.
    async fn delay(&mut self, ms: u32);
}
