//! Calendar date/time conversions using O(1) algorithms
//!
//! Implements Howard Hinnant's `civil_from_days` and `days_from_civil`.
//! Reference: <http://howardhinnant.github.io/date_algorithms.html>
//!
//! Both directions are valid for the whole proleptic Gregorian calendar,
//! including timestamps before 1970. Leap seconds are not modelled.

use super::{DateTime, UnixTime};

/// Seconds in one civil day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days from 0000-03-01 to 1970-01-01.
const EPOCH_SHIFT_DAYS: i64 = 719_468;

/// Days in a 400-year era.
const DAYS_PER_ERA: i64 = 146_097;

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Convert days since the Unix epoch to `(year, month, day)`.
///
/// Years beyond the `i32` range saturate.
pub fn civil_from_days(days_since_epoch: i64) -> (i32, u8, u8) {
    // Shift the epoch to 0000-03-01 so the leap day ends the year.
    let z = days_since_epoch + EPOCH_SHIFT_DAYS;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z.rem_euclid(DAYS_PER_ERA); // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365; // [0, 399]
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // March = 0
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year.clamp(i32::MIN as i64, i32::MAX as i64) as i32, month, day)
}

/// Convert a civil date to days since the Unix epoch.
///
/// `month` is 1-based. Out-of-range days roll over into the next month the
/// same way `mktime` does.
pub fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let (y, m) = if month <= 2 {
        (year as i64 - 1, month as i64 + 9)
    } else {
        (year as i64, month as i64 - 3)
    };
    let era = y.div_euclid(400);
    let yoe = y.rem_euclid(400); // [0, 399]
    let doy = (153 * m + 2) / 5 + day as i64 - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * DAYS_PER_ERA + doe - EPOCH_SHIFT_DAYS
}

/// Decompose an epoch timestamp (no zone applied).
pub fn to_date_time(t: UnixTime) -> DateTime {
    let days = t.div_euclid(SECONDS_PER_DAY);
    let secs_today = t.rem_euclid(SECONDS_PER_DAY);
    let (year, month, day) = civil_from_days(days);

    DateTime {
        year,
        month,
        day,
        hour: (secs_today / 3600) as u8,
        minute: ((secs_today % 3600) / 60) as u8,
        second: (secs_today % 60) as u8,
    }
}

/// Compose an epoch timestamp from civil fields (no zone applied).
pub fn to_unix(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> UnixTime {
    days_from_civil(year, month, day) * SECONDS_PER_DAY
        + hour as i64 * 3600
        + minute as i64 * 60
        + second as i64
}
