//! Diagnostics snapshot for telemetry.
//!
//! A [`Report`] gathers the read-only system queries an application usually
//! publishes after start-up or a wake cycle, and renders them as JSON:
//!
//! ```text
//! {"reset_reason":"Watchdog","free_memory":40000,"uptime_ms":1234,"time_valid":true,"last_wakeup":"ByRtc"}
//! ```

use super::{ResetReason, System, WakeupReason};
use crate::config;
use crate::time::TimeProvider;
use heapless::String;
use serde::{Deserialize, Serialize};

/// Buffer size that fits any [`Report`].
pub const REPORT_JSON_CAPACITY: usize = 160;

/// Point-in-time system diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    /// Cause of the last restart.
    pub reset_reason: ResetReason,
    /// Free heap memory in bytes.
    pub free_memory: u32,
    /// Milliseconds since start-up.
    pub uptime_ms: u32,
    /// Whether the wall clock is trustworthy.
    pub time_valid: bool,
    /// Cause of the last wake, if the system has slept since start-up.
    pub last_wakeup: Option<WakeupReason>,
}

impl Report {
    /// Query `system` and `time` for a fresh snapshot.
    pub fn collect<S, T>(system: &S, time: &T, last_wakeup: Option<WakeupReason>) -> Self
    where
        S: System + ?Sized,
        T: TimeProvider + ?Sized,
    {
        Self {
            reset_reason: system.reset_reason(),
            free_memory: system.free_memory(),
            uptime_ms: time.millis(),
            time_valid: time.is_valid(),
            last_wakeup,
        }
    }

    /// Render as JSON.
    pub fn to_json(&self) -> Result<String<REPORT_JSON_CAPACITY>, config::Error> {
        config::to_json(self)
    }
}
