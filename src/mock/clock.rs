//! Simulated clock shared by the mock back-ends.

use crate::time::UnixTime;
use core::cell::Cell;
use core::time::Duration;

#[derive(Debug, Clone, Copy)]
struct WallAnchor {
    epoch: UnixTime,
    at_uptime_ms: u64,
}

/// Simulated uptime counter and wall clock.
///
/// Uptime only moves forward, through [`advance`](Self::advance) or through
/// the blocking operations of the mocks (`delay`, `flush`, `sleep`,
/// `wait_for_condition`). The wall clock is anchored to uptime when set, so
/// it keeps ticking as uptime advances and setting it never touches uptime.
#[derive(Debug, Default)]
pub struct MockClock {
    uptime_ms: Cell<u64>,
    wall: Cell<Option<WallAnchor>>,
    pending_adjustment: Cell<Option<i64>>,
}

impl MockClock {
    /// A clock at uptime zero with the wall clock unset.
    pub const fn new() -> Self {
        Self {
            uptime_ms: Cell::new(0),
            wall: Cell::new(None),
            pending_adjustment: Cell::new(None),
        }
    }

    /// Milliseconds since simulated start-up.
    pub fn uptime_ms(&self) -> u64 {
        self.uptime_ms.get()
    }

    /// Uptime truncated to the platform's 32-bit counter.
    pub fn millis(&self) -> u32 {
        self.uptime_ms.get() as u32
    }

    /// Move uptime (and the wall clock with it) forward.
    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.advance_ms(ms);
    }

    /// Move uptime forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.uptime_ms.set(self.uptime_ms.get().saturating_add(ms));
    }

    /// Move uptime forward to `uptime_ms`; earlier targets are ignored.
    pub fn advance_to(&self, uptime_ms: u64) {
        if uptime_ms > self.uptime_ms.get() {
            self.uptime_ms.set(uptime_ms);
        }
    }

    /// Whether the wall clock has ever been set.
    pub fn is_set(&self) -> bool {
        self.wall.get().is_some()
    }

    /// Wall clock time, or `None` before it was first set.
    pub fn wall_time(&self) -> Option<UnixTime> {
        self.wall.get().map(|anchor| {
            let elapsed_ms = self.uptime_ms.get() - anchor.at_uptime_ms;
            anchor.epoch.saturating_add((elapsed_ms / 1000) as i64)
        })
    }

    /// Set the wall clock to `t` as of the current uptime.
    ///
    /// Returns the adjustment in seconds relative to the previous wall time
    /// (relative to uptime seconds if it was unset), saturating at the
    /// `i64` range. The adjustment is also
    /// kept until [`take_adjustment`](Self::take_adjustment) so a mock
    /// system can report it as a time-changed event.
    pub fn set_wall_time(&self, t: UnixTime) -> i64 {
        let previous = self
            .wall_time()
            .unwrap_or((self.uptime_ms.get() / 1000) as i64);
        self.wall.set(Some(WallAnchor {
            epoch: t,
            at_uptime_ms: self.uptime_ms.get(),
        }));
        let delta = t.saturating_sub(previous);
        let total = self.pending_adjustment.get().unwrap_or(0).saturating_add(delta);
        self.pending_adjustment.set(Some(total));
        delta
    }

    /// Take the accumulated wall clock adjustment since the last call.
    pub fn take_adjustment(&self) -> Option<i64> {
        self.pending_adjustment.take()
    }
}
