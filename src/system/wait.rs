//! Condition polling loop shared by [`System::wait_for_condition`]
//! implementations.
//!
//! [`System::wait_for_condition`]: super::System::wait_for_condition

use core::time::Duration;

/// Poll interval used by the mocks and suggested for back-ends.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Evaluate `condition` until it holds or `timeout` elapses.
///
/// `now_ms` reads a millisecond counter (wrap-around is handled, so a
/// `millis()`-style `u32` is fine) and `pause` yields for roughly the given
/// duration. The condition is evaluated before the timeout is checked, and
/// once more exactly at the deadline, so:
///
/// - an already-true condition returns `true` even with a zero timeout;
/// - a zero timeout evaluates the condition exactly once.
///
/// ```rust
/// use core::cell::Cell;
/// use core::time::Duration;
/// use libplatform::system::wait::poll_until;
///
/// let clock = Cell::new(0u32);
/// let met = poll_until(
///     &mut || clock.get() >= 30,
///     Duration::from_millis(100),
///     Duration::from_millis(10),
///     || clock.get(),
///     |d| clock.set(clock.get() + d.as_millis() as u32),
/// );
/// assert!(met);
/// assert_eq!(clock.get(), 30);
/// ```
pub fn poll_until<N, P>(
    condition: &mut dyn FnMut() -> bool,
    timeout: Duration,
    poll_interval: Duration,
    mut now_ms: N,
    mut pause: P,
) -> bool
where
    N: FnMut() -> u32,
    P: FnMut(Duration),
{
    let timeout_ms = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
    let interval_ms = u32::try_from(poll_interval.as_millis())
        .unwrap_or(u32::MAX)
        .max(1);
    let start = now_ms();

    loop {
        if condition() {
            return true;
        }
        let elapsed = now_ms().wrapping_sub(start);
        if elapsed >= timeout_ms {
            return false;
        }
        let step = interval_ms.min(timeout_ms - elapsed);
        pause(Duration::from_millis(step as u64));
    }
}
