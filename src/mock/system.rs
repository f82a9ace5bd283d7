//! Mock system control.

use super::MockClock;
use crate::gpio::Pin;
use crate::system::wait::{self, DEFAULT_POLL_INTERVAL};
use crate::system::{
    Error, EventRegistry, EventType, InterruptMode, NetworkInterface, ResetReason, SleepConfig, SleepMode, System,
    SystemEventHandler, WakeupReason,
};
use core::time::Duration;
use heapless::Vec;

/// Handlers a [`MockSystem`] can hold across all event types.
pub const MOCK_EVENT_CAPACITY: usize = 8;

/// Scripted external wake events a [`MockSystem`] can hold.
pub const MOCK_WAKE_CAPACITY: usize = 8;

/// Free memory reported until changed.
pub const DEFAULT_FREE_MEMORY: u32 = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PinEdge {
    pin: Pin,
    edge: InterruptMode,
    at_ms: u64,
}

/// [`System`] back-end over a [`MockClock`].
///
/// External wake sources are scripted ahead of time with
/// [`schedule_pin_edge`](Self::schedule_pin_edge) and
/// [`schedule_network_activity`](Self::schedule_network_activity).
/// [`sleep`](System::sleep) then advances the clock to the earliest eligible
/// wake:
///
/// - a timer wake when `duration` is non-zero;
/// - an edge on `wake_pin` matching `wake_edge`, never when the pin is the
///   invalid sentinel;
/// - network activity when an interface is kept powered, except in
///   [`SleepMode::Hibernate`].
///
/// Scripted events that fire while asleep without being eligible are lost.
/// On a tie, pin beats network beats timer. When nothing can wake the
/// system (no wake source configured, or only external sources with nothing
/// scripted) the call returns [`WakeupReason::Unknown`] at once without
/// advancing the clock. Waking from hibernate sets the reset reason to
/// [`ResetReason::PowerManagement`], as the firmware would restart.
///
/// Wall clock changes made through the shared clock are reported as
/// [`EventType::TimeChanged`] from [`poll_events`](Self::poll_events), which
/// the blocking operations call on every iteration.
#[derive(Debug)]
pub struct MockSystem<'a> {
    clock: &'a MockClock,
    registry: EventRegistry<MOCK_EVENT_CAPACITY>,
    reset_reason: ResetReason,
    free_memory: u32,
    poll_interval: Duration,
    pin_edges: Vec<PinEdge, MOCK_WAKE_CAPACITY>,
    network_activity: Option<u64>,
    last_wakeup: Option<WakeupReason>,
    last_sleep: Option<SleepConfig>,
    sleeps: u32,
}

impl<'a> MockSystem<'a> {
    /// A system that last restarted from power-down.
    pub fn new(clock: &'a MockClock) -> Self {
        Self {
            clock,
            registry: EventRegistry::new(),
            reset_reason: ResetReason::PowerDown,
            free_memory: DEFAULT_FREE_MEMORY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            pin_edges: Vec::new(),
            network_activity: None,
            last_wakeup: None,
            last_sleep: None,
            sleeps: 0,
        }
    }

    /// Set the reported reset reason.
    pub fn set_reset_reason(&mut self, reason: ResetReason) {
        self.reset_reason = reason;
    }

    /// Set the reported free memory.
    pub fn set_free_memory(&mut self, bytes: u32) {
        self.free_memory = bytes;
    }

    /// Poll interval used by [`wait_for_condition`](System::wait_for_condition).
    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.poll_interval = interval;
    }

    /// Script an `edge` on `pin` `after` from now. Returns `false` when the
    /// script is full.
    ///
    /// [`InterruptMode::Change`] stands for an edge of unknown direction and
    /// wakes any configured edge.
    pub fn schedule_pin_edge(&mut self, pin: Pin, edge: InterruptMode, after: Duration) -> bool {
        let at_ms = self.clock.uptime_ms().saturating_add(duration_ms(after));
        self.pin_edges.push(PinEdge { pin, edge, at_ms }).is_ok()
    }

    /// Script network activity `after` from now, replacing earlier activity.
    pub fn schedule_network_activity(&mut self, after: Duration) {
        self.network_activity = Some(self.clock.uptime_ms().saturating_add(duration_ms(after)));
    }

    /// Deliver `event` to its handlers. Returns the number called.
    pub fn raise(&self, event: EventType, data: i32) -> usize {
        self.registry.dispatch(event, data)
    }

    /// Report a failed allocation of `size` bytes.
    pub fn fail_allocation(&self, size: u32) -> usize {
        warn!("allocation of {} bytes failed", size);
        self.raise(EventType::OutOfMemory, i32::try_from(size).unwrap_or(i32::MAX))
    }

    /// Deliver a pending wall clock change, if any. Returns the number of
    /// handlers called.
    pub fn poll_events(&self) -> usize {
        deliver_time_change(self.clock, &self.registry)
    }

    /// What ended the last sleep, `None` before the first one.
    pub fn last_wakeup(&self) -> Option<WakeupReason> {
        self.last_wakeup
    }

    /// Configuration of the last sleep, `None` before the first one.
    pub fn last_sleep(&self) -> Option<&SleepConfig> {
        self.last_sleep.as_ref()
    }

    /// Number of sleep calls so far.
    pub fn sleep_count(&self) -> u32 {
        self.sleeps
    }

    /// Handlers registered for `event`.
    pub fn handler_count(&self, event: EventType) -> usize {
        self.registry.count(event)
    }

    fn next_wake(&self, config: &SleepConfig, now: u64) -> Option<(u64, WakeupReason)> {
        let pin = config
            .has_wake_pin()
            .then(|| {
                self.pin_edges
                    .iter()
                    .filter(|edge| {
                        edge.pin == config.wake_pin && edge_matches(config.wake_edge, edge.edge)
                    })
                    .map(|edge| edge.at_ms.max(now))
                    .min()
            })
            .flatten()
            .map(|at| (at, WakeupReason::ByGpio));

        let network = (config.network != NetworkInterface::None
            && config.mode != SleepMode::Hibernate)
            .then_some(self.network_activity)
            .flatten()
            .map(|at| (at.max(now), WakeupReason::ByNetwork));

        let timer = config.has_duration().then(|| {
            let at = now.saturating_add(duration_ms(config.duration));
            (at, WakeupReason::ByRtc)
        });

        // min_by_key keeps the first of equal keys: pin, network, timer.
        [pin, network, timer]
            .into_iter()
            .flatten()
            .min_by_key(|(at, _)| *at)
    }
}

fn edge_matches(configured: InterruptMode, seen: InterruptMode) -> bool {
    configured == InterruptMode::Change || seen == InterruptMode::Change || configured == seen
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn deliver_time_change<const N: usize>(clock: &MockClock, registry: &EventRegistry<N>) -> usize {
    match clock.take_adjustment() {
        Some(delta) => {
            let data = delta.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
            registry.dispatch(EventType::TimeChanged, data)
        }
        None => 0,
    }
}

impl System for MockSystem<'_> {
    fn on(&mut self, event: EventType, handler: SystemEventHandler) -> Result<(), Error> {
        self.registry.register(event, handler)
    }

    fn reset_reason(&self) -> ResetReason {
        self.reset_reason
    }

    fn free_memory(&self) -> u32 {
        self.free_memory
    }

    fn wait_for_condition(
        &mut self,
        condition: &mut dyn FnMut() -> bool,
        timeout: Duration,
    ) -> bool {
        let clock = self.clock;
        let registry = &self.registry;
        deliver_time_change(clock, registry);
        wait::poll_until(
            condition,
            timeout,
            self.poll_interval,
            || clock.millis(),
            |step| {
                clock.advance(step);
                deliver_time_change(clock, registry);
            },
        )
    }

    fn sleep(&mut self, config: &SleepConfig) -> WakeupReason {
        self.sleeps += 1;
        self.last_sleep = Some(*config);
        let now = self.clock.uptime_ms();

        let Some((wake_at, reason)) = self.next_wake(config, now) else {
            warn!("sleep requested without a wake source");
            self.last_wakeup = Some(WakeupReason::Unknown);
            return WakeupReason::Unknown;
        };

        debug!("sleeping {} ms", wake_at - now);
        self.clock.advance_to(wake_at);

        // Everything scripted up to the wake moment has happened now.
        self.pin_edges.retain(|edge| edge.at_ms > wake_at);
        if self.network_activity.is_some_and(|at| at <= wake_at) {
            self.network_activity = None;
        }

        if config.mode == SleepMode::Hibernate {
            self.reset_reason = ResetReason::PowerManagement;
        }
        self.last_wakeup = Some(reason);
        info!("woke up: {}", reason);
        self.poll_events();
        reason
    }
}

#[cfg(feature = "async")]
impl crate::system::AsyncSystem for MockSystem<'_> {
    async fn wait_for_condition(
        &mut self,
        condition: &mut dyn FnMut() -> bool,
        timeout: Duration,
    ) -> bool {
        System::wait_for_condition(self, condition, timeout)
    }

    async fn sleep(&mut self, config: &SleepConfig) -> WakeupReason {
        System::sleep(self, config)
    }
}
