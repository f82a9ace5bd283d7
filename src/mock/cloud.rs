//! Mock cloud session.

use super::MockClock;
use crate::cloud::{Cloud, ConnectionState, DisconnectOptions, SyncPolicy};
use crate::time::UnixTime;
use core::time::Duration;

/// Connection handshake time used until changed.
pub const DEFAULT_CONNECT_LATENCY: Duration = Duration::from_millis(500);

/// Time sync round trip used until changed.
pub const DEFAULT_SYNC_LATENCY: Duration = Duration::from_millis(200);

/// Server time at uptime zero used until changed (2023-11-14 22:13:20 UTC).
pub const DEFAULT_SERVER_EPOCH: UnixTime = 1_700_000_000;

/// [`Cloud`] back-end simulating a remote service over a [`MockClock`].
///
/// Progress only happens in [`process`](Cloud::process): a connection
/// completes once the connect latency has elapsed and the service is
/// reachable, a sync completes once the sync latency has elapsed and then
/// sets the shared wall clock to the server's time. Losing reachability
/// while connected drops the session back to
/// [`ConnectionState::Connecting`] and abandons any sync.
///
/// A graceful [`disconnect`](Cloud::disconnect) lets a pending sync finish
/// when it can do so within the timeout, charging the wait to the clock. A
/// queued follow-up sync is discarded either way.
#[derive(Debug)]
pub struct MockCloud<'a> {
    clock: &'a MockClock,
    state: ConnectionState,
    reachable: bool,
    policy: SyncPolicy,
    connect_latency: u64,
    sync_latency: u64,
    server_epoch: UnixTime,
    connect_started: u64,
    sync_started: Option<u64>,
    sync_queued: bool,
    syncs_completed: u32,
    last_disconnect: Option<DisconnectOptions>,
}

impl<'a> MockCloud<'a> {
    /// A disconnected, reachable service with the default latencies and
    /// [`SyncPolicy::Reject`].
    pub fn new(clock: &'a MockClock) -> Self {
        Self {
            clock,
            state: ConnectionState::Disconnected,
            reachable: true,
            policy: SyncPolicy::default(),
            connect_latency: millis(DEFAULT_CONNECT_LATENCY),
            sync_latency: millis(DEFAULT_SYNC_LATENCY),
            server_epoch: DEFAULT_SERVER_EPOCH,
            connect_started: 0,
            sync_started: None,
            sync_queued: false,
            syncs_completed: 0,
            last_disconnect: None,
        }
    }

    /// Use `policy` for sync requests made while one is pending.
    pub fn with_policy(mut self, policy: SyncPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the connection handshake time.
    pub fn with_connect_latency(mut self, latency: Duration) -> Self {
        self.connect_latency = millis(latency);
        self
    }

    /// Set the time sync round trip.
    pub fn with_sync_latency(mut self, latency: Duration) -> Self {
        self.sync_latency = millis(latency);
        self
    }

    /// Make the server report `t` at the current uptime.
    pub fn with_server_time(mut self, t: UnixTime) -> Self {
        self.server_epoch = t.saturating_sub((self.clock.uptime_ms() / 1000) as i64);
        self
    }

    /// Simulate the service becoming reachable or unreachable.
    pub fn set_reachable(&mut self, reachable: bool) {
        self.reachable = reachable;
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// The sync policy in effect.
    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    /// Time the server reports now.
    pub fn server_time(&self) -> UnixTime {
        self.server_epoch.saturating_add((self.clock.uptime_ms() / 1000) as i64)
    }

    /// Number of completed syncs.
    pub fn syncs_completed(&self) -> u32 {
        self.syncs_completed
    }

    /// Options of the last disconnect, `None` before the first one.
    pub fn last_disconnect(&self) -> Option<DisconnectOptions> {
        self.last_disconnect
    }

    fn complete_sync(&mut self) {
        let t = self.server_time();
        let delta = self.clock.set_wall_time(t);
        self.syncs_completed += 1;
        info!("time synchronized to {} ({} s)", t, delta);
        self.sync_started = if self.sync_queued {
            self.sync_queued = false;
            Some(self.clock.uptime_ms())
        } else {
            None
        };
    }

    fn abandon_sync(&mut self) {
        self.sync_started = None;
        self.sync_queued = false;
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl Cloud for MockCloud<'_> {
    fn connect(&mut self) {
        if self.state == ConnectionState::Disconnected {
            debug!("cloud connecting");
            self.state = ConnectionState::Connecting;
            self.connect_started = self.clock.uptime_ms();
        }
    }

    fn disconnect(&mut self, options: &DisconnectOptions) {
        self.last_disconnect = Some(*options);
        if options.graceful && self.state == ConnectionState::Connected {
            if let Some(started) = self.sync_started {
                let done_at = started.saturating_add(self.sync_latency);
                let now = self.clock.uptime_ms();
                if done_at.saturating_sub(now) <= millis(options.timeout) {
                    self.clock.advance_to(done_at);
                    self.sync_queued = false;
                    self.complete_sync();
                }
            }
        }
        self.abandon_sync();
        if self.state != ConnectionState::Disconnected {
            info!("cloud disconnected");
        }
        self.state = ConnectionState::Disconnected;
    }

    fn connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    fn sync_time(&mut self) -> bool {
        if !self.connected() {
            return false;
        }
        if self.sync_started.is_none() {
            self.sync_started = Some(self.clock.uptime_ms());
            return true;
        }
        match self.policy {
            SyncPolicy::Reject => false,
            SyncPolicy::Queue => {
                self.sync_queued = true;
                true
            }
            SyncPolicy::Restart => {
                self.sync_started = Some(self.clock.uptime_ms());
                true
            }
        }
    }

    fn sync_time_pending(&self) -> bool {
        self.sync_started.is_some() || self.sync_queued
    }

    fn sync_time_done(&self) -> bool {
        self.syncs_completed > 0 && !self.sync_time_pending()
    }

    fn process(&mut self) -> bool {
        let now = self.clock.uptime_ms();
        match self.state {
            ConnectionState::Disconnected => {}
            ConnectionState::Connecting => {
                if self.reachable && now - self.connect_started >= self.connect_latency {
                    info!("cloud connected");
                    self.state = ConnectionState::Connected;
                }
            }
            ConnectionState::Connected => {
                if !self.reachable {
                    warn!("cloud connection lost");
                    self.state = ConnectionState::Connecting;
                    self.connect_started = now;
                    self.abandon_sync();
                } else if self
                    .sync_started
                    .is_some_and(|started| now - started >= self.sync_latency)
                {
                    self.complete_sync();
                }
            }
        }
        self.connected()
    }
}
