//! Cloud connectivity capability.
//!
//! ```text
//!            connect()               link up
//! Disconnected ───────▶ Connecting ───────▶ Connected
//!      ▲                    │                   │
//!      └────────────────────┴───────────────────┘
//!                 disconnect(options)
//! ```
//!
//! [`Cloud::connect`] only requests the transition. The application observes
//! completion by polling [`Cloud::connected`], usually through
//! [`System::wait_for_condition`](crate::system::System::wait_for_condition)
//! while calling [`Cloud::process`] from its main loop.
//!
//! Time synchronization follows the same pattern: [`Cloud::sync_time`] starts
//! an exchange, [`Cloud::sync_time_pending`] and [`Cloud::sync_time_done`]
//! report on it without blocking. At most one sync is in flight; what a
//! second request does meanwhile is described by the back-end's
//! [`SyncPolicy`].

use crate::config::{self, duration_ms};
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Connection state of a cloud back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    /// No session, nothing in progress.
    #[default]
    Disconnected,
    /// A connection attempt is in progress.
    Connecting,
    /// Session established.
    Connected,
}

/// What a back-end does with [`Cloud::sync_time`] while a sync is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncPolicy {
    /// Refuse the request; `sync_time` returns `false`.
    #[default]
    Reject,
    /// Accept and run one more sync after the pending one completes.
    Queue,
    /// Abandon the pending exchange and start over.
    Restart,
}

/// Options for [`Cloud::disconnect`].
///
/// ```rust
/// use core::time::Duration;
/// use libplatform::cloud::DisconnectOptions;
///
/// let options = DisconnectOptions::graceful(Duration::from_secs(5));
/// assert!(options.graceful);
///
/// let parsed = DisconnectOptions::from_json(r#"{"graceful":true,"timeout_ms":5000}"#).unwrap();
/// assert_eq!(parsed, options);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisconnectOptions {
    /// Request an orderly teardown before closing.
    #[serde(default)]
    pub graceful: bool,
    /// Upper bound for the orderly teardown, after which the back-end may
    /// force-close.
    #[serde(rename = "timeout_ms", with = "duration_ms", default)]
    pub timeout: Duration,
}

impl DisconnectOptions {
    /// Immediate disconnect.
    pub const fn immediate() -> Self {
        Self {
            graceful: false,
            timeout: Duration::ZERO,
        }
    }

    /// Orderly disconnect bounded by `timeout`.
    pub const fn graceful(timeout: Duration) -> Self {
        Self {
            graceful: true,
            timeout,
        }
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, config::Error> {
        config::from_json(json)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DisconnectOptions {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "DisconnectOptions {{ graceful: {}, timeout_ms: {} }}",
            self.graceful,
            self.timeout.as_millis() as u64
        )
    }
}

/// Cloud session control.
pub trait Cloud {
    /// Request a connection. Returns immediately.
    fn connect(&mut self);

    /// Request a disconnect as described by `options`.
    fn disconnect(&mut self, options: &DisconnectOptions);

    /// Whether a session is established.
    fn connected(&self) -> bool;

    /// Start a time synchronization with the remote service.
    ///
    /// Returns `true` if a sync was started (or queued, per the back-end's
    /// [`SyncPolicy`]) and `false` if it was refused, e.g. while
    /// disconnected.
    fn sync_time(&mut self) -> bool;

    /// Whether a sync is in flight.
    fn sync_time_pending(&self) -> bool;

    /// Whether a sync has completed and none is in flight.
    fn sync_time_done(&self) -> bool;

    /// Drive background work (connection maintenance, sync progress).
    ///
    /// Must be called periodically from the application's main loop.
    /// Returns `true` while the session is healthy (connected).
    fn process(&mut self) -> bool;
}
