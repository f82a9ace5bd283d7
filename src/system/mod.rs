//! System control capability: events, reset diagnostics, waiting and sleep.
//!
//! This is the richest part of the platform boundary. Besides the
//! [`System`] trait it carries the taxonomies an application branches on
//! after a restart or a sleep cycle ([`ResetReason`], [`WakeupReason`]) and
//! the [`SleepConfig`] value handed to [`System::sleep`].
//!
//! Back-ends are free to deliver events from an interrupt, from a polling
//! loop or synchronously; handlers are plain `fn` pointers and must stay
//! short and non-blocking.
//!
//! # Helpers for back-ends
//!
//! - [`EventRegistry`]: fixed-capacity registration table with fan-out
//!   delivery in registration order.
//! - [`wait::poll_until`]: the polling loop behind
//!   [`System::wait_for_condition`].
//! - [`diagnostics::Report`]: JSON-serializable snapshot for telemetry.

/// Diagnostics snapshot
pub mod diagnostics;
/// Error type for system control
pub mod error;
/// Event registration table
pub mod event;
/// Sleep configuration values
pub mod sleep;
/// Condition polling loop
pub mod wait;

pub use error::Error;
pub use event::EventRegistry;
pub use sleep::{InterruptMode, NetworkInterface, SleepConfig, SleepMode};

use core::time::Duration;
use serde::{Deserialize, Serialize};

/// System events an application can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventType {
    /// The wall clock was changed (by `set_time` or a cloud sync).
    ///
    /// The handler's `data` argument is back-end-defined; the mocks pass
    /// the signed size of the adjustment in seconds, saturated to `i32`.
    TimeChanged,
    /// An allocation failed or free memory dropped below a critical level.
    ///
    /// The handler's `data` argument is the size of the failed request in
    /// bytes, or `0` when unknown. Back-ends also use this channel to
    /// escalate unrecoverable conditions instead of aborting a call.
    OutOfMemory,
}

/// Event callback.
///
/// A plain function pointer: registration never extends the lifetime of any
/// captured state.
pub type SystemEventHandler = fn(event: EventType, data: i32);

/// Why the system last restarted.
///
/// Discriminants are stable codes shared with the reference platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ResetReason {
    /// Invalid reason code.
    None = 0,
    /// Unspecified reason.
    Unknown = 10,
    /// Reset from the reset pin.
    PinReset = 20,
    /// Low-power management reset (e.g. waking from hibernate).
    PowerManagement = 30,
    /// Power-down reset.
    PowerDown = 40,
    /// Brownout reset.
    PowerBrownout = 50,
    /// Watchdog reset.
    Watchdog = 60,
    /// Reset to apply a firmware update.
    Update = 70,
    /// Generic firmware update error (deprecated).
    UpdateError = 80,
    /// Firmware update timeout.
    UpdateTimeout = 90,
    /// Factory reset requested.
    FactoryReset = 100,
    /// Safe mode requested.
    SafeMode = 110,
    /// DFU mode requested.
    DfuMode = 120,
    /// System panic.
    Panic = 130,
    /// User-requested reset.
    User = 140,
    /// Reset to apply configuration changes.
    ConfigUpdate = 150,
}

impl ResetReason {
    /// Stable numeric code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Classify a numeric code. Unrecognized codes map to
    /// [`Unknown`](Self::Unknown).
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => Self::None,
            20 => Self::PinReset,
            30 => Self::PowerManagement,
            40 => Self::PowerDown,
            50 => Self::PowerBrownout,
            60 => Self::Watchdog,
            70 => Self::Update,
            80 => Self::UpdateError,
            90 => Self::UpdateTimeout,
            100 => Self::FactoryReset,
            110 => Self::SafeMode,
            120 => Self::DfuMode,
            130 => Self::Panic,
            140 => Self::User,
            150 => Self::ConfigUpdate,
            _ => Self::Unknown,
        }
    }

    /// Whether the restart was caused by hardware (pin, power, watchdog).
    pub fn is_hardware(self) -> bool {
        matches!(
            self,
            Self::PinReset
                | Self::PowerManagement
                | Self::PowerDown
                | Self::PowerBrownout
                | Self::Watchdog
        )
    }

    /// Whether the restart was requested or caused by software.
    pub fn is_software(self) -> bool {
        self.code() >= Self::Update.code()
    }
}

/// What ended the last sleep period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum WakeupReason {
    /// Unknown or not applicable.
    #[default]
    Unknown,
    /// A GPIO pin interrupt.
    ByGpio,
    /// Analog-to-digital converter.
    ByAdc,
    /// Digital-to-analog converter.
    ByDac,
    /// Real-time clock alarm (sleep duration elapsed).
    ByRtc,
    /// Low-power comparator.
    ByLpcomp,
    /// Serial port activity.
    ByUsart,
    /// I2C activity.
    ByI2c,
    /// SPI activity.
    BySpi,
    /// Hardware timer.
    ByTimer,
    /// CAN bus activity.
    ByCan,
    /// USB activity.
    ByUsb,
    /// Bluetooth LE activity.
    ByBle,
    /// NFC field.
    ByNfc,
    /// Network event on an interface kept powered during sleep.
    ByNetwork,
}

impl WakeupReason {
    /// Numeric code (declaration order).
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// System control.
pub trait System {
    /// Register `handler` for `event`.
    ///
    /// Registration is fan-out: every handler registered for an event is
    /// called, in registration order. Returns [`Error::RegistryFull`] when
    /// the back-end's table has no room left.
    fn on(&mut self, event: EventType, handler: SystemEventHandler) -> Result<(), Error>;

    /// Why the system last restarted.
    fn reset_reason(&self) -> ResetReason;

    /// Free heap memory in bytes.
    fn free_memory(&self) -> u32;

    /// Evaluate `condition` until it returns `true` or `timeout` elapses.
    ///
    /// The condition is always evaluated at least once, so an already-true
    /// condition succeeds even with a zero timeout. Returns `true` if the
    /// condition was met. Back-ends poll at their own interval and yield
    /// between polls where the platform supports it.
    fn wait_for_condition(&mut self, condition: &mut dyn FnMut() -> bool, timeout: Duration)
    -> bool;

    /// Enter the sleep mode described by `config` and return once woken.
    ///
    /// If `config.wake_pin` is [`INVALID_PIN`](crate::gpio::INVALID_PIN),
    /// pin wake must not occur. The behaviour with no wake source at all
    /// (see [`SleepConfig::has_wake_source`]) is back-end-defined and must be
    /// documented by the back-end.
    fn sleep(&mut self, config: &SleepConfig) -> WakeupReason;
}

/// Async counterparts of the blocking [`System`] operations.
#[cfg(feature = "async")]
pub trait AsyncSystem {
    /// See [`System::wait_for_condition`].
    async fn wait_for_condition(
        &mut self,
        condition: &mut dyn FnMut() -> bool,
        timeout: Duration,
    ) -> bool;

    /// See [`System::sleep`].
    async fn sleep(&mut self, config: &SleepConfig) -> WakeupReason;
}
