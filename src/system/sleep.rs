//! Sleep configuration handed to [`System::sleep`](super::System::sleep).

use crate::config::{self, duration_ms};
use crate::gpio::{INVALID_PIN, Pin};
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Depth of a sleep period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepMode {
    /// CPU halted, peripherals and RAM retained; execution resumes in place.
    Stop,
    /// Like [`Stop`](Self::Stop) with most peripherals powered down.
    UltraLowPower,
    /// Deepest mode. On real hardware waking restarts the firmware.
    Hibernate,
}

/// Edge that triggers a pin wake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptMode {
    /// Low to high transition.
    #[default]
    Rising,
    /// High to low transition.
    Falling,
    /// Either transition.
    Change,
}

/// Network interface kept powered during sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkInterface {
    /// Power down all network interfaces.
    #[default]
    None,
    /// Cellular modem.
    Cellular,
    /// Wi-Fi.
    Wifi,
    /// Wired Ethernet.
    Ethernet,
}

/// Everything [`System::sleep`](super::System::sleep) needs to know.
///
/// Built by the application right before the sleep call and not retained
/// afterwards.
///
/// ```rust
/// use core::time::Duration;
/// use libplatform::system::{InterruptMode, NetworkInterface, SleepConfig, SleepMode};
///
/// let config = SleepConfig::new(SleepMode::UltraLowPower)
///     .with_duration(Duration::from_secs(60))
///     .with_wake_pin(4, InterruptMode::Falling)
///     .with_network(NetworkInterface::Cellular);
///
/// assert!(config.has_wake_pin());
/// assert!(config.has_wake_source());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepConfig {
    /// Sleep depth.
    pub mode: SleepMode,
    /// Timer wake after this long; zero means "until an external wake".
    #[serde(rename = "duration_ms", with = "duration_ms", default)]
    pub duration: Duration,
    /// Wake pin, or [`INVALID_PIN`] for none. When it is [`INVALID_PIN`]
    /// `wake_edge` is ignored.
    #[serde(default = "no_wake_pin")]
    pub wake_pin: Pin,
    /// Edge that triggers a pin wake.
    #[serde(default)]
    pub wake_edge: InterruptMode,
    /// Interface that stays powered and may wake the system.
    #[serde(default)]
    pub network: NetworkInterface,
}

fn no_wake_pin() -> Pin {
    INVALID_PIN
}

impl SleepConfig {
    /// A configuration with no wake source yet.
    pub const fn new(mode: SleepMode) -> Self {
        Self {
            mode,
            duration: Duration::ZERO,
            wake_pin: INVALID_PIN,
            wake_edge: InterruptMode::Rising,
            network: NetworkInterface::None,
        }
    }

    /// Wake after `duration`.
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Wake on `edge` of `pin`.
    pub const fn with_wake_pin(mut self, pin: Pin, edge: InterruptMode) -> Self {
        self.wake_pin = pin;
        self.wake_edge = edge;
        self
    }

    /// Keep `network` powered so it can wake the system.
    pub const fn with_network(mut self, network: NetworkInterface) -> Self {
        self.network = network;
        self
    }

    /// Whether a wake pin is configured.
    pub fn has_wake_pin(&self) -> bool {
        self.wake_pin != INVALID_PIN
    }

    /// Whether a timer wake is configured.
    pub fn has_duration(&self) -> bool {
        !self.duration.is_zero()
    }

    /// Whether any wake source (timer, pin or network) is configured.
    pub fn has_wake_source(&self) -> bool {
        self.has_duration() || self.has_wake_pin() || self.network != NetworkInterface::None
    }

    /// Parse a configuration from JSON.
    ///
    /// Only `mode` is required; missing fields mean "no wake source of that
    /// kind".
    ///
    /// ```rust
    /// use core::time::Duration;
    /// use libplatform::system::{SleepConfig, SleepMode};
    ///
    /// let config = SleepConfig::from_json(r#"{"mode":"Stop","duration_ms":1500}"#).unwrap();
    /// assert_eq!(config.mode, SleepMode::Stop);
    /// assert_eq!(config.duration, Duration::from_millis(1500));
    /// assert!(!config.has_wake_pin());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, config::Error> {
        config::from_json(json)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SleepConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "SleepConfig {{ mode: {}, duration_ms: {}, wake_pin: {}, wake_edge: {}, network: {} }}",
            self.mode,
            self.duration.as_millis() as u64,
            self.wake_pin,
            self.wake_edge,
            self.network
        )
    }
}
