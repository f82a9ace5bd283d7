//! Digital I/O capability.
//!
//! The [`Gpio`] trait is the seam between application code and whatever
//! drives the physical pins: a vendor SDK adapter on target, or
//! [`MockGpio`](crate::mock::MockGpio) off target.
//!
//! Pins are addressed by a plain [`Pin`] number. The valid range is
//! platform-defined and the trait does not validate it; what happens on an
//! out-of-range pin is up to the back-end (clamp, ignore or trap).
//!
//! # Example
//!
//! ```rust
//! use libplatform::gpio::{Gpio, Level, PinMode};
//!
//! fn blink<G: Gpio + ?Sized>(gpio: &mut G, led: u16) -> bool {
//!     gpio.pin_mode(led, PinMode::Output);
//!     gpio.digital_write(led, Level::High);
//!     Level::from_reading(gpio.digital_read(led)) == Ok(Level::High)
//! }
//! ```

/// Sentinel-to-`Result` error classification
pub mod error;

pub use error::Error;

use serde::{Deserialize, Serialize};

/// Platform pin identifier.
pub type Pin = u16;

/// Sentinel pin value meaning "no pin configured".
pub const INVALID_PIN: Pin = 0xFFFF;

/// Value returned by [`Gpio::digital_read`] for an unsupported pin.
///
/// Back-ends may use any negative value; this is the one the mocks use.
pub const READ_ERROR: i32 = -1;

/// Direction of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// High impedance input.
    Input = 0,
    /// Push-pull output.
    Output = 1,
}

/// Logic level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Level {
    /// Logic 0.
    #[default]
    Low = 0,
    /// Logic 1.
    High = 1,
}

impl Level {
    /// Classify a raw [`Gpio::digital_read`] result.
    ///
    /// Negative values are error sentinels ([`READ_ERROR`] maps to
    /// [`Error::UnsupportedPin`]); `0` is low and any other non-negative
    /// value is high.
    pub fn from_reading(raw: i32) -> Result<Self, Error> {
        match raw {
            READ_ERROR => Err(Error::UnsupportedPin),
            r if r < 0 => Err(Error::InvalidReading(r)),
            0 => Ok(Level::Low),
            _ => Ok(Level::High),
        }
    }

    /// The value a successful [`Gpio::digital_read`] reports for this level.
    pub fn as_reading(self) -> i32 {
        self as i32
    }

    /// The opposite level.
    pub fn toggled(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level == Level::High
    }
}

/// Digital pin control.
pub trait Gpio {
    /// Configure the direction of `pin`.
    fn pin_mode(&mut self, pin: Pin, mode: PinMode);

    /// Drive `pin` to `level`.
    ///
    /// There is no return code; an unsupported pin is handled however the
    /// back-end documents it.
    fn digital_write(&mut self, pin: Pin, level: Level);

    /// Read the level of `pin`.
    ///
    /// Returns `0` or `1` for a level and a negative sentinel (see
    /// [`READ_ERROR`]) when the pin cannot be read.
    fn digital_read(&mut self, pin: Pin) -> i32;
}
