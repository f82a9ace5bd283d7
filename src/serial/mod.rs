//! Serial stream (UART) capability.
//!
//! A back-end implements the two explicit initialization entry points,
//! [`Serial::write_bytes`] and [`Serial::flush`]. Everything else, including
//! the single-argument [`Serial::begin`] and the whole `print`/`println`
//! family, has a default body built on those and may be overridden when the
//! underlying SDK formats values itself.
//!
//! Every output operation returns the number of bytes the back-end accepted.
//! [`Serial::flush`] is the only blocking operation: when it returns, nothing
//! written before the call is still pending.
//!
//! # Example
//!
//! ```rust
//! use libplatform::serial::Serial;
//!
//! fn report<S: Serial + ?Sized>(log: &mut S, temperature: f32, uptime_ms: u32) -> usize {
//!     let mut n = log.print_str("temp=");
//!     n += log.print_float(temperature);
//!     n += log.print_str(" uptime=");
//!     n += log.println_uint(uptime_ms);
//!     log.flush();
//!     n
//! }
//! ```

mod format;

pub use format::{DEFAULT_RADIX, RADIX_BUFFER_LEN, format_radix};

use crate::time::UnixTime;
use core::fmt;

/// Line terminator emitted by the `println` family.
pub const LINE_ENDING: &str = "\r\n";

/// Character parity of a serial frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    /// No parity bit.
    None,
    /// Even parity.
    Even,
    /// Odd parity.
    Odd,
}

/// Serial line configuration word.
///
/// Bit layout: bit 0 selects 7 data bits (8 otherwise), bits 2..=3 select
/// parity, bit 4 selects two stop bits. The all-zero word is 8N1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineConfig(pub u32);

impl LineConfig {
    const DATA_BITS_7: u32 = 0b0_0001;
    const PARITY_EVEN: u32 = 0b0_0100;
    const PARITY_ODD: u32 = 0b0_1000;
    const STOP_BITS_2: u32 = 0b1_0000;

    /// Configuration used when none is given.
    pub const DEFAULT: Self = Self(0);
    /// 8 data bits, no parity, 1 stop bit.
    pub const SERIAL_8N1: Self = Self(0);
    /// 8 data bits, no parity, 2 stop bits.
    pub const SERIAL_8N2: Self = Self(Self::STOP_BITS_2);
    /// 8 data bits, even parity, 1 stop bit.
    pub const SERIAL_8E1: Self = Self(Self::PARITY_EVEN);
    /// 8 data bits, odd parity, 1 stop bit.
    pub const SERIAL_8O1: Self = Self(Self::PARITY_ODD);
    /// 7 data bits, even parity, 1 stop bit.
    pub const SERIAL_7E1: Self = Self(Self::DATA_BITS_7 | Self::PARITY_EVEN);

    /// Number of data bits per character.
    pub fn data_bits(self) -> u32 {
        if self.0 & Self::DATA_BITS_7 != 0 { 7 } else { 8 }
    }

    /// Parity setting.
    pub fn parity(self) -> Parity {
        if self.0 & Self::PARITY_EVEN != 0 {
            Parity::Even
        } else if self.0 & Self::PARITY_ODD != 0 {
            Parity::Odd
        } else {
            Parity::None
        }
    }

    /// Number of stop bits.
    pub fn stop_bits(self) -> u32 {
        if self.0 & Self::STOP_BITS_2 != 0 { 2 } else { 1 }
    }

    /// Bits on the wire per character, start bit included.
    pub fn bits_per_frame(self) -> u32 {
        let parity = if self.parity() == Parity::None { 0 } else { 1 };
        1 + self.data_bits() + parity + self.stop_bits()
    }
}

impl From<u32> for LineConfig {
    fn from(word: u32) -> Self {
        Self(word)
    }
}

/// Serial output stream.
pub trait Serial {
    /// Initialize the port at `speed` baud (signed legacy entry point).
    fn begin_signed(&mut self, speed: i32);

    /// Initialize the port at `speed` baud with an explicit line configuration.
    fn begin_with_config(&mut self, speed: u32, config: LineConfig);

    /// Initialize the port at `speed` baud with [`LineConfig::DEFAULT`].
    fn begin(&mut self, speed: u32) {
        self.begin_with_config(speed, LineConfig::DEFAULT);
    }

    /// Queue raw bytes for transmission. Returns the number accepted.
    fn write_bytes(&mut self, bytes: &[u8]) -> usize;

    /// Block until every byte queued so far has been physically transmitted.
    fn flush(&mut self);

    /// Print formatted arguments. Returns the number of bytes accepted.
    fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> usize {
        let mut writer = CountingWriter {
            serial: self,
            written: 0,
        };
        // A short write stops formatting; the count already reflects it.
        let _ = fmt::write(&mut writer, args);
        writer.written
    }

    /// Print a string.
    fn print_str(&mut self, s: &str) -> usize {
        self.write_bytes(s.as_bytes())
    }

    /// Print a signed integer in decimal.
    fn print_int(&mut self, value: i32) -> usize {
        self.print_fmt(format_args!("{}", value))
    }

    /// Print an unsigned integer in decimal.
    fn print_uint(&mut self, value: u32) -> usize {
        self.print_fmt(format_args!("{}", value))
    }

    /// Print an epoch timestamp as its integer seconds value.
    fn print_time(&mut self, value: UnixTime) -> usize {
        self.print_fmt(format_args!("{}", value))
    }

    /// Print an unsigned integer in `base` (2..=36, anything else is decimal).
    fn print_radix(&mut self, value: u32, base: u32) -> usize {
        let mut buf = [0u8; RADIX_BUFFER_LEN];
        let digits = format_radix(value, base, &mut buf);
        self.write_bytes(digits)
    }

    /// Print a single precision float with two decimals.
    fn print_float(&mut self, value: f32) -> usize {
        self.print_fmt(format_args!("{:.2}", value))
    }

    /// Print a double precision float with two decimals.
    fn print_double(&mut self, value: f64) -> usize {
        self.print_fmt(format_args!("{:.2}", value))
    }

    /// Emit a line terminator only.
    fn println(&mut self) -> usize {
        self.print_str(LINE_ENDING)
    }

    /// Print a string followed by a line terminator.
    fn println_str(&mut self, s: &str) -> usize {
        self.print_str(s) + self.println()
    }

    /// Print a signed integer followed by a line terminator.
    fn println_int(&mut self, value: i32) -> usize {
        self.print_int(value) + self.println()
    }

    /// Print an unsigned integer followed by a line terminator.
    fn println_uint(&mut self, value: u32) -> usize {
        self.print_uint(value) + self.println()
    }

    /// Print an epoch timestamp followed by a line terminator.
    fn println_time(&mut self, value: UnixTime) -> usize {
        self.print_time(value) + self.println()
    }

    /// Print an unsigned integer in `base` followed by a line terminator.
    fn println_radix(&mut self, value: u32, base: u32) -> usize {
        self.print_radix(value, base) + self.println()
    }
}

/// Async counterpart of [`Serial::flush`].
#[cfg(feature = "async")]
pub trait AsyncSerial {
    /// Resolve once every byte queued so far has been transmitted.
    async fn flush(&mut self);
}

struct CountingWriter<'a, S: Serial + ?Sized> {
    serial: &'a mut S,
    written: usize,
}

impl<S: Serial + ?Sized> fmt::Write for CountingWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let accepted = self.serial.write_bytes(s.as_bytes());
        self.written += accepted;
        if accepted < s.len() {
            Err(fmt::Error)
        } else {
            Ok(())
        }
    }
}
