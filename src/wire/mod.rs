//! I2C bus capability.
//!
//! The [`Wire`] trait follows the classic begin/write/end transaction shape:
//!
//! ```text
//! uninitialized ──begin()──▶ enabled
//!
//! enabled: begin_transmission(addr) ─▶ write(byte)* ─▶ end_transmission() -> status
//! ```
//!
//! [`Wire::reset`] is the recovery path for a hung bus. It must be safe to
//! call at any point, including in the middle of a failed transaction.
//!
//! # Example
//!
//! ```rust
//! use libplatform::wire::{TransmissionStatus, Wire};
//!
//! fn write_register<W: Wire + ?Sized>(bus: &mut W, addr: u8, reg: u8, value: u8) -> TransmissionStatus {
//!     bus.begin_transmission(addr);
//!     bus.write_bytes(&[reg, value]);
//!     let status = TransmissionStatus::from_code(bus.end_transmission());
//!     if status == TransmissionStatus::Timeout {
//!         bus.reset();
//!     }
//!     status
//! }
//! ```

/// Default bus speed in hertz (standard mode).
pub const STANDARD_CLOCK_HZ: u32 = 100_000;

/// Fast mode bus speed in hertz.
pub const FAST_CLOCK_HZ: u32 = 400_000;

/// Size of a transmit or receive buffer on the reference platforms.
pub const BUFFER_LENGTH: usize = 32;

/// Outcome of [`Wire::end_transmission`].
///
/// Codes follow the conventional Arduino/Particle taxonomy. Back-ends may
/// return other non-zero codes; [`from_code`](Self::from_code) folds those
/// into [`Other`](Self::Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TransmissionStatus {
    /// The transaction completed.
    Success = 0,
    /// More data was written than fits the transmit buffer.
    DataTooLong = 1,
    /// The address byte was not acknowledged.
    AddressNack = 2,
    /// A data byte was not acknowledged.
    DataNack = 3,
    /// Any other bus error, including writing on a disabled bus.
    Other = 4,
    /// The bus did not become free in time (lockup).
    Timeout = 5,
}

impl TransmissionStatus {
    /// Classify a raw status code.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::DataTooLong,
            2 => Self::AddressNack,
            3 => Self::DataNack,
            5 => Self::Timeout,
            _ => Self::Other,
        }
    }

    /// Raw status code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// `true` for [`Success`](Self::Success).
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// I2C bus control.
pub trait Wire {
    /// Enable the bus. Idempotent.
    fn begin(&mut self);

    /// Set the bus clock in hertz.
    ///
    /// Valid at any time after [`begin`](Self::begin); takes effect on the
    /// next transaction.
    fn set_clock(&mut self, speed: u32);

    /// Whether [`begin`](Self::begin) has been called and the bus is usable.
    fn is_enabled(&self) -> bool;

    /// Start queueing a write transaction to the 7-bit `address`.
    fn begin_transmission(&mut self, address: u8);

    /// Transmit the queued bytes and finish the transaction.
    ///
    /// Returns `0` on success and a non-zero status code otherwise, see
    /// [`TransmissionStatus`].
    fn end_transmission(&mut self) -> u8;

    /// Queue one byte for the current transaction.
    ///
    /// Returns the number of bytes queued: `1`, or `0` when the buffer is
    /// full or no transaction is open.
    fn write(&mut self, byte: u8) -> usize;

    /// Force the bus back to an idle, usable state.
    ///
    /// Returns `0` on success. Safe to call mid-transaction.
    fn reset(&mut self) -> i32;

    /// Read up to `quantity` bytes from `address` into the receive buffer.
    ///
    /// Returns the number of bytes received.
    fn request_from(&mut self, address: u8, quantity: usize) -> usize;

    /// Number of received bytes waiting to be [`read`](Self::read).
    fn available(&self) -> usize;

    /// Pop the next received byte, or `-1` when none is buffered.
    fn read(&mut self) -> i32;

    /// Queue every byte of `bytes`, stopping at the first rejected one.
    ///
    /// Returns the number of bytes queued.
    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let mut queued = 0;
        for &byte in bytes {
            if self.write(byte) == 0 {
                break;
            }
            queued += 1;
        }
        queued
    }
}
