//! Error type for digital I/O readings

/// Classification of failed GPIO readings.
///
/// The [`Gpio`](super::Gpio) trait itself reports failures through negative
/// sentinels; this type exists for callers that prefer a `Result`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The back-end does not support the requested pin.
    UnsupportedPin,
    /// A read returned the given negative sentinel.
    InvalidReading(i32),
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::UnsupportedPin => defmt::write!(f, "UnsupportedPin"),
            Error::InvalidReading(raw) => defmt::write!(f, "InvalidReading({})", raw),
        }
    }
}
