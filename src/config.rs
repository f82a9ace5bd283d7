//! JSON configuration and report serialization.
//!
//! Configuration values such as [`SleepConfig`](crate::system::SleepConfig)
//! and [`DisconnectOptions`](crate::cloud::DisconnectOptions) can be loaded
//! from small JSON documents, for example a cloud-pushed power profile.
//! Everything here is `no_std` and allocation-free.

use heapless::String;
use serde::{Deserialize, Serialize};

/// Error type for configuration parsing and report rendering.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The input is not valid JSON for the expected type.
    InvalidJson,
    /// The output buffer is too small for the rendered JSON.
    BufferOverflow,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::InvalidJson => defmt::write!(f, "InvalidJson"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
        }
    }
}

/// Deserialize `T` from a JSON document.
pub fn from_json<'a, T: Deserialize<'a>>(json: &'a str) -> Result<T, Error> {
    let (value, _) = serde_json_core::from_str(json).map_err(|_| Error::InvalidJson)?;
    Ok(value)
}

/// Render `value` as JSON into a fixed-capacity string.
pub fn to_json<T: Serialize, const N: usize>(value: &T) -> Result<String<N>, Error> {
    let mut buf = [0u8; N];
    let len = serde_json_core::to_slice(value, &mut buf).map_err(|_| Error::BufferOverflow)?;
    let json = core::str::from_utf8(&buf[..len]).map_err(|_| Error::InvalidJson)?;
    String::try_from(json).map_err(|_| Error::BufferOverflow)
}

/// Serde adapter storing a [`Duration`](core::time::Duration) as integer
/// milliseconds.
pub(crate) mod duration_ms {
    use core::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
