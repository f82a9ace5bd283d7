//! # libplatform - hardware platform abstraction for IoT firmware
//!
//! Application logic (sensor loops, power management, connectivity
//! policies) talks to the hardware through six capability traits and never
//! names a vendor SDK. The same application then runs on a device, against
//! an SDK adapter, and on the host, against the in-memory [`mock`]
//! back-ends.
//!
//! ## Capabilities
//!
//! - [`gpio::Gpio`]: digital pin mode, read and write
//! - [`wire::Wire`]: I2C bus transactions and bus recovery
//! - [`serial::Serial`]: UART output with a `print`/`println` family
//! - [`time::TimeProvider`]: wall clock, time zone and uptime
//! - [`system::System`]: events, reset reason, waiting and sleep
//! - [`cloud::Cloud`]: session lifecycle and time synchronization
//!
//! [`platform::Platform`] bundles one handle to each for dependency
//! injection.
//!
//! ## Usage
//!
//! ```rust
//! use core::time::Duration;
//! use libplatform::mock::{MockClock, MockCloud, MockGpio, MockSerial, MockSystem, MockTime, MockWire};
//! use libplatform::platform::Platform;
//! use libplatform::prelude::*;
//!
//! fn setup(p: &mut Platform<'_>) -> bool {
//!     p.serial.begin(115_200);
//!     p.wire.begin();
//!     p.gpio.pin_mode(7, PinMode::Output);
//!     p.cloud.connect();
//!     let cloud = &mut *p.cloud;
//!     p.system.wait_for_condition(&mut || cloud.process(), Duration::from_secs(30))
//! }
//!
//! let clock = MockClock::new();
//! let (mut gpio, mut wire) = (MockGpio::new(20), MockWire::new());
//! let mut serial = MockSerial::new(&clock);
//! let mut time = MockTime::new(&clock);
//! let mut system = MockSystem::new(&clock);
//! let mut cloud = MockCloud::new(&clock);
//!
//! let mut platform = Platform::new(&mut gpio, &mut wire, &mut serial, &mut time, &mut system, &mut cloud);
//! assert!(setup(&mut platform));
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `async`: Async counterparts of the blocking operations (`delay`,
//!   `flush`, `wait_for_condition`, `sleep`)
//! - `defmt`: defmt logging from the mock back-ends and `defmt::Format` for
//!   every public value type

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(async_fn_in_trait)]

#[macro_use]
mod fmt;

/// Digital I/O pins.
pub mod gpio;

/// I2C bus.
pub mod wire;

/// Serial output stream.
pub mod serial;

/// Wall clock, time zone and uptime.
pub mod time;

/// System events, reset diagnostics, waiting and sleep.
pub mod system;

/// Cloud session and time synchronization.
pub mod cloud;

/// JSON configuration and report serialization.
pub mod config;

/// Dependency injection bundle of all capabilities.
pub mod platform;

/// In-memory back-ends for host-side tests and simulation.
pub mod mock;

/// The capability traits and the value types most call sites need.
pub mod prelude {
    pub use crate::cloud::{Cloud, DisconnectOptions};
    pub use crate::gpio::{Gpio, Level, PinMode};
    pub use crate::serial::{LineConfig, Serial};
    pub use crate::system::{EventType, SleepConfig, SleepMode, System, WakeupReason};
    pub use crate::time::TimeProvider;
    pub use crate::wire::{TransmissionStatus, Wire};
}
