//! Dependency injection bundle.
//!
//! The application receives one [`Platform`] at start-up and reaches every
//! capability through it. It never names a concrete back-end: on target the
//! handles point at SDK adapters, in tests at the [`mock`](crate::mock)
//! back-ends.

use crate::cloud::Cloud;
use crate::gpio::Gpio;
use crate::serial::Serial;
use crate::system::System;
use crate::time::TimeProvider;
use crate::wire::Wire;

/// Borrowed handles to the six platform capabilities.
pub struct Platform<'a> {
    /// Digital I/O.
    pub gpio: &'a mut dyn Gpio,
    /// I2C bus.
    pub wire: &'a mut dyn Wire,
    /// Serial console.
    pub serial: &'a mut dyn Serial,
    /// Time source.
    pub time: &'a mut dyn TimeProvider,
    /// System control.
    pub system: &'a mut dyn System,
    /// Cloud session.
    pub cloud: &'a mut dyn Cloud,
}

impl<'a> Platform<'a> {
    /// Bundle the given handles.
    pub fn new(
        gpio: &'a mut dyn Gpio,
        wire: &'a mut dyn Wire,
        serial: &'a mut dyn Serial,
        time: &'a mut dyn TimeProvider,
        system: &'a mut dyn System,
        cloud: &'a mut dyn Cloud,
    ) -> Self {
        Self {
            gpio,
            wire,
            serial,
            time,
            system,
            cloud,
        }
    }
}

impl core::fmt::Debug for Platform<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}
