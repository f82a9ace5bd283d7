//! Mock digital I/O.

use crate::gpio::{Gpio, INVALID_PIN, Level, Pin, PinMode, READ_ERROR};
use heapless::FnvIndexMap;

/// Maximum number of distinct pins a [`MockGpio`] tracks.
pub const MOCK_PIN_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PinState {
    mode: PinMode,
    level: Level,
}

impl Default for PinState {
    fn default() -> Self {
        Self {
            mode: PinMode::Input,
            level: Level::Low,
        }
    }
}

/// [`Gpio`] back-end keeping pin state in memory.
///
/// Pins `0..pin_count` are supported. Writes to other pins are ignored and
/// reads return [`READ_ERROR`]. Each pin holds one level: the last written
/// or externally [`drive`](Self::drive)n one, `Low` initially.
#[derive(Debug)]
pub struct MockGpio {
    pins: FnvIndexMap<Pin, PinState, MOCK_PIN_CAPACITY>,
    pin_count: u16,
}

impl MockGpio {
    /// A bank of `pin_count` pins, capped at [`MOCK_PIN_CAPACITY`].
    pub fn new(pin_count: u16) -> Self {
        Self {
            pins: FnvIndexMap::new(),
            pin_count: pin_count.min(MOCK_PIN_CAPACITY as u16),
        }
    }

    /// Whether `pin` is in the supported range.
    pub fn supports(&self, pin: Pin) -> bool {
        pin != INVALID_PIN && pin < self.pin_count
    }

    /// Configured mode of `pin`, `None` if unsupported.
    pub fn mode(&self, pin: Pin) -> Option<PinMode> {
        if !self.supports(pin) {
            return None;
        }
        Some(self.pins.get(&pin).copied().unwrap_or_default().mode)
    }

    /// Simulate an external signal driving `pin` to `level`.
    pub fn drive(&mut self, pin: Pin, level: Level) {
        if let Some(state) = self.state_mut(pin) {
            state.level = level;
        }
    }

    fn state_mut(&mut self, pin: Pin) -> Option<&mut PinState> {
        if !self.supports(pin) {
            return None;
        }
        if !self.pins.contains_key(&pin) {
            // Capacity matches the largest supported bank, so this cannot fail.
            self.pins.insert(pin, PinState::default()).ok()?;
        }
        self.pins.get_mut(&pin)
    }
}

impl Gpio for MockGpio {
    fn pin_mode(&mut self, pin: Pin, mode: PinMode) {
        match self.state_mut(pin) {
            Some(state) => state.mode = mode,
            None => warn!("pin_mode on unsupported pin {}", pin),
        }
    }

    fn digital_write(&mut self, pin: Pin, level: Level) {
        match self.state_mut(pin) {
            Some(state) => state.level = level,
            None => warn!("digital_write on unsupported pin {}", pin),
        }
    }

    fn digital_read(&mut self, pin: Pin) -> i32 {
        if !self.supports(pin) {
            return READ_ERROR;
        }
        self.pins
            .get(&pin)
            .copied()
            .unwrap_or_default()
            .level
            .as_reading()
    }
}
