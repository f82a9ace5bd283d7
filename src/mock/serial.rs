//! Mock serial port.

use super::MockClock;
use crate::serial::{LineConfig, Serial};
use heapless::Vec;

/// Size of the simulated transmit FIFO.
pub const TX_FIFO_LEN: usize = 64;

/// Bytes of transmitted output kept for inspection.
pub const OUTPUT_CAPACITY: usize = 1024;

/// [`Serial`] back-end recording everything it transmits.
///
/// Written bytes first sit in a [`TX_FIFO_LEN`]-byte FIFO. They move to the
/// transmitted output when the FIFO is full (the write then blocks for the
/// time the line needs) or on [`flush`](Serial::flush). Transmission time
/// follows the configured speed and [`LineConfig::bits_per_frame`] and is
/// charged to the shared [`MockClock`].
///
/// Writes before `begin` are rejected. Output beyond [`OUTPUT_CAPACITY`] is
/// transmitted but not recorded.
#[derive(Debug)]
pub struct MockSerial<'a> {
    clock: &'a MockClock,
    speed: Option<u32>,
    config: LineConfig,
    fifo: Vec<u8, TX_FIFO_LEN>,
    output: Vec<u8, OUTPUT_CAPACITY>,
    transmitted: usize,
}

impl<'a> MockSerial<'a> {
    /// An uninitialized port charging transmission time to `clock`.
    pub fn new(clock: &'a MockClock) -> Self {
        Self {
            clock,
            speed: None,
            config: LineConfig::DEFAULT,
            fifo: Vec::new(),
            output: Vec::new(),
            transmitted: 0,
        }
    }

    /// Baud rate, `None` before `begin`.
    pub fn speed(&self) -> Option<u32> {
        self.speed
    }

    /// Line configuration in effect.
    pub fn config(&self) -> LineConfig {
        self.config
    }

    /// Bytes written but not yet transmitted.
    pub fn pending(&self) -> &[u8] {
        &self.fifo
    }

    /// Recorded output, `""` if it is not valid UTF-8.
    pub fn output(&self) -> &str {
        core::str::from_utf8(&self.output).unwrap_or("")
    }

    /// Recorded output as raw bytes.
    pub fn output_bytes(&self) -> &[u8] {
        &self.output
    }

    /// Total bytes transmitted, recorded or not.
    pub fn transmitted(&self) -> usize {
        self.transmitted
    }

    /// Discard the recorded output.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Time the line needs for `bytes` characters, rounded up.
    pub fn transmit_time_ms(&self, bytes: usize) -> u64 {
        let Some(speed) = self.speed.filter(|&s| s > 0) else {
            return 0;
        };
        let bits = bytes as u64 * u64::from(self.config.bits_per_frame());
        (bits * 1000).div_ceil(u64::from(speed))
    }

    fn drain(&mut self) {
        if self.fifo.is_empty() {
            return;
        }
        self.clock.advance_ms(self.transmit_time_ms(self.fifo.len()));
        for &byte in self.fifo.iter() {
            if self.output.push(byte).is_err() {
                break;
            }
        }
        self.transmitted += self.fifo.len();
        self.fifo.clear();
    }
}

impl Serial for MockSerial<'_> {
    fn begin_signed(&mut self, speed: i32) {
        match u32::try_from(speed) {
            Ok(speed) => self.begin(speed),
            Err(_) => warn!("ignoring negative baud rate {}", speed),
        }
    }

    fn begin_with_config(&mut self, speed: u32, config: LineConfig) {
        // Reconfiguring finishes the frames already on the line.
        self.drain();
        self.speed = Some(speed);
        self.config = config;
        debug!("serial at {} baud, config {}", speed, config.0);
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        if self.speed.is_none() {
            return 0;
        }
        for &byte in bytes {
            if self.fifo.is_full() {
                self.drain();
            }
            // The FIFO was drained if it was full.
            let _ = self.fifo.push(byte);
        }
        bytes.len()
    }

    fn flush(&mut self) {
        self.drain();
    }
}

#[cfg(feature = "async")]
impl crate::serial::AsyncSerial for MockSerial<'_> {
    async fn flush(&mut self) {
        Serial::flush(self);
    }
}
