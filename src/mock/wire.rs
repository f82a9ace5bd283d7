//! Mock I2C bus.

use crate::wire::{BUFFER_LENGTH, STANDARD_CLOCK_HZ, TransmissionStatus, Wire};
use heapless::{Deque, FnvIndexMap, Vec};

/// Number of completed write transactions kept by [`MockWire`].
pub const TRANSACTION_LOG_LEN: usize = 16;

/// Maximum number of devices with scripted behaviour.
pub const MOCK_DEVICE_CAPACITY: usize = 8;

/// Bytes a scripted device can hold for [`Wire::request_from`].
pub const RESPONSE_CAPACITY: usize = 64;

/// A write transaction that completed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Target address.
    pub address: u8,
    /// Bytes transmitted.
    pub bytes: Vec<u8, BUFFER_LENGTH>,
    /// Bus clock in effect when the transaction ran.
    pub clock_hz: u32,
}

/// [`Wire`] back-end with scriptable devices and faults.
///
/// - Writes on a disabled bus are rejected and the transaction ends with
///   [`TransmissionStatus::Other`].
/// - The transmit buffer holds [`BUFFER_LENGTH`] bytes; a rejected byte makes
///   the transaction end with [`TransmissionStatus::DataTooLong`].
/// - [`nack`](Self::nack) addresses end with
///   [`TransmissionStatus::AddressNack`] and return no data.
/// - [`stall`](Self::stall) simulates a locked bus: every transaction ends
///   with [`TransmissionStatus::Timeout`] until [`Wire::reset`].
#[derive(Debug)]
pub struct MockWire {
    enabled: bool,
    clock_hz: u32,
    target: Option<u8>,
    tx: Vec<u8, BUFFER_LENGTH>,
    write_rejected: bool,
    stalled: bool,
    nacking: Vec<u8, MOCK_DEVICE_CAPACITY>,
    responses: FnvIndexMap<u8, Deque<u8, RESPONSE_CAPACITY>, MOCK_DEVICE_CAPACITY>,
    rx: Deque<u8, BUFFER_LENGTH>,
    log: Vec<Transaction, TRANSACTION_LOG_LEN>,
    resets: u32,
}

impl Default for MockWire {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWire {
    /// A disabled bus at [`STANDARD_CLOCK_HZ`].
    pub fn new() -> Self {
        Self {
            enabled: false,
            clock_hz: STANDARD_CLOCK_HZ,
            target: None,
            tx: Vec::new(),
            write_rejected: false,
            stalled: false,
            nacking: Vec::new(),
            responses: FnvIndexMap::new(),
            rx: Deque::new(),
            log: Vec::new(),
            resets: 0,
        }
    }

    /// Current bus clock.
    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    /// Make `address` refuse to acknowledge. Returns `false` if the device
    /// table is full.
    pub fn nack(&mut self, address: u8) -> bool {
        self.nacking.contains(&address) || self.nacking.push(address).is_ok()
    }

    /// Lock up the bus until the next [`Wire::reset`].
    pub fn stall(&mut self) {
        self.stalled = true;
    }

    /// Whether the bus is currently locked up.
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    /// Queue bytes that `address` returns on subsequent reads.
    ///
    /// Returns the number of bytes queued, which is short when the device's
    /// response buffer or the device table is full.
    pub fn queue_response(&mut self, address: u8, bytes: &[u8]) -> usize {
        if !self.responses.contains_key(&address)
            && self.responses.insert(address, Deque::new()).is_err()
        {
            return 0;
        }
        let Some(queue) = self.responses.get_mut(&address) else {
            return 0;
        };
        bytes
            .iter()
            .take_while(|&&byte| queue.push_back(byte).is_ok())
            .count()
    }

    /// Completed write transactions, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.log
    }

    /// Number of times [`Wire::reset`] was called.
    pub fn reset_count(&self) -> u32 {
        self.resets
    }

    fn record(&mut self, address: u8) {
        if self.log.is_full() {
            self.log.remove(0);
        }
        let transaction = Transaction {
            address,
            bytes: self.tx.clone(),
            clock_hz: self.clock_hz,
        };
        // Room was made above.
        let _ = self.log.push(transaction);
    }
}

impl Wire for MockWire {
    fn begin(&mut self) {
        if !self.enabled {
            debug!("i2c enabled at {} Hz", self.clock_hz);
        }
        self.enabled = true;
    }

    fn set_clock(&mut self, speed: u32) {
        self.clock_hz = speed;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn begin_transmission(&mut self, address: u8) {
        self.target = Some(address);
        self.tx.clear();
        self.write_rejected = false;
    }

    fn end_transmission(&mut self) -> u8 {
        let Some(address) = self.target.take() else {
            return TransmissionStatus::Other.code();
        };
        let status = if !self.enabled {
            TransmissionStatus::Other
        } else if self.stalled {
            TransmissionStatus::Timeout
        } else if self.write_rejected {
            TransmissionStatus::DataTooLong
        } else if self.nacking.contains(&address) {
            TransmissionStatus::AddressNack
        } else {
            self.record(address);
            TransmissionStatus::Success
        };
        if !status.is_success() {
            debug!("i2c write to {} failed: {}", address, status.code());
        }
        self.tx.clear();
        status.code()
    }

    fn write(&mut self, byte: u8) -> usize {
        if self.target.is_none() {
            return 0;
        }
        if !self.enabled || self.tx.push(byte).is_err() {
            self.write_rejected = true;
            return 0;
        }
        1
    }

    fn reset(&mut self) -> i32 {
        info!("i2c bus reset");
        self.target = None;
        self.tx.clear();
        self.write_rejected = false;
        self.stalled = false;
        self.rx.clear();
        self.enabled = true;
        self.resets += 1;
        0
    }

    fn request_from(&mut self, address: u8, quantity: usize) -> usize {
        self.rx.clear();
        if !self.enabled || self.stalled || self.nacking.contains(&address) {
            return 0;
        }
        let Some(queue) = self.responses.get_mut(&address) else {
            return 0;
        };
        let mut received = 0;
        while received < quantity.min(BUFFER_LENGTH) {
            let Some(byte) = queue.pop_front() else {
                break;
            };
            // rx was cleared and received stays below its capacity.
            let _ = self.rx.push_back(byte);
            received += 1;
        }
        received
    }

    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read(&mut self) -> i32 {
        self.rx.pop_front().map_or(-1, i32::from)
    }
}
