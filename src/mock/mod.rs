//! In-memory back-ends for host-side testing.
//!
//! Every mock that models time borrows one shared [`MockClock`], so a delay
//! on the time provider, a serial flush and a sleep all move the same
//! simulated uptime and the wall clock seen by the application stays
//! consistent with cloud syncs.
//!
//! ```rust
//! use libplatform::mock::{MockClock, MockCloud, MockSystem, MockTime};
//! use libplatform::prelude::*;
//! use core::time::Duration;
//!
//! let clock = MockClock::new();
//! let mut system = MockSystem::new(&clock);
//! let mut cloud = MockCloud::new(&clock);
//! let time = MockTime::new(&clock);
//!
//! cloud.connect();
//! assert!(system.wait_for_condition(&mut || cloud.process(), Duration::from_secs(5)));
//! assert!(cloud.sync_time());
//! assert!(system.wait_for_condition(&mut || { cloud.process(); cloud.sync_time_done() }, Duration::from_secs(5)));
//! assert!(time.is_valid());
//! ```

mod clock;
mod cloud;
mod gpio;
mod serial;
mod system;
mod time;
mod wire;

pub use clock::MockClock;
pub use cloud::{
    DEFAULT_CONNECT_LATENCY, DEFAULT_SERVER_EPOCH, DEFAULT_SYNC_LATENCY, MockCloud,
};
pub use gpio::{MOCK_PIN_CAPACITY, MockGpio};
pub use serial::{MockSerial, OUTPUT_CAPACITY, TX_FIFO_LEN};
pub use system::{DEFAULT_FREE_MEMORY, MOCK_EVENT_CAPACITY, MOCK_WAKE_CAPACITY, MockSystem};
pub use time::MockTime;
pub use wire::{
    MOCK_DEVICE_CAPACITY, MockWire, RESPONSE_CAPACITY, TRANSACTION_LOG_LEN, Transaction,
};
