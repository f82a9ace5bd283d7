//! Fixed-capacity event registration table.
//!
//! Back-ends embed an [`EventRegistry`] to implement
//! [`System::on`](super::System::on). Delivery is fan-out: every handler
//! registered for an event runs, in registration order. Registering the same
//! function twice makes it run twice.

use super::{Error, EventType, SystemEventHandler};
use heapless::Vec;

/// Registration table holding up to `N` handlers across all event types.
pub struct EventRegistry<const N: usize> {
    handlers: Vec<(EventType, SystemEventHandler), N>,
}

impl<const N: usize> Default for EventRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for EventRegistry<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("registered", &self.handlers.len())
            .field("capacity", &N)
            .finish()
    }
}

impl<const N: usize> EventRegistry<N> {
    /// An empty table.
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Append `handler` for `event`.
    pub fn register(&mut self, event: EventType, handler: SystemEventHandler) -> Result<(), Error> {
        self.handlers
            .push((event, handler))
            .map_err(|_| Error::RegistryFull)?;
        debug!("event handler registered ({} of {})", self.handlers.len(), N);
        Ok(())
    }

    /// Call every handler registered for `event` with `data`.
    ///
    /// Returns the number of handlers called.
    pub fn dispatch(&self, event: EventType, data: i32) -> usize {
        let mut called = 0;
        for (registered, handler) in self.handlers.iter() {
            if *registered == event {
                handler(event, data);
                called += 1;
            }
        }
        trace!("dispatched {} to {} handler(s)", event, called);
        called
    }

    /// Number of handlers registered for `event`.
    pub fn count(&self, event: EventType) -> usize {
        self.handlers.iter().filter(|(e, _)| *e == event).count()
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Remove every registration.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}
