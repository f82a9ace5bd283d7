//! Common error types for system control

/// Errors reported by [`System`](super::System) helpers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The event registration table has no free slot.
    RegistryFull,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::RegistryFull => defmt::write!(f, "RegistryFull"),
        }
    }
}
