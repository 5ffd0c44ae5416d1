//! Error types for the Motorknob driver.

use core::fmt;

/// Errors that can occur when talking to the Motorknob or publishing its
/// attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnobError<E> {
    /// Underlying bus transaction failed. Carries the transport's error.
    Bus(E),

    /// Caller input was malformed (write payload or read buffer shorter
    /// than one register word).
    InvalidArgument,

    /// A container or attribute endpoint could not be created.
    ResourceExhausted,

    /// Write attempted on an attribute that has no write handler.
    ReadOnly,

    /// No published attribute lives at the requested path.
    NotFound,
}

// Allow ergonomic `?` propagation from raw bus errors.
impl<E> From<E> for KnobError<E> {
    fn from(error: E) -> Self {
        KnobError::Bus(error)
    }
}

impl<E: fmt::Debug> fmt::Display for KnobError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KnobError::Bus(e) => write!(f, "Bus error: {:?}", e),
            KnobError::InvalidArgument => write!(f, "Invalid argument (need at least 2 bytes)"),
            KnobError::ResourceExhausted => write!(f, "Could not create attribute entries"),
            KnobError::ReadOnly => write!(f, "Attribute is read-only"),
            KnobError::NotFound => write!(f, "No such attribute"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for KnobError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            KnobError::Bus(e) => defmt::write!(f, "Bus error: {}", e),
            KnobError::InvalidArgument => defmt::write!(f, "Invalid argument"),
            KnobError::ResourceExhausted => defmt::write!(f, "Resource exhausted"),
            KnobError::ReadOnly => defmt::write!(f, "Attribute is read-only"),
            KnobError::NotFound => defmt::write!(f, "No such attribute"),
        }
    }
}
