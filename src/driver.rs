//! Register codec for the Motorknob.
//!
//! Turns caller byte buffers into register words and back, and issues one
//! bus transaction per call. Nothing is retried; a failed transaction is
//! reported to the caller as-is.

use crate::bus::RegisterBus;
use crate::error::KnobError;
use crate::registers::{decode_word, encode_word, Register, WORD_LEN};

/// Handle to the one bound Motorknob.
///
/// Owns the bus endpoint for exclusive access. Attribute handlers borrow it
/// for the duration of a single access.
pub struct KnobDriver<B> {
    bus: B,
}

impl<B> KnobDriver<B>
where
    B: RegisterBus,
{
    /// Create a new driver on top of a bound bus endpoint.
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Give the bus endpoint back.
    pub fn release(self) -> B {
        self.bus
    }

    // -----------------------------------------------------------------------
    // Typed word access
    // -----------------------------------------------------------------------

    /// Read the raw word held by `register`.
    pub fn read_word(&mut self, register: Register) -> Result<u16, KnobError<B::Error>> {
        let address = register.read_address();
        self.bus.read_word(address).map_err(|e| {
            error!("Failed to read register {:#x}", address);
            KnobError::Bus(e)
        })
    }

    /// Write a raw word to `register`.
    pub fn write_word(&mut self, register: Register, value: u16) -> Result<(), KnobError<B::Error>> {
        let address = register.write_address();
        self.bus.write_word(address, value).map_err(|e| {
            error!("Failed to send data to register {:#x}", address);
            KnobError::Bus(e)
        })
    }

    // -----------------------------------------------------------------------
    // Byte buffer access
    // -----------------------------------------------------------------------

    /// Write the word carried by the first two bytes of `payload`.
    ///
    /// Returns the full payload length on success, even though only the
    /// first two bytes are used.
    ///
    /// # Errors
    /// * [`KnobError::InvalidArgument`] if `payload` is shorter than 2 bytes;
    ///   no bus transaction is issued
    /// * [`KnobError::Bus`] on communication failure
    pub fn write(&mut self, register: Register, payload: &[u8]) -> Result<usize, KnobError<B::Error>> {
        let Some(word) = encode_word(payload) else {
            return Err(KnobError::InvalidArgument);
        };
        self.write_word(register, word)?;
        debug!("Wrote {:#x} to register {:#x}", word, register.write_address());
        Ok(payload.len())
    }

    /// Read `register` as two bytes, low byte first.
    ///
    /// # Errors
    /// * [`KnobError::Bus`] on communication failure
    pub fn read(&mut self, register: Register) -> Result<[u8; WORD_LEN], KnobError<B::Error>> {
        let word = self.read_word(register)?;
        Ok(decode_word(word))
    }

    /// Read `register` into the start of `buffer`, returning the byte count.
    ///
    /// # Errors
    /// * [`KnobError::InvalidArgument`] if `buffer` cannot hold 2 bytes;
    ///   no bus transaction is issued
    /// * [`KnobError::Bus`] on communication failure
    pub fn read_into(&mut self, register: Register, buffer: &mut [u8]) -> Result<usize, KnobError<B::Error>> {
        let Some(out) = buffer.get_mut(..WORD_LEN) else {
            return Err(KnobError::InvalidArgument);
        };
        out.copy_from_slice(&self.read(register)?);
        Ok(WORD_LEN)
    }
}
