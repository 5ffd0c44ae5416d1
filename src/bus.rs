//! Register-oriented bus transport.
//!
//! [`RegisterBus`] is the seam the codec talks through: one register byte and
//! one 16-bit word per transaction. [`SmbusDevice`] implements it over any
//! blocking `embedded-hal` I2C bus using SMBus word semantics.

use core::fmt;

use embedded_hal::i2c::I2c;

/// A blocking, single-register word transport bound to one device.
pub trait RegisterBus {
    /// Error reported by the underlying transport.
    type Error: fmt::Debug;

    /// Read one 16-bit word from `register`.
    fn read_word(&mut self, register: u8) -> Result<u16, Self::Error>;

    /// Write one 16-bit word to `register`.
    fn write_word(&mut self, register: u8, value: u16) -> Result<(), Self::Error>;
}

impl<B> RegisterBus for &mut B
where
    B: RegisterBus + ?Sized,
{
    type Error = B::Error;

    fn read_word(&mut self, register: u8) -> Result<u16, Self::Error> {
        (**self).read_word(register)
    }

    fn write_word(&mut self, register: u8, value: u16) -> Result<(), Self::Error> {
        (**self).write_word(register, value)
    }
}

/// SMBus word access to a device on an I2C bus.
///
/// Words travel low byte first, as SMBus "read/write word data" specifies:
/// - write: `[register, low, high]` in one transaction
/// - read: `[register]` then a repeated-start read of `[low, high]`
pub struct SmbusDevice<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> SmbusDevice<I2C>
where
    I2C: I2c,
{
    /// Bind an I2C bus to a device address.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (typically 0x55)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// 7-bit address this device is bound to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the I2C bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> RegisterBus for SmbusDevice<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn read_word(&mut self, register: u8) -> Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn write_word(&mut self, register: u8, value: u16) -> Result<(), Self::Error> {
        let [low, high] = value.to_le_bytes();
        self.i2c.write(self.address, &[register, low, high])
    }
}
