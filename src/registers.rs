//! Register map and word layout for the Motorknob firmware.
//!
//! The firmware exposes four 16-bit registers addressed by a single byte.
//! The top bit of the address selects the write variant of a register:
//! `[WRITE_REQUEST | selector]` writes, the bare selector reads.

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Flag bit OR'd into a selector to form its write address.
pub const WRITE_REQUEST: u8 = 0b1000_0000;

/// Default I2C address the Motorknob answers on.
pub const DEFAULT_ADDRESS: u8 = 0x55;

/// Number of bytes a register word occupies on either side of the codec.
pub const WORD_LEN: usize = 2;

/// One of the four addressable Motorknob registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// First position of the active detent profile.
    StartPosition = 0b0000_0000,
    /// Last position of the active detent profile.
    EndPosition = 0b0000_0001,
    /// Number of detents between start and end.
    Detents = 0b0000_0010,
    /// Current knob position. Read-only.
    CurrentPosition = 0b0000_0011,
}

impl Register {
    /// Every register, in selector order.
    pub const ALL: [Register; 4] = [
        Register::StartPosition,
        Register::EndPosition,
        Register::Detents,
        Register::CurrentPosition,
    ];

    /// Address used for a word read.
    pub const fn read_address(self) -> u8 {
        self as u8
    }

    /// Address used for a word write.
    pub const fn write_address(self) -> u8 {
        WRITE_REQUEST | self as u8
    }

    /// Whether host code is allowed to write this register.
    ///
    /// The firmware accepts a write to any address; the current position is
    /// read-only by driver policy.
    pub const fn is_writable(self) -> bool {
        !matches!(self, Register::CurrentPosition)
    }
}

// ---------------------------------------------------------------------------
// Word layout
// ---------------------------------------------------------------------------

/// Build the register word from the first two bytes of a write payload.
///
/// Byte 0 lands in the high half and is XOR-combined with byte 1. Returns
/// `None` when fewer than [`WORD_LEN`] bytes are supplied; trailing bytes
/// are ignored.
pub fn encode_word(payload: &[u8]) -> Option<u16> {
    match payload {
        [high, low, ..] => Some((u16::from(*high) << 8) ^ u16::from(*low)),
        _ => None,
    }
}

/// Split a register word into output bytes, low byte first.
///
/// Note the order is the reverse of what [`encode_word`] consumes.
pub const fn decode_word(word: u16) -> [u8; WORD_LEN] {
    [word as u8, (word >> 8) as u8]
}
