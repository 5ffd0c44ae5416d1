//! The fixed table of Motorknob attribute endpoints.
//!
//! Every endpoint is one row: a name, the container it lives in, the register
//! it is bound to, and whether it has a write handler. The registry walks
//! [`ATTRIBUTES`] in order to publish and tear down.
//!
//! ```text
//! motorknob/
//! ├── position            (ro, current position)
//! └── profile/
//!     ├── detents         (rw)
//!     ├── start_position  (rw)
//!     └── end_position    (rw)
//! ```

use crate::bus::RegisterBus;
use crate::driver::KnobDriver;
use crate::error::KnobError;
use crate::registers::Register;

/// Name of the nested container holding the detent profile.
pub const PROFILE_NAME: &str = "profile";

/// Number of endpoints in [`ATTRIBUTES`].
pub const ATTRIBUTE_COUNT: usize = 4;

/// Container an attribute is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parent {
    /// The top-level container.
    Root,
    /// The [`PROFILE_NAME`] container.
    Profile,
}

/// Handlers bound to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Read handler only.
    ReadOnly,
    /// Read and write handlers.
    ReadWrite,
}

impl Access {
    /// Permission bits the endpoint is published with (owner and group).
    pub const fn mode(self) -> u16 {
        match self {
            Access::ReadOnly => 0o440,
            Access::ReadWrite => 0o660,
        }
    }
}

/// One named endpoint bound to a fixed register.
#[derive(Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub parent: Parent,
    pub register: Register,
    pub access: Access,
}

impl Attribute {
    /// Permission bits of this endpoint.
    pub const fn mode(&self) -> u16 {
        self.access.mode()
    }

    pub const fn is_writable(&self) -> bool {
        matches!(self.access, Access::ReadWrite)
    }

    /// Read handler: two register bytes into `buffer`, low byte first.
    pub fn show<B: RegisterBus>(
        &self,
        driver: &mut KnobDriver<B>,
        buffer: &mut [u8],
    ) -> Result<usize, KnobError<B::Error>> {
        driver.read_into(self.register, buffer)
    }

    /// Write handler: forwards `payload` to the bound register.
    ///
    /// Attributes without a write handler answer [`KnobError::ReadOnly`].
    pub fn store<B: RegisterBus>(
        &self,
        driver: &mut KnobDriver<B>,
        payload: &[u8],
    ) -> Result<usize, KnobError<B::Error>> {
        match self.access {
            Access::ReadWrite => driver.write(self.register, payload),
            Access::ReadOnly => Err(KnobError::ReadOnly),
        }
    }
}

pub static DETENTS: Attribute = Attribute {
    name: "detents",
    parent: Parent::Profile,
    register: Register::Detents,
    access: Access::ReadWrite,
};

pub static START_POSITION: Attribute = Attribute {
    name: "start_position",
    parent: Parent::Profile,
    register: Register::StartPosition,
    access: Access::ReadWrite,
};

pub static END_POSITION: Attribute = Attribute {
    name: "end_position",
    parent: Parent::Profile,
    register: Register::EndPosition,
    access: Access::ReadWrite,
};

pub static POSITION: Attribute = Attribute {
    name: "position",
    parent: Parent::Root,
    register: Register::CurrentPosition,
    access: Access::ReadOnly,
};

/// All endpoints, in publish order.
pub static ATTRIBUTES: [&Attribute; ATTRIBUTE_COUNT] =
    [&DETENTS, &START_POSITION, &END_POSITION, &POSITION];
