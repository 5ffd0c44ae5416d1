//! Driver for the Motorknob, a motorized detent rotary knob on I2C.
//!
//! The knob exposes four 16-bit registers (profile start, profile end, detent
//! count, current position). This crate moves words to and from those
//! registers and publishes them as a small tree of named attributes:
//!
//! ```text
//! motorknob/position                  read-only
//! motorknob/profile/detents           read-write
//! motorknob/profile/start_position    read-write
//! motorknob/profile/end_position      read-write
//! ```
//!
//! # Architecture
//!
//! The crate is split into three layers:
//!
//! - **Register codec** — [`Register`] addressing, the word byte layout in
//!   [`registers`], and [`KnobDriver`] issuing one [`RegisterBus`]
//!   transaction per access. [`SmbusDevice`] adapts any blocking
//!   `embedded-hal` I2C bus.
//! - **Attribute registry** — the endpoint table in [`attributes`] and
//!   [`Registry`], which publishes it into an [`AttributeHost`] all-or-nothing
//!   and tears it down idempotently. [`AttributeTree`] is an in-memory host.
//! - **Binding** — [`MotorKnob`] ties one attached device to its registry and
//!   dispatches attribute accesses by path.
//!
//! Byte order differs by direction: writes take `[high, low]`, reads return
//! `[low, high]`.
//!
//! # Quick start
//!
//! ```ignore
//! use motorknob_driver::{KnobConfig, KnobTree, MotorKnob};
//!
//! let mut tree = KnobTree::new();
//! let mut knob = MotorKnob::probe_i2c(i2c, &mut tree, &KnobConfig::default())?;
//!
//! let mut position = [0u8; 2];
//! knob.read(&tree, "motorknob/position", &mut position)?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations and log through
//!   `defmt` on embedded targets.
//! - **`log`** — Log through the `log` facade on hosted targets.

#![no_std]

#[macro_use]
mod fmt;

pub mod attributes;
mod binding;
mod bus;
mod driver;
mod error;
mod host;
pub mod registers;
mod registry;

pub use attributes::{Access, Attribute, Parent, ATTRIBUTES};
pub use binding::{matches, KnobConfig, MotorKnob, DEVICE_NAME, DRIVER_NAME, ID_TABLE};
pub use bus::{RegisterBus, SmbusDevice};
pub use driver::KnobDriver;
pub use error::KnobError;
pub use host::{AttributeHost, AttributeTree, ContainerId, HostError, KnobTree};
pub use registers::{Register, DEFAULT_ADDRESS, WRITE_REQUEST};
pub use registry::{Registry, RegistryState};
