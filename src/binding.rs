//! Binding a physical Motorknob to its published attributes.
//!
//! [`MotorKnob`] is the context object for one attached device: it owns the
//! [`KnobDriver`] and the [`Registry`], publishes on [`probe`](MotorKnob::probe)
//! and tears down on [`remove`](MotorKnob::remove). Endpoint accesses arrive
//! through [`read`](MotorKnob::read) and [`write`](MotorKnob::write), which
//! resolve the path in the host and call the bound handler.

use embedded_hal::i2c::I2c;

use crate::bus::{RegisterBus, SmbusDevice};
use crate::driver::KnobDriver;
use crate::error::KnobError;
use crate::host::AttributeHost;
use crate::registers::DEFAULT_ADDRESS;
use crate::registry::Registry;

/// Device name this driver binds to.
pub const DEVICE_NAME: &str = "motorknob";

/// Name the driver registers itself under.
pub const DRIVER_NAME: &str = "motorknob-i2c-driver";

/// Device names accepted by [`matches`].
pub const ID_TABLE: [&str; 1] = [DEVICE_NAME];

/// Whether a device announced as `name` should be bound to this driver.
pub fn matches(name: &str) -> bool {
    ID_TABLE.contains(&name)
}

/// Binding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KnobConfig {
    /// 7-bit I2C address of the knob.
    pub address: u8,
    /// Name of the top-level attribute container.
    pub root_name: &'static str,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            root_name: DEVICE_NAME,
        }
    }
}

/// One attached Motorknob and its published attributes.
///
/// # Example
///
/// ```ignore
/// use motorknob_driver::{KnobConfig, KnobTree, MotorKnob};
///
/// let mut tree = KnobTree::new();
/// let mut knob = MotorKnob::probe_i2c(i2c, &mut tree, &KnobConfig::default())?;
///
/// let mut buf = [0u8; 2];
/// knob.read(&tree, "motorknob/position", &mut buf)?;
/// knob.write(&tree, "motorknob/profile/detents", &[0x00, 0x18])?;
///
/// let i2c = knob.remove(&mut tree).release();
/// ```
pub struct MotorKnob<B, H: AttributeHost> {
    driver: KnobDriver<B>,
    registry: Registry<H>,
}

impl<I2C, H> MotorKnob<SmbusDevice<I2C>, H>
where
    I2C: I2c,
    H: AttributeHost,
{
    /// Attach a knob reachable on `i2c` at `config.address`.
    pub fn probe_i2c(
        i2c: I2C,
        host: &mut H,
        config: &KnobConfig,
    ) -> Result<Self, KnobError<I2C::Error>> {
        Self::probe(SmbusDevice::new(i2c, config.address), host, config)
    }
}

impl<B, H> MotorKnob<B, H>
where
    B: RegisterBus,
    H: AttributeHost,
{
    /// Attach a knob on an already bound bus endpoint and publish its
    /// attributes.
    ///
    /// # Errors
    /// * [`KnobError::ResourceExhausted`] if the attributes could not be
    ///   published; nothing is left visible and the bus is dropped
    pub fn probe(bus: B, host: &mut H, config: &KnobConfig) -> Result<Self, KnobError<B::Error>> {
        info!("Motorknob client probed ({})", config.root_name);

        let mut registry = Registry::new(config.root_name);
        registry.publish::<B::Error>(host)?;

        Ok(Self {
            driver: KnobDriver::new(bus),
            registry,
        })
    }

    /// Detach the knob: tear down its attributes and hand back the bus.
    pub fn remove(mut self, host: &mut H) -> B {
        info!("Motorknob client removed");
        self.registry.teardown(host);
        self.driver.release()
    }

    pub fn registry(&self) -> &Registry<H> {
        &self.registry
    }

    /// Direct register access, bypassing the attribute namespace.
    pub fn driver(&mut self) -> &mut KnobDriver<B> {
        &mut self.driver
    }

    /// Dispatch a read of the attribute at `path` into `buffer`.
    ///
    /// # Errors
    /// * [`KnobError::NotFound`] if `path` is not published
    /// * any error of [`Attribute::show`](crate::Attribute::show)
    pub fn read(&mut self, host: &H, path: &str, buffer: &mut [u8]) -> Result<usize, KnobError<B::Error>> {
        let Some(attribute) = host.lookup(path) else {
            return Err(KnobError::NotFound);
        };
        attribute.show(&mut self.driver, buffer)
    }

    /// Dispatch a write of `payload` to the attribute at `path`.
    ///
    /// # Errors
    /// * [`KnobError::NotFound`] if `path` is not published
    /// * any error of [`Attribute::store`](crate::Attribute::store)
    pub fn write(&mut self, host: &H, path: &str, payload: &[u8]) -> Result<usize, KnobError<B::Error>> {
        let Some(attribute) = host.lookup(path) else {
            return Err(KnobError::NotFound);
        };
        attribute.store(&mut self.driver, payload)
    }
}
