//! `embedded-hal` bus adapter
//!
//! Wraps any `embedded_hal::i2c::I2c` so the switch driver can run on top of
//! an off-the-shelf chip HAL.

use chanmux_core::config::BusSettings;
use chanmux_hal::{BusId, I2cBus, I2cBusError, I2cConfig};
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// Map an `embedded-hal` error kind onto the bus error set
pub fn error_kind_to_bus_error(kind: ErrorKind) -> I2cBusError {
    match kind {
        ErrorKind::Bus => I2cBusError::Bus,
        ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
        ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
        ErrorKind::Overrun => I2cBusError::Overrun,
        _ => I2cBusError::Other,
    }
}

/// Peripheral clock settings for a configured switch bus
///
/// Chip HAL setup code feeds this to its I2C constructor before wrapping the
/// peripheral in [`HalBus`].
pub fn i2c_config(settings: &BusSettings) -> I2cConfig {
    I2cConfig::with_frequency(settings.frequency)
}

/// [`I2cBus`] over an `embedded-hal` I2C peripheral
///
/// `i2c` may be a whole peripheral or a per-device handle onto a shared one
/// (e.g. an `embedded-hal-bus` `RefCellDevice`). Give every handle on the
/// same physical bus the same [`BusId`].
pub struct HalBus<I> {
    i2c: I,
    id: BusId,
}

impl<I: I2c> HalBus<I> {
    /// Wrap an I2C peripheral on the bus identified by `id`
    pub fn new(i2c: I, id: BusId) -> Self {
        Self { i2c, id }
    }

    /// Borrow the wrapped peripheral
    pub fn inner(&mut self) -> &mut I {
        &mut self.i2c
    }

    /// Return the wrapped peripheral
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> I2cBus for HalBus<I> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c
            .write(address, data)
            .map_err(|e| error_kind_to_bus_error(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c
            .read(address, buf)
            .map_err(|e| error_kind_to_bus_error(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write_read(address, write_data, read_buf)
            .map_err(|e| error_kind_to_bus_error(e.kind()))
    }

    fn bus_id(&self) -> BusId {
        self.id
    }
}
