//! PCA9546A 4-channel I2C switch
//!
//! The PCA9546A fans one upstream I2C bus out to four downstream channels.
//! It has a single control register and no register pointer: any one-byte
//! write sets it, any one-byte read returns it.
//!
//! # Register mirror
//!
//! The driver keeps a local copy of the control register so channel queries
//! never touch the bus. The mirror changes only when
//!
//! - a write is acknowledged (mirror := written value), or
//! - [`Pca9546a::refresh`] runs (mirror := read value, or
//!   [`INVALID_DATA`] when the read fails).
//!
//! A failed write leaves the mirror as it was. `enable_channel` and
//! `disable_channel` modify the mirror, not a fresh device read, so a stale
//! or invalid mirror leaks into the value they write.
//!
//! # Ownership
//!
//! Every bus-touching method takes `&mut self`; the driver assumes a single
//! owner. Share it across tasks behind an external mutex.

use chanmux_core::address::{calculate_address_from_pins, DEFAULT_ADDRESS};
use chanmux_core::config::{ConfigError, SwitchConfig};
use chanmux_core::register::{ControlRegister, INVALID_DATA};
use chanmux_hal::{BusId, I2cBus};

#[cfg(feature = "defmt")]
use defmt::{trace, warn};

/// Switch operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchError<E> {
    /// Bus transaction failed
    Bus(E),
    /// Channel index above 3
    InvalidChannel(u8),
    /// Config rejected by [`SwitchConfig::validate`]
    Config(ConfigError),
}

/// PCA9546A driver
///
/// Generic over the bus so it can own a bus or borrow one (`&mut B`).
pub struct Pca9546a<B> {
    bus: B,
    address: u8,
    control_reg: ControlRegister,
}

impl<B: I2cBus> Pca9546a<B> {
    /// Create a driver for the switch at `address`
    ///
    /// No bus traffic; the mirror starts at the power-on value (0x00).
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            control_reg: ControlRegister::default(),
        }
    }

    /// Create a driver at the default address (0x70, all pins low)
    pub fn with_default_address(bus: B) -> Self {
        Self::new(bus, DEFAULT_ADDRESS)
    }

    /// Create a driver addressed by the A0/A1/A2 pin levels
    pub fn from_pins(bus: B, a0: bool, a1: bool, a2: bool) -> Self {
        Self::new(bus, calculate_address_from_pins(a0, a1, a2))
    }

    /// Create a driver from a board config
    ///
    /// Does not write `initial_channels`; call [`Self::apply_config`] for that.
    pub fn from_config(bus: B, config: &SwitchConfig) -> Self {
        Self::new(bus, config.address())
    }

    /// Calculate the 7-bit address from the A0/A1/A2 pin levels
    pub const fn calculate_address_from_pins(a0: bool, a1: bool, a2: bool) -> u8 {
        calculate_address_from_pins(a0, a1, a2)
    }

    /// 7-bit I2C address of the device
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Identity of the bus this driver talks through
    ///
    /// Reported by the bus itself, so it is unaffected by moving the driver.
    pub fn wire_hardware_address(&self) -> BusId {
        self.bus.bus_id()
    }

    /// Last known control register value
    ///
    /// May be stale, or [`INVALID_DATA`] after a failed refresh.
    pub fn control_register(&self) -> u8 {
        self.control_reg.bits()
    }

    /// Whether the mirror holds a value rather than the read-failure sentinel
    pub fn is_valid(&self) -> bool {
        self.control_reg.is_valid()
    }

    /// Check if a channel is enabled according to the mirror
    ///
    /// False for channels above 3. After a failed refresh every channel
    /// reads as enabled.
    pub fn channel_enabled(&self, ch: u8) -> bool {
        self.control_reg.channel_enabled(ch)
    }

    /// Re-read the control register from the device
    ///
    /// On failure the mirror becomes [`INVALID_DATA`].
    pub fn refresh(&mut self) {
        let _ = self.try_refresh();
    }

    /// Re-read the control register, reporting bus errors
    ///
    /// Same mirror update as [`Self::refresh`]; returns the byte read.
    pub fn try_refresh(&mut self) -> Result<u8, SwitchError<B::Error>> {
        let mut buf = [0u8; 1];
        match self.bus.read(self.address, &mut buf) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                trace!("PCA9546A@{:#x}: read control 0x{:02x}", self.address, buf[0]);
                self.control_reg = ControlRegister::new(buf[0]);
                Ok(buf[0])
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                warn!("PCA9546A@{:#x}: control read failed", self.address);
                self.control_reg = ControlRegister::new(INVALID_DATA);
                Err(SwitchError::Bus(e))
            }
        }
    }

    /// Write the control register
    ///
    /// The mirror takes the new value only if the device acknowledges.
    pub fn set_control_register(&mut self, reg: u8) {
        let _ = self.try_set_control_register(reg);
    }

    /// Write the control register, reporting bus errors
    pub fn try_set_control_register(&mut self, reg: u8) -> Result<(), SwitchError<B::Error>> {
        if let Err(e) = self.bus.write(self.address, &[reg]) {
            #[cfg(feature = "defmt")]
            warn!(
                "PCA9546A@{:#x}: control write 0x{:02x} failed",
                self.address, reg
            );
            return Err(SwitchError::Bus(e));
        }

        #[cfg(feature = "defmt")]
        trace!("PCA9546A@{:#x}: control := 0x{:02x}", self.address, reg);
        self.control_reg = ControlRegister::new(reg);
        Ok(())
    }

    /// Enable one channel and disable the rest
    ///
    /// No-op for channels above 3.
    pub fn select_channel_exclusive(&mut self, ch: u8) {
        let _ = self.try_select_channel_exclusive(ch);
    }

    /// Enable one channel and disable the rest, reporting errors
    pub fn try_select_channel_exclusive(&mut self, ch: u8) -> Result<(), SwitchError<B::Error>> {
        let reg = ControlRegister::exclusive(ch).ok_or(SwitchError::InvalidChannel(ch))?;
        self.try_set_control_register(reg.bits())
    }

    /// Enable a channel, leaving the others as the mirror has them
    ///
    /// No-op for channels above 3.
    pub fn enable_channel(&mut self, ch: u8) {
        let _ = self.try_enable_channel(ch);
    }

    /// Enable a channel, reporting errors
    pub fn try_enable_channel(&mut self, ch: u8) -> Result<(), SwitchError<B::Error>> {
        let reg = self
            .control_reg
            .with_channel(ch)
            .ok_or(SwitchError::InvalidChannel(ch))?;
        self.try_set_control_register(reg.bits())
    }

    /// Disable a channel, leaving the others as the mirror has them
    ///
    /// No-op for channels above 3.
    pub fn disable_channel(&mut self, ch: u8) {
        let _ = self.try_disable_channel(ch);
    }

    /// Disable a channel, reporting errors
    pub fn try_disable_channel(&mut self, ch: u8) -> Result<(), SwitchError<B::Error>> {
        let reg = self
            .control_reg
            .without_channel(ch)
            .ok_or(SwitchError::InvalidChannel(ch))?;
        self.try_set_control_register(reg.bits())
    }

    /// Set all four channels at once, ignoring the previous state
    pub fn enable_channels(&mut self, ch0: bool, ch1: bool, ch2: bool, ch3: bool) {
        let reg = ControlRegister::from_channels(ch0, ch1, ch2, ch3);
        self.set_control_register(reg.bits());
    }

    /// Disconnect every downstream channel
    pub fn disable_all(&mut self) {
        self.set_control_register(0);
    }

    /// Write the config's initial channel mask, if it has one
    ///
    /// The config is validated first; an invalid config writes nothing.
    pub fn apply_config(&mut self, config: &SwitchConfig) -> Result<(), SwitchError<B::Error>> {
        config.validate().map_err(SwitchError::Config)?;
        match config.initial_channels {
            Some(mask) => self.try_set_control_register(mask),
            None => Ok(()),
        }
    }

    /// Borrow the underlying bus
    ///
    /// Lets downstream devices share the bus while a channel is selected.
    pub fn bus(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Consume the driver and return the bus
    pub fn release(self) -> B {
        self.bus
    }
}
