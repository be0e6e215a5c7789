//! Switch configuration types
//!
//! These types describe how a PCA9546A is wired on a board. Firmware
//! typically keeps them in flash as postcard-serialized binary data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::address::{calculate_address_from_pins, is_switch_address, DEFAULT_ADDRESS};
use crate::register::CHANNEL_MASK;

/// Current config layout version
pub const CONFIG_VERSION: u8 = 1;

/// How the device address is specified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwitchAddress {
    /// Explicit 7-bit address
    Fixed(u8),
    /// Address select pin levels (true = tied high)
    Pins { a0: bool, a1: bool, a2: bool },
}

impl Default for SwitchAddress {
    fn default() -> Self {
        SwitchAddress::Fixed(DEFAULT_ADDRESS)
    }
}

impl SwitchAddress {
    /// Resolve to a 7-bit I2C address
    pub const fn resolve(&self) -> u8 {
        match *self {
            SwitchAddress::Fixed(address) => address,
            SwitchAddress::Pins { a0, a1, a2 } => calculate_address_from_pins(a0, a1, a2),
        }
    }
}

/// Bus settings for the segment the switch sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusSettings {
    /// SCL frequency in Hz
    pub frequency: u32,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

/// PCA9546A configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwitchConfig {
    /// Config layout version
    pub version: u8,
    /// Device address
    pub address: SwitchAddress,
    /// Channel mask to write when the config is applied
    pub initial_channels: Option<u8>,
    /// Bus settings
    pub bus: BusSettings,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            address: SwitchAddress::default(),
            initial_channels: None,
            bus: BusSettings::default(),
        }
    }
}

/// Configuration validation and persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Address outside 0x70-0x77
    InvalidAddress(u8),
    /// Initial channel mask has bits above channel 3
    InvalidChannelMask(u8),
    /// Bus frequency is zero
    InvalidFrequency,
    /// Config version mismatch
    VersionMismatch(u8),
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
}

impl SwitchConfig {
    /// Config for a switch at a fixed address
    pub fn with_address(address: u8) -> Self {
        Self {
            address: SwitchAddress::Fixed(address),
            ..Self::default()
        }
    }

    /// Config for a switch addressed by its select pins
    pub fn with_pins(a0: bool, a1: bool, a2: bool) -> Self {
        Self {
            address: SwitchAddress::Pins { a0, a1, a2 },
            ..Self::default()
        }
    }

    /// Resolved 7-bit address
    pub const fn address(&self) -> u8 {
        self.address.resolve()
    }

    /// Check the config for values the device cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch(self.version));
        }

        let address = self.address();
        if !is_switch_address(address) {
            return Err(ConfigError::InvalidAddress(address));
        }

        if let Some(mask) = self.initial_channels {
            if mask & !CHANNEL_MASK != 0 {
                return Err(ConfigError::InvalidChannelMask(mask));
            }
        }

        if self.bus.frequency == 0 {
            return Err(ConfigError::InvalidFrequency);
        }

        Ok(())
    }
}

/// Maximum serialized config size
#[cfg(feature = "serde")]
pub const MAX_CONFIG_SIZE: usize = 16;

/// Serialize a config into `buf` with postcard
///
/// Returns the used prefix of `buf`.
#[cfg(feature = "serde")]
pub fn encode<'a>(config: &SwitchConfig, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
    postcard::to_slice(config, buf).map_err(|_| ConfigError::Serialize)
}

/// Deserialize and validate a postcard-encoded config
#[cfg(feature = "serde")]
pub fn decode(bytes: &[u8]) -> Result<SwitchConfig, ConfigError> {
    let config: SwitchConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SwitchConfig::default();
        assert_eq!(config.address(), 0x70);
        assert_eq!(config.initial_channels, None);
        assert_eq!(config.bus.frequency, 100_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pin_address_resolution() {
        assert_eq!(SwitchConfig::with_pins(true, true, true).address(), 0x77);
        assert_eq!(SwitchConfig::with_pins(false, true, false).address(), 0x72);
        assert_eq!(SwitchConfig::with_address(0x75).address(), 0x75);
    }

    #[test]
    fn test_validate_rejects_bad_address() {
        assert_eq!(
            SwitchConfig::with_address(0x20).validate(),
            Err(ConfigError::InvalidAddress(0x20))
        );
    }

    #[test]
    fn test_validate_rejects_high_channel_bits() {
        let config = SwitchConfig {
            initial_channels: Some(0x10),
            ..SwitchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidChannelMask(0x10))
        );

        let config = SwitchConfig {
            initial_channels: Some(0x0F),
            ..SwitchConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_frequency() {
        let config = SwitchConfig {
            bus: BusSettings { frequency: 0 },
            ..SwitchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidFrequency));
    }

    #[test]
    fn test_validate_rejects_version_mismatch() {
        let config = SwitchConfig {
            version: 2,
            ..SwitchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::VersionMismatch(2)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_persistence() {
        let config = SwitchConfig {
            initial_channels: Some(0b0011),
            ..SwitchConfig::with_pins(true, false, true)
        };

        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let len = encode(&config, &mut buf).unwrap().len();
        assert_eq!(decode(&buf[..len]), Ok(config));

        let mut tiny = [0u8; 2];
        assert_eq!(encode(&config, &mut tiny), Err(ConfigError::Serialize));
        assert_eq!(decode(&[0xFF]), Err(ConfigError::Deserialize));
    }
}
