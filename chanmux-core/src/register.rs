//! PCA9546A control register
//!
//! The PCA9546A has exactly one register. Bits 0-3 gate downstream
//! channels 0-3; bits 4-7 are unused and ignored when decoding.
//!
//! ```text
//!  7   6   5   4   3   2   1   0
//! ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! │ x │ x │ x │ x │B3 │B2 │B1 │B0 │
//! └───┴───┴───┴───┴───┴───┴───┴───┘
//! ```
//!
//! [`INVALID_DATA`] (0xFF) marks a mirror whose contents are unknown after a
//! failed read. Its low nibble is all ones, so an invalid mirror decodes as
//! "every channel enabled". Use [`ControlRegister::is_valid`] to tell the two
//! apart.

/// Number of downstream channels
pub const CHANNEL_COUNT: u8 = 4;

/// Highest valid channel index
pub const MAX_CHANNEL: u8 = CHANNEL_COUNT - 1;

/// Mask of the register bits that map to existing channels
pub const CHANNEL_MASK: u8 = 0x0F;

/// Sentinel stored when the register could not be read
pub const INVALID_DATA: u8 = 0xFF;

/// Power-on reset value (all channels deselected)
pub const POWER_ON_RESET: u8 = 0x00;

/// Check whether `ch` names an existing channel
#[inline]
pub const fn is_valid_channel(ch: u8) -> bool {
    ch <= MAX_CHANNEL
}

/// Register bit for a channel, `None` if out of range
#[inline]
pub const fn channel_bit(ch: u8) -> Option<u8> {
    if is_valid_channel(ch) {
        Some(1 << ch)
    } else {
        None
    }
}

/// Local copy of the device control register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRegister(u8);

impl Default for ControlRegister {
    fn default() -> Self {
        Self(POWER_ON_RESET)
    }
}

impl From<u8> for ControlRegister {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<ControlRegister> for u8 {
    fn from(reg: ControlRegister) -> Self {
        reg.0
    }
}

impl ControlRegister {
    /// Mirror marking an unknown register
    pub const INVALID: Self = Self(INVALID_DATA);

    /// Wrap a raw register value
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Register with exactly one channel set
    ///
    /// Returns `None` for channels above 3.
    pub const fn exclusive(ch: u8) -> Option<Self> {
        match channel_bit(ch) {
            Some(bit) => Some(Self(bit)),
            None => None,
        }
    }

    /// Build an absolute mask from four channel states
    pub const fn from_channels(ch0: bool, ch1: bool, ch2: bool, ch3: bool) -> Self {
        let mut value = 0u8;
        if ch0 {
            value |= 1;
        }
        if ch1 {
            value |= 1 << 1;
        }
        if ch2 {
            value |= 1 << 2;
        }
        if ch3 {
            value |= 1 << 3;
        }
        Self(value)
    }

    /// Raw register byte, unused bits included
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Channel enable bits only
    pub const fn channels(self) -> u8 {
        self.0 & CHANNEL_MASK
    }

    /// Whether this is something other than the read-failure sentinel
    pub const fn is_valid(self) -> bool {
        self.0 != INVALID_DATA
    }

    /// Check if a channel is enabled
    ///
    /// Always false for channels above 3. An invalid mirror reports every
    /// channel as enabled.
    pub const fn channel_enabled(self, ch: u8) -> bool {
        match channel_bit(ch) {
            Some(bit) => self.channels() & bit != 0,
            None => false,
        }
    }

    /// Copy with a channel bit set, `None` if out of range
    ///
    /// Unused high bits are carried over unchanged.
    pub const fn with_channel(self, ch: u8) -> Option<Self> {
        match channel_bit(ch) {
            Some(bit) => Some(Self(self.0 | bit)),
            None => None,
        }
    }

    /// Copy with a channel bit cleared, `None` if out of range
    pub const fn without_channel(self, ch: u8) -> Option<Self> {
        match channel_bit(ch) {
            Some(bit) => Some(Self(self.0 & !bit)),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_is_power_on_reset() {
        let reg = ControlRegister::default();
        assert_eq!(reg.bits(), 0x00);
        assert!(reg.is_valid());
        assert_eq!(reg.channels(), 0);
    }

    #[test]
    fn test_from_channels() {
        let reg = ControlRegister::from_channels(true, false, true, false);
        assert_eq!(reg.bits(), 0b0101);
        assert!(reg.channel_enabled(0));
        assert!(!reg.channel_enabled(1));
        assert!(reg.channel_enabled(2));
        assert!(!reg.channel_enabled(3));

        assert_eq!(
            ControlRegister::from_channels(true, true, true, true).bits(),
            0x0F
        );
    }

    #[test]
    fn test_invalid_reads_as_all_enabled() {
        let reg = ControlRegister::INVALID;
        assert!(!reg.is_valid());
        for ch in 0..CHANNEL_COUNT {
            assert!(reg.channel_enabled(ch));
        }
        assert!(!reg.channel_enabled(4));
    }

    #[test]
    fn test_high_bits_ignored_when_decoding() {
        let reg = ControlRegister::new(0xA2);
        assert_eq!(reg.channels(), 0x02);
        assert!(reg.channel_enabled(1));
        assert!(!reg.channel_enabled(0));
    }

    #[test]
    fn test_with_channel_is_cumulative() {
        let reg = ControlRegister::default().with_channel(2).unwrap();
        assert_eq!(reg.bits(), 0x04);
        let reg = reg.with_channel(0).unwrap();
        assert_eq!(reg.bits(), 0x05);
        let reg = reg.without_channel(2).unwrap();
        assert_eq!(reg.bits(), 0x01);
    }

    #[test]
    fn test_without_channel_keeps_high_bits() {
        let reg = ControlRegister::INVALID.without_channel(1).unwrap();
        assert_eq!(reg.bits(), 0xFD);
    }

    #[test]
    fn test_out_of_range_channel() {
        assert_eq!(channel_bit(4), None);
        assert_eq!(ControlRegister::exclusive(4), None);
        assert_eq!(ControlRegister::default().with_channel(7), None);
        assert_eq!(ControlRegister::default().without_channel(255), None);
    }

    proptest! {
        #[test]
        fn exclusive_enables_only_that_channel(ch in 0u8..4) {
            let reg = ControlRegister::exclusive(ch).unwrap();
            for other in 0..CHANNEL_COUNT {
                prop_assert_eq!(reg.channel_enabled(other), other == ch);
            }
        }

        #[test]
        fn out_of_range_channels_never_enabled(value in any::<u8>(), ch in 4u8..=255) {
            prop_assert!(!ControlRegister::new(value).channel_enabled(ch));
        }

        #[test]
        fn set_then_clear_restores_bit(value in any::<u8>(), ch in 0u8..4) {
            let reg = ControlRegister::new(value);
            let set = reg.with_channel(ch).unwrap();
            prop_assert!(set.channel_enabled(ch));
            let cleared = set.without_channel(ch).unwrap();
            prop_assert!(!cleared.channel_enabled(ch));
            prop_assert_eq!(cleared.bits() | (1 << ch), set.bits());
        }

        #[test]
        fn from_channels_matches_flags(b0: bool, b1: bool, b2: bool, b3: bool) {
            let reg = ControlRegister::from_channels(b0, b1, b2, b3);
            prop_assert_eq!(reg.bits() & !CHANNEL_MASK, 0);
            prop_assert_eq!(
                [reg.channel_enabled(0), reg.channel_enabled(1), reg.channel_enabled(2), reg.channel_enabled(3)],
                [b0, b1, b2, b3]
            );
        }
    }
}
