//! PCA9546A I2C addressing
//!
//! The device answers on `0b1110_A2A1A0`: a fixed upper nibble plus three
//! hardware address-select pins, giving 0x70-0x77.

/// Address with all select pins tied low
pub const DEFAULT_ADDRESS: u8 = 0x70;

/// Highest address reachable with the select pins
pub const MAX_ADDRESS: u8 = 0x77;

/// Calculate the 7-bit address from the A0/A1/A2 pin levels
///
/// `true` means the pin is tied high.
pub const fn calculate_address_from_pins(a0: bool, a1: bool, a2: bool) -> u8 {
    DEFAULT_ADDRESS | ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8)
}

/// Check whether an address falls in the PCA9546A range
pub const fn is_switch_address(address: u8) -> bool {
    address >= DEFAULT_ADDRESS && address <= MAX_ADDRESS
}
