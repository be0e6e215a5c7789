//! Board-agnostic core logic for the PCA9546A I2C switch
//!
//! This crate contains everything that does not touch a bus:
//!
//! - Control register layout and channel bit math
//! - Address calculation from the A0-A2 select pins
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod address;
pub mod config;
pub mod register;

pub use address::{calculate_address_from_pins, DEFAULT_ADDRESS};
pub use config::{ConfigError, SwitchAddress, SwitchConfig};
pub use register::{ControlRegister, CHANNEL_COUNT, CHANNEL_MASK, INVALID_DATA};
