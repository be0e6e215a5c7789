//! Hardware driver implementations
//!
//! This crate provides the bus-touching half of chanmux:
//!
//! - I2C switches (PCA9546A)
//! - An [`I2cBus`](chanmux_hal::I2cBus) adapter for `embedded-hal` peripherals

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod switch;

pub use bus::HalBus;
pub use switch::{Pca9546a, SwitchError};
