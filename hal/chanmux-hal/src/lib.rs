//! Chanmux Hardware Abstraction Layer
//!
//! This crate defines the bus traits the switch driver is written against.
//! Chip-specific HALs implement them, or the `embedded-hal` adapter in
//! `chanmux-drivers` bridges any `embedded_hal::i2c::I2c`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (firmware, host tools)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chanmux-drivers (Pca9546a, HalBus)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chanmux-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key types at crate root for convenience
pub use i2c::{BusId, I2cBus, I2cBusError, I2cConfig};
