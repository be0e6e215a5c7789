//! I2C bus switch implementations

pub mod pca9546a;
// pub mod pca9548a;  // Future: 8-channel variant

pub use pca9546a::{Pca9546a, SwitchError};
