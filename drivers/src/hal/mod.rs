//! Hardware Abstraction Layer (HAL) - Platform-Independent Traits
//!
//! This module defines the traits and configuration types drivers implement.
//! Application code (see [`crate::echo`]) is written against these traits and
//! the [`crate::print`] engine, never against register layouts.
//!
//! # Available Interfaces
//!
//! - [`mmio`]: Memory-mapped register access
//! - [`serial`]: Serial port (UART) communication
//! - [`i2c`]: I2C master transfers with explicit addressing
//! - [`timer`]: Periodic hardware timers

pub mod i2c;
pub mod mmio;
pub mod serial;
pub mod timer;
