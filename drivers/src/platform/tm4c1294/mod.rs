//! TI Tiva TM4C1294NCPDT drivers.
//!
//! Register layouts live in [`crate::hw::tm4c1294`]; this module turns them
//! into drivers for the HAL traits.

mod gpio;
mod sysctl;

pub mod i2c;
pub mod timer;
pub mod uart;

pub use i2c::I2c;
pub use timer::PacingTimer;
pub use uart::Uart;

/// Platform name for debugging.
pub const NAME: &str = "TM4C1294NCPDT (Tiva C Connected LaunchPad)";
