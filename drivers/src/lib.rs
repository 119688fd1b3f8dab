//! Hardware Driver Subsystem
//!
//! UART and I2C drivers for the TI Tiva TM4C1294NCPDT with a shared,
//! transaction-aware formatted-output engine.
//!
//! # Module Organization
//!
//! - [`hal`]: Platform-independent trait definitions and configuration
//! - [`print`]: Byte sinks and the `print`/`printf` engine built on them
//! - [`hw`]: Raw register maps
//! - [`platform`]: Platform-specific drivers (SoC level)
//! - [`console`]: `log` backend on a serial port
//! - [`echo`]: Serial-to-I2C echo application
//!
//! # Usage Example
//!
//! ```no_run
//! use tiva_drivers::hal::i2c::I2cConfig;
//! use tiva_drivers::hal::serial::SerialConfig;
//! use tiva_drivers::platform::tm4c1294::{I2c, Uart};
//! use tiva_drivers::print::Print;
//!
//! let mut uart = unsafe { Uart::new(0, SerialConfig::new_8n1(115_200)) };
//! uart.open().unwrap();
//! uart.println("ready").unwrap();
//!
//! let mut i2c = unsafe { I2c::new(0, I2cConfig::STANDARD) };
//! i2c.open().unwrap();
//! i2c.set_address(0x08);
//! tiva_drivers::printf!(&mut i2c, "%c%s", 0x2Au8, "data").unwrap();
//! ```

#![cfg_attr(not(test), no_std)]

pub mod console;
pub mod echo;
pub mod hal;
pub mod hw;
pub mod platform;
pub mod print;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use hal::i2c::{I2cBus, I2cConfig, I2cError};
pub use hal::serial::{SerialConfig, SerialError, SerialPort};
pub use hal::timer::Timer;
pub use print::{ByteSink, Print, WriteFlags};
