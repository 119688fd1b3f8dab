//! Platform Abstraction Layer
//!
//! Chip-specific drivers implementing the [`crate::hal`] traits. Exactly one
//! platform is compiled in, selected with a Cargo feature.
//!
//! # Usage
//!
//! ```no_run
//! use tiva_drivers::hal::serial::SerialConfig;
//! use tiva_drivers::platform::CurrentUart;
//!
//! let mut uart = unsafe { CurrentUart::new(0, SerialConfig::default()) };
//! uart.open().unwrap();
//! ```

// Platform selection based on Cargo features
cfg_if::cfg_if! {
    if #[cfg(feature = "tm4c1294")] {
        pub mod tm4c1294;
        pub use tm4c1294::{I2c as CurrentI2c, PacingTimer as CurrentTimer, Uart as CurrentUart};
    } else {
        compile_error!(
            "No platform selected!\n\
            Use: cargo build --features tm4c1294"
        );
    }
}
