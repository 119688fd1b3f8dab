//! TM4C1294NCPDT memory map.
//!
//! Offsets follow the TM4C1294NCPDT datasheet (SPMS433) register
//! descriptions.

pub mod gpio;
pub mod i2c;
pub mod nvic;
pub mod sysctl;
pub mod timer;
pub mod uart;

/// Precision internal oscillator frequency.
pub const PIOSC_HZ: u32 = 16_000_000;

cfg_if::cfg_if! {
    if #[cfg(feature = "pll")] {
        /// System clock, driven by the PLL.
        pub const SYSCLK_HZ: u32 = 120_000_000;
    } else {
        /// System clock, driven directly by PIOSC.
        pub const SYSCLK_HZ: u32 = PIOSC_HZ;
    }
}

/// Spacing between consecutive instances of one peripheral family.
pub const UNIT_STRIDE: usize = 0x1000;
