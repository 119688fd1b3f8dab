//! GPIO ports on the AHB aperture.

use super::UNIT_STRIDE;

pub const GPIO_AHB_BASE: usize = 0x4005_8000;

// Register offsets
pub const DIR: usize = 0x400;
pub const AFSEL: usize = 0x420;
pub const ODR: usize = 0x50C;
pub const DEN: usize = 0x51C;
pub const AMSEL: usize = 0x528;
pub const PCTL: usize = 0x52C;

/// GPIO port letter, numbered as in the RCGCGPIO bit positions.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    J = 8,
    K = 9,
    L = 10,
    M = 11,
    N = 12,
    P = 13,
    Q = 14,
}

impl Port {
    /// RCGCGPIO / PRGPIO bit index.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Base address of the port's register block.
    pub const fn base(self) -> usize {
        GPIO_AHB_BASE + (self as usize) * UNIT_STRIDE
    }
}

/// Port control (PCTL) nibble for a pin.
pub const fn pctl_shift(pin: u8) -> u32 {
    (pin as u32) * 4
}
