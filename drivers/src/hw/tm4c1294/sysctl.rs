//! System control: run-mode clock gating and peripheral-ready registers.

pub const SYSCTL_BASE: usize = 0x400F_E000;

// Run Mode Clock Gating Control
pub const RCGCTIMER: usize = SYSCTL_BASE + 0x604;
pub const RCGCGPIO: usize = SYSCTL_BASE + 0x608;
pub const RCGCUART: usize = SYSCTL_BASE + 0x618;
pub const RCGCI2C: usize = SYSCTL_BASE + 0x620;

// Peripheral Ready
pub const PRTIMER: usize = SYSCTL_BASE + 0xA04;
pub const PRGPIO: usize = SYSCTL_BASE + 0xA08;
pub const PRUART: usize = SYSCTL_BASE + 0xA18;
pub const PRI2C: usize = SYSCTL_BASE + 0xA20;

/// Peripheral family, as gated by one RCGC/PR register pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Family {
    Timer,
    Gpio,
    Uart,
    I2c,
}

impl Family {
    /// Clock gating register for this family.
    pub const fn rcgc(self) -> usize {
        match self {
            Family::Timer => RCGCTIMER,
            Family::Gpio => RCGCGPIO,
            Family::Uart => RCGCUART,
            Family::I2c => RCGCI2C,
        }
    }

    /// Peripheral ready register for this family.
    pub const fn pr(self) -> usize {
        match self {
            Family::Timer => PRTIMER,
            Family::Gpio => PRGPIO,
            Family::Uart => PRUART,
            Family::I2c => PRI2C,
        }
    }
}
