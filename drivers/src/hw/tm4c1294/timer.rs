//! General-purpose timer (GPTM) register map.

use super::UNIT_STRIDE;

pub const TIMER_BASE: usize = 0x4003_0000;
/// Timers 0 to 5 share the 0x4003_x000 aperture.
pub const TIMER_COUNT: u8 = 6;

// Register offsets
pub const CFG: usize = 0x000;
pub const TAMR: usize = 0x004;
pub const CTL: usize = 0x00C;
pub const IMR: usize = 0x018;
pub const RIS: usize = 0x01C;
pub const ICR: usize = 0x024;
pub const TAILR: usize = 0x028;

/// CFG: concatenated 32-bit timer.
pub const CFG_32BIT: u32 = 0x0;
/// TAMR: periodic mode.
pub const TAMR_PERIODIC: u32 = 0x2;
/// CTL: timer A enable.
pub const CTL_TAEN: u32 = 1 << 0;
/// IMR/RIS/ICR: timer A time-out.
pub const TATO: u32 = 1 << 0;

/// Interrupt number of each timer's A half.
pub const IRQS: [u8; TIMER_COUNT as usize] = [19, 21, 23, 35, 70, 92];

/// Base address of timer `unit`. The caller validates `unit`.
pub const fn base(unit: u8) -> usize {
    TIMER_BASE + (unit as usize) * UNIT_STRIDE
}
