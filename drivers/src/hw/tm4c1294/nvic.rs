//! Cortex-M4 NVIC interrupt enable registers.

/// Interrupt Set-Enable, 32 lines per register.
pub const EN0: usize = 0xE000_E100;

/// Set-enable register and bit for interrupt `irq`.
pub const fn enable_bit(irq: u8) -> (usize, u32) {
    (EN0 + (irq as usize / 32) * 4, 1 << (irq % 32))
}
