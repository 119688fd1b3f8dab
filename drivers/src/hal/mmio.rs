//! Memory-mapped register access.
//!
//! Drivers never dereference register addresses themselves. They go through
//! an [`Mmio`] accessor, which on hardware is [`VolatileMmio`] and in tests
//! is a simulated register file.

use core::ptr::{read_volatile, write_volatile};

/// Word-sized access to memory-mapped registers at absolute addresses.
///
/// `write` takes `&self`: a register write is a side effect on the device,
/// not on the accessor. Exclusive ownership of a peripheral is enforced by
/// the driver that holds the accessor, not by the accessor itself.
pub trait Mmio {
    /// Read the 32-bit register at `addr`.
    fn read(&self, addr: usize) -> u32;

    /// Write `value` to the 32-bit register at `addr`.
    fn write(&self, addr: usize, value: u32);

    /// Read-modify-write a register.
    #[inline]
    fn modify<F>(&self, addr: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read(addr);
        self.write(addr, f(value));
    }

    /// Set the bits in `mask`.
    #[inline]
    fn set_bits(&self, addr: usize, mask: u32) {
        self.modify(addr, |v| v | mask);
    }

    /// Clear the bits in `mask`.
    #[inline]
    fn clear_bits(&self, addr: usize, mask: u32) {
        self.modify(addr, |v| v & !mask);
    }

    /// Replace the bits selected by `mask` with `value`.
    #[inline]
    fn write_field(&self, addr: usize, mask: u32, value: u32) {
        self.modify(addr, |v| (v & !mask) | (value & mask));
    }
}

impl<T: Mmio + ?Sized> Mmio for &T {
    #[inline]
    fn read(&self, addr: usize) -> u32 {
        (**self).read(addr)
    }

    #[inline]
    fn write(&self, addr: usize, value: u32) {
        (**self).write(addr, value)
    }
}

/// Volatile access to the physical address space.
#[derive(Debug, Clone, Copy)]
pub struct VolatileMmio {
    _private: (),
}

impl VolatileMmio {
    /// Create an accessor for the physical address space.
    ///
    /// # Safety
    ///
    /// - Every address later passed to `read`/`write` must be a valid,
    ///   word-aligned device register on the running chip
    /// - Device memory must be mapped (trivially true without an MPU)
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Mmio for VolatileMmio {
    #[inline]
    fn read(&self, addr: usize) -> u32 {
        // SAFETY: guaranteed by the contract of `VolatileMmio::new`.
        unsafe { read_volatile(addr as *const u32) }
    }

    #[inline]
    fn write(&self, addr: usize, value: u32) {
        // SAFETY: guaranteed by the contract of `VolatileMmio::new`.
        unsafe { write_volatile(addr as *mut u32, value) }
    }
}
