//! Run-mode clock gating.

use crate::hal::mmio::Mmio;
use crate::hw::tm4c1294::sysctl::Family;

/// Gate on the clock of instance `unit` of `family` and wait until the
/// peripheral reports ready.
pub fn enable_clock<M: Mmio>(mmio: &M, family: Family, unit: u8) {
    let bit = 1 << unit;
    mmio.set_bits(family.rcgc(), bit);
    while mmio.read(family.pr()) & bit == 0 {
        core::hint::spin_loop();
    }
}

/// Gate off the clock of instance `unit` of `family`.
pub fn disable_clock<M: Mmio>(mmio: &M, family: Family, unit: u8) {
    mmio.clear_bits(family.rcgc(), 1 << unit);
}
