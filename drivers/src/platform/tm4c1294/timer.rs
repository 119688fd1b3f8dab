//! General-purpose timer used to pace the main loop.
//!
//! Timer A of a GPTM block runs as a periodic 32-bit down-counter. Its
//! time-out interrupt handler calls [`PacingTimer::on_timeout`], which
//! acknowledges the interrupt and raises a [`RequestFlag`] for the main
//! loop to consume.

use common::sync::RequestFlag;
use log::debug;

use super::sysctl;
use crate::hal::mmio::{Mmio, VolatileMmio};
use crate::hal::timer::{Timer, TimerError};
use crate::hw::tm4c1294::SYSCLK_HZ;
use crate::hw::tm4c1294::nvic;
use crate::hw::tm4c1294::sysctl::Family;
use crate::hw::tm4c1294::timer::{
    self as regs, CFG, CFG_32BIT, CTL, CTL_TAEN, ICR, IMR, RIS, TAILR, TAMR, TAMR_PERIODIC, TATO,
    TIMER_COUNT,
};

const TICKS_PER_US: u64 = SYSCLK_HZ as u64 / 1_000_000;

/// Reload value for `interval_us`, or `None` if it does not fit 32 bits.
fn reload_value(interval_us: u32) -> Option<u32> {
    let ticks = u64::from(interval_us) * TICKS_PER_US;
    ticks.checked_sub(1).and_then(|t| u32::try_from(t).ok())
}

/// Periodic GPTM timer A.
pub struct PacingTimer<M: Mmio = VolatileMmio> {
    mmio: M,
    unit: u8,
    base: usize,
}

impl PacingTimer<VolatileMmio> {
    /// Claim timer `unit`.
    ///
    /// # Safety
    ///
    /// - Must run on a TM4C1294
    /// - Only one handle should exist per timer
    pub unsafe fn new(unit: u8) -> Result<Self, TimerError> {
        // SAFETY: forwarded to the caller.
        Self::with_mmio(unsafe { VolatileMmio::new() }, unit)
    }
}

impl<M: Mmio> PacingTimer<M> {
    /// Claim timer `unit` using a custom register accessor.
    pub fn with_mmio(mmio: M, unit: u8) -> Result<Self, TimerError> {
        if unit >= TIMER_COUNT {
            return Err(TimerError::InvalidUnit(unit));
        }
        Ok(Self {
            mmio,
            unit,
            base: regs::base(unit),
        })
    }

    /// Interrupt-handler body: acknowledge a time-out and raise `flag`.
    ///
    /// Returns `false` if no time-out was pending.
    pub fn on_timeout(&mut self, flag: &RequestFlag) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.clear_interrupt();
        flag.raise();
        true
    }
}

// ============================================================================
// HAL Implementation
// ============================================================================

impl<M: Mmio> Timer for PacingTimer<M> {
    type Error = TimerError;

    fn start(&mut self, interval_us: u32) -> Result<(), TimerError> {
        let reload = reload_value(interval_us).ok_or(TimerError::InvalidInterval(interval_us))?;

        sysctl::enable_clock(&self.mmio, Family::Timer, self.unit);

        // Disable while reconfiguring
        self.mmio.write(self.base + CTL, 0);
        self.mmio.write(self.base + CFG, CFG_32BIT);
        self.mmio.write(self.base + TAMR, TAMR_PERIODIC);
        self.mmio.write(self.base + TAILR, reload);
        self.mmio.write(self.base + ICR, TATO);
        self.mmio.write(self.base + IMR, TATO);

        let (enable, bit) = nvic::enable_bit(regs::IRQS[usize::from(self.unit)]);
        self.mmio.write(enable, bit);

        self.mmio.set_bits(self.base + CTL, CTL_TAEN);
        debug!("timer {}: period {interval_us} us", self.unit);
        Ok(())
    }

    fn stop(&mut self) {
        self.mmio.clear_bits(self.base + CTL, CTL_TAEN);
    }

    fn clear_interrupt(&mut self) {
        self.mmio.write(self.base + ICR, TATO);
    }

    fn is_pending(&self) -> bool {
        self.mmio.read(self.base + RIS) & TATO != 0
    }
}
