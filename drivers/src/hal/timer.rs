//! Timer Hardware Abstraction Layer.
//!
//! This module defines platform-independent traits for hardware timers.

use core::fmt;

/// Timer errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// No such timer on this chip.
    InvalidUnit(u8),
    /// The interval is zero or does not fit the counter.
    InvalidInterval(u32),
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::InvalidUnit(unit) => write!(f, "no timer {unit}"),
            TimerError::InvalidInterval(us) => write!(f, "unsupported interval {us} us"),
        }
    }
}

/// Periodic hardware timer.
///
/// The timer reloads automatically and raises its interrupt every
/// interval until stopped.
pub trait Timer {
    /// Error type for timer operations.
    type Error: fmt::Debug;

    /// Start the timer with the given interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is out of range.
    fn start(&mut self, interval_us: u32) -> Result<(), Self::Error>;

    /// Stop the timer.
    fn stop(&mut self);

    /// Clear a pending timeout.
    fn clear_interrupt(&mut self);

    /// Check if a timeout is pending.
    fn is_pending(&self) -> bool;
}
