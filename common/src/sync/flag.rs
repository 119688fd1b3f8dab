use core::sync::atomic::{AtomicBool, Ordering};

/// Single-slot request flag shared between an interrupt handler and the
/// main loop.
///
/// The interrupt side only ever calls [`RequestFlag::raise`]; the main loop
/// polls with [`RequestFlag::take`] or blocks in [`RequestFlag::wait`].
/// Raising an already raised flag is a no-op, so requests do not queue up.
///
/// # Example
///
/// ```
/// use tiva_common::RequestFlag;
///
/// static TICK: RequestFlag = RequestFlag::new();
///
/// // timer interrupt
/// TICK.raise();
///
/// // main loop
/// assert!(TICK.take());
/// assert!(!TICK.take());
/// ```
#[derive(Debug)]
pub struct RequestFlag {
    raised: AtomicBool,
}

impl RequestFlag {
    /// Create a lowered flag.
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Raise the flag. Safe to call from interrupt context.
    #[inline]
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Check the flag without consuming it.
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Consume a pending request.
    ///
    /// Returns `true` if the flag was raised; the flag is lowered either way.
    #[inline]
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }

    /// Lower the flag, discarding any pending request.
    #[inline]
    pub fn clear(&self) {
        self.raised.store(false, Ordering::Release);
    }

    /// Spin until a request arrives, then consume it.
    ///
    /// Must not be called from the interrupt handler that raises the flag.
    pub fn wait(&self) {
        while !self.take() {
            core::hint::spin_loop();
        }
    }
}

impl Default for RequestFlag {
    fn default() -> Self {
        Self::new()
    }
}
