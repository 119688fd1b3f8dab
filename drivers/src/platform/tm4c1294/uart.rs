//! TM4C1294 UART driver.
//!
//! Blocking, polled, FIFO-less 8N1 UART clocked from PIOSC. The UART
//! module is a PL011 derivative; register access goes through [`Mmio`] so
//! the driver runs unchanged against the test register file.
//!
//! # Example
//!
//! ```no_run
//! use tiva_drivers::hal::serial::SerialConfig;
//! use tiva_drivers::platform::tm4c1294::Uart;
//! use tiva_drivers::print::Print;
//!
//! let mut uart = unsafe { Uart::new(0, SerialConfig::new_8n1(115_200)) };
//! uart.open().unwrap();
//! uart.println("Hello, world!").unwrap();
//! ```

use log::{debug, warn};

use super::{gpio, sysctl};
use crate::hal::mmio::{Mmio, VolatileMmio};
use crate::hal::serial::{SerialConfig, SerialError, SerialPort};
use crate::hw::tm4c1294::PIOSC_HZ;
use crate::hw::tm4c1294::sysctl::Family;
use crate::hw::tm4c1294::uart::{
    self as regs, CC, CC_CS_PIOSC, CTL, CTL_RXE, CTL_TXE, CTL_UARTEN, DR, DR_DATA, FBRD, FR,
    FR_BUSY, FR_RXFE, FR_TXFF, IBRD, LCRH, LCRH_WLEN_8, UART_COUNT,
};
use crate::print::{ByteSink, WriteFlags};

/// Clock feeding the baud-rate generator.
const UART_CLOCK_HZ: u32 = PIOSC_HZ;

/// Calculate baud rate divisors.
///
/// `BRD = clock / (16 × baud)` as a 16.6 fixed-point value, rounded to the
/// nearest 1/64. A fraction that rounds up to 64/64 carries into the integer
/// part, so the fractional divisor is always below 64.
pub fn calculate_divisors(clock_hz: u32, baud_rate: u32) -> Result<(u32, u32), SerialError> {
    if baud_rate == 0 {
        return Err(SerialError::InvalidConfig);
    }

    // 64 × clock / (16 × baud), with one extra bit for rounding.
    let scaled = u64::from(clock_hz) * 8 / u64::from(baud_rate);
    let divisor = (scaled + 1) / 2;

    let integer = divisor >> 6;
    let fractional = (divisor & 0x3F) as u32;

    if integer == 0 || integer > 0xFFFF {
        return Err(SerialError::InvalidConfig);
    }

    Ok((integer as u32, fractional))
}

/// TM4C1294 UART driver.
pub struct Uart<M: Mmio = VolatileMmio> {
    mmio: M,
    unit: u8,
    config: SerialConfig,
    /// Register block, resolved by `open`. `None` while the port is unusable.
    base: Option<usize>,
}

impl Uart<VolatileMmio> {
    /// Create a closed handle for UART `unit`.
    ///
    /// # Safety
    ///
    /// - Must run on a TM4C1294
    /// - Only one handle should exist per UART and its pins
    pub const unsafe fn new(unit: u8, config: SerialConfig) -> Self {
        // SAFETY: forwarded to the caller.
        Self::with_mmio(unsafe { VolatileMmio::new() }, unit, config)
    }
}

impl<M: Mmio> Uart<M> {
    /// Create a closed handle using a custom register accessor.
    pub const fn with_mmio(mmio: M, unit: u8, config: SerialConfig) -> Self {
        Self {
            mmio,
            unit,
            config,
            base: None,
        }
    }

    pub fn unit(&self) -> u8 {
        self.unit
    }

    pub fn config(&self) -> SerialConfig {
        self.config
    }

    pub fn is_open(&self) -> bool {
        self.base.is_some()
    }

    /// Power up and configure the UART and its pins.
    ///
    /// The unit and configuration are validated before any register is
    /// touched. On failure the handle stays unusable.
    pub fn open(&mut self) -> Result<(), SerialError> {
        self.base = None;

        if self.unit >= UART_COUNT {
            warn!("UART{}: no such unit", self.unit);
            return Err(SerialError::InvalidUnit(self.unit));
        }
        if !self.config.is_8n1() {
            warn!("UART{}: only 8N1 frames are supported", self.unit);
            return Err(SerialError::InvalidConfig);
        }
        let (ibrd, fbrd) = calculate_divisors(UART_CLOCK_HZ, self.config.baud_rate).inspect_err(|_| {
            warn!("UART{}: unsupported baud rate {}", self.unit, self.config.baud_rate);
        })?;

        let unit = usize::from(self.unit);
        let rx = regs::RX_PINS[unit];

        sysctl::enable_clock(&self.mmio, Family::Uart, self.unit);
        gpio::route_pins(&self.mmio, regs::PORTS[unit], &[rx, rx + 1], &[], regs::PIN_MUX);

        let base = regs::base(self.unit);

        // Disable UART while the divisors change
        self.mmio.write(base + CTL, CTL_TXE | CTL_RXE);

        self.mmio.write(base + IBRD, ibrd);
        self.mmio.write(base + FBRD, fbrd);

        // 8N1, FIFOs disabled
        self.mmio.write(base + LCRH, LCRH_WLEN_8);
        self.mmio.write(base + CC, CC_CS_PIOSC);

        self.mmio.set_bits(base + CTL, CTL_UARTEN);

        self.base = Some(base);
        debug!(
            "UART{}: open at {} baud (IBRD {ibrd}, FBRD {fbrd})",
            self.unit, self.config.baud_rate
        );
        Ok(())
    }

    /// Disable the UART and gate its clock.
    pub fn close(&mut self) {
        if let Some(base) = self.base.take() {
            self.mmio.clear_bits(base + CTL, CTL_UARTEN);
            sysctl::disable_clock(&self.mmio, Family::Uart, self.unit);
            debug!("UART{}: closed", self.unit);
        }
    }

    fn base(&self) -> Result<usize, SerialError> {
        self.base.ok_or(SerialError::Unavailable)
    }
}

// ============================================================================
// HAL Implementation
// ============================================================================

impl<M: Mmio> ByteSink for Uart<M> {
    type Error = SerialError;

    fn write_byte(&mut self, byte: u8, _flags: WriteFlags) -> Result<(), SerialError> {
        let base = self.base()?;

        // Wait for the transmit holding register to empty
        while self.mmio.read(base + FR) & FR_TXFF != 0 {
            core::hint::spin_loop();
        }

        self.mmio.write(base + DR, u32::from(byte));
        Ok(())
    }
}

impl<M: Mmio> SerialPort for Uart<M> {
    fn configure(&mut self, config: SerialConfig) -> Result<(), SerialError> {
        self.config = config;
        self.open()
    }

    fn read_byte(&mut self) -> Result<u8, SerialError> {
        let base = self.base()?;

        // Wait for data to be available
        while self.mmio.read(base + FR) & FR_RXFE != 0 {
            core::hint::spin_loop();
        }

        Ok((self.mmio.read(base + DR) & DR_DATA) as u8)
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        let base = self.base()?;
        while self.mmio.read(base + FR) & FR_BUSY != 0 {
            core::hint::spin_loop();
        }
        Ok(())
    }

    fn is_busy(&self) -> bool {
        self.base
            .is_some_and(|base| self.mmio.read(base + FR) & FR_BUSY != 0)
    }
}
