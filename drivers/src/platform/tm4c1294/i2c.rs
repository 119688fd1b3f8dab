//! TM4C1294 I2C master driver.
//!
//! One driver, two ways to address a target:
//!
//! - [`I2cBus`]: every transfer names its 7-bit target address
//! - bound address: [`I2c::set_address`] once, then [`I2c::read`],
//!   [`I2c::read_register`] and formatted writes through [`ByteSink`],
//!   where each `Print` call becomes one bus transaction
//!
//! All transfers poll the master control/status register; there are no
//! timeouts, so a wedged bus blocks the caller.
//!
//! # Example
//!
//! ```no_run
//! use tiva_drivers::hal::i2c::{I2cBus, I2cConfig};
//! use tiva_drivers::platform::tm4c1294::I2c;
//!
//! let mut i2c = unsafe { I2c::new(0, I2cConfig::STANDARD) };
//! i2c.open().unwrap();
//!
//! let mut id = [0u8; 2];
//! i2c.read_register_from(0x48, 0x07, &mut id).unwrap();
//!
//! i2c.set_address(0x48);
//! tiva_drivers::printf!(&mut i2c, "%c%c", 0x01u8, 0x60u8).unwrap();
//! ```

use log::{debug, warn};

use super::{gpio, sysctl};
use crate::hal::i2c::{BusFault, I2cBus, I2cConfig, I2cError, Role};
use crate::hal::mmio::{Mmio, VolatileMmio};
use crate::hw::tm4c1294::SYSCLK_HZ;
use crate::hw::tm4c1294::i2c::{
    self as regs, CMD_CONTINUE, CMD_FINISH, CMD_RECEIVE_ACK, CMD_SINGLE, CMD_START,
    CMD_START_RECEIVE_ACK, CMD_STOP, I2C_COUNT, MCR, MCR_MFE, MCR_SFE, MCS, MCS_ADRACK,
    MCS_ARBLST, MCS_BUSBSY, MCS_BUSY, MCS_DATACK, MCS_ERROR, MDR, MSA, MSA_RS, MTPR, MTPR_HS,
    MTPR_TPR, SCL_TIMER_FACTOR,
};
use crate::hw::tm4c1294::sysctl::Family;
use crate::print::{ByteSink, WriteFlags, frame_bytes};

/// Spins before each idle poll; BUSY lags the command write by a few cycles.
const SETTLE_SPINS: u32 = 300;

/// Highest SCL frequency of standard/fast/fast-plus timing.
const MAX_STANDARD_HZ: u32 = 1_000_000;

/// Compute the MTPR value for `frequency` at `clock_hz`.
///
/// `TPR = clock / (20 × frequency) − 1`; the high-speed bit is set above
/// 1 MHz. A TPR that is negative or wider than 7 bits is unsupported.
pub fn timer_period(clock_hz: u32, frequency: u32) -> Result<u32, I2cError> {
    let tpr = frequency
        .checked_mul(SCL_TIMER_FACTOR)
        .and_then(|scl| clock_hz.checked_div(scl))
        .and_then(|q| q.checked_sub(1))
        .filter(|&tpr| tpr <= MTPR_TPR)
        .ok_or(I2cError::InvalidSpeed(frequency))?;

    let hs = if frequency > MAX_STANDARD_HZ { MTPR_HS } else { 0 };
    Ok(tpr | hs)
}

impl BusFault {
    /// Classify an MCS status word with the error bit set.
    pub(crate) fn from_status(status: u32) -> Self {
        if status & MCS_ARBLST != 0 {
            BusFault::ArbitrationLost
        } else if status & MCS_ADRACK != 0 {
            BusFault::AddressNack
        } else if status & MCS_DATACK != 0 {
            BusFault::DataNack
        } else {
            BusFault::Unknown
        }
    }
}

/// Register addresses of one open controller.
#[derive(Debug, Copy, Clone)]
struct Registers {
    msa: usize,
    mcs: usize,
    mdr: usize,
}

impl Registers {
    fn resolve(base: usize) -> Self {
        Self {
            msa: base + MSA,
            mcs: base + MCS,
            mdr: base + MDR,
        }
    }
}

/// MSA value for a 7-bit target address.
fn target(address: u8, receive: bool) -> u32 {
    let direction = if receive { MSA_RS } else { 0 };
    (u32::from(address) << 1) & 0xFE | direction
}

/// TM4C1294 I2C controller.
pub struct I2c<M: Mmio = VolatileMmio> {
    mmio: M,
    unit: u8,
    config: I2cConfig,
    /// Resolved by `open`. `None` while the controller is unusable.
    regs: Option<Registers>,
    /// Bound target for the byte-sink API.
    address: Option<u8>,
}

impl I2c<VolatileMmio> {
    /// Create a closed handle for I2C `unit`.
    ///
    /// # Safety
    ///
    /// - Must run on a TM4C1294
    /// - Only one handle should exist per I2C module and its pins
    pub const unsafe fn new(unit: u8, config: I2cConfig) -> Self {
        // SAFETY: forwarded to the caller.
        Self::with_mmio(unsafe { VolatileMmio::new() }, unit, config)
    }
}

impl<M: Mmio> I2c<M> {
    /// Create a closed handle using a custom register accessor.
    pub const fn with_mmio(mmio: M, unit: u8, config: I2cConfig) -> Self {
        Self {
            mmio,
            unit,
            config,
            regs: None,
            address: None,
        }
    }

    pub fn unit(&self) -> u8 {
        self.unit
    }

    pub fn config(&self) -> I2cConfig {
        self.config
    }

    pub fn is_open(&self) -> bool {
        self.regs.is_some()
    }

    /// Power up the module, route SCL/SDA and program the bus timing.
    ///
    /// The unit and speed are validated before any register is touched. On
    /// failure the handle stays unusable.
    pub fn open(&mut self) -> Result<(), I2cError> {
        self.regs = None;

        if self.unit >= I2C_COUNT {
            warn!("I2C{}: no such unit", self.unit);
            return Err(I2cError::InvalidUnit(self.unit));
        }
        let frequency = self.config.frequency;
        if !self.config.is_supported_frequency() {
            warn!("I2C{}: unsupported speed {frequency} Hz", self.unit);
            return Err(I2cError::InvalidSpeed(frequency));
        }
        let mtpr = timer_period(SYSCLK_HZ, frequency).inspect_err(|_| {
            warn!("I2C{}: {frequency} Hz unreachable from a {SYSCLK_HZ} Hz clock", self.unit);
        })?;

        let unit = usize::from(self.unit);
        let (scl, sda) = (regs::SCL_PINS[unit], regs::SDA_PINS[unit]);

        sysctl::enable_clock(&self.mmio, Family::I2c, self.unit);
        gpio::route_pins(&self.mmio, regs::PORTS[unit], &[scl, sda], &[sda], regs::PIN_MUX);

        let base = regs::BASES[unit];
        let function = match self.config.role {
            Role::Master => MCR_MFE,
            Role::Slave => MCR_SFE,
        };
        self.mmio.write(base + MCR, function);
        self.mmio.write(base + MTPR, mtpr);

        self.regs = Some(Registers::resolve(base));
        debug!(
            "I2C{}: open as {:?} at {frequency} Hz (MTPR {mtpr:#04x})",
            self.unit, self.config.role
        );
        Ok(())
    }

    /// Release the handle. The module and its pins stay configured.
    pub fn close(&mut self) {
        if self.regs.take().is_some() {
            debug!("I2C{}: closed", self.unit);
        }
    }

    /// Bind the 7-bit target address used by the byte-sink API.
    pub fn set_address(&mut self, address: u8) {
        self.address = Some(address & 0x7F);
    }

    pub fn address(&self) -> Option<u8> {
        self.address
    }

    /// Wait for the last command to finish and check its outcome.
    ///
    /// On error a stop condition is generated if `stop_if_error` is set,
    /// unless arbitration was lost (the bus then belongs to another master).
    pub fn transaction_result(&mut self, stop_if_error: bool) -> Result<(), I2cError> {
        let regs = self.master()?;
        self.settle(regs, stop_if_error).map_err(I2cError::Bus)
    }

    /// Fill `buf` from the bound target.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<(), I2cError> {
        let address = self.address.ok_or(I2cError::NoAddress)?;
        self.read_from(address, buf)
    }

    /// Write `register` to the bound target, then fill `buf` from it.
    pub fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<(), I2cError> {
        let address = self.address.ok_or(I2cError::NoAddress)?;
        self.read_register_from(address, register, buf)
    }

    fn master(&self) -> Result<Registers, I2cError> {
        let regs = self.regs.ok_or(I2cError::Unavailable)?;
        match self.config.role {
            Role::Master => Ok(regs),
            Role::Slave => Err(I2cError::WrongMode),
        }
    }

    fn command(&self, regs: Registers, command: u32) {
        self.mmio.write(regs.mcs, command);
    }

    /// Load the target address and wait until no other master holds the bus.
    fn begin(&self, regs: Registers, msa: u32) {
        self.mmio.write(regs.msa, msa);
        while self.mmio.read(regs.mcs) & MCS_BUSBSY != 0 {
            core::hint::spin_loop();
        }
    }

    fn settle(&self, regs: Registers, stop_if_error: bool) -> Result<(), BusFault> {
        for _ in 0..SETTLE_SPINS {
            core::hint::spin_loop();
        }

        let status = loop {
            let status = self.mmio.read(regs.mcs);
            if status & MCS_BUSY == 0 {
                break status;
            }
            core::hint::spin_loop();
        };

        if status & MCS_ERROR == 0 {
            return Ok(());
        }

        if stop_if_error && status & MCS_ARBLST == 0 {
            self.command(regs, CMD_STOP);
        }

        let fault = BusFault::from_status(status);
        debug!("I2C{}: {fault} (MCS {status:#04x})", self.unit);
        Err(fault)
    }

    fn read_data(&self, regs: Registers) -> u8 {
        self.mmio.read(regs.mdr) as u8
    }

    /// Receive into `buf` after MSA holds the receive address. Issues the
    /// starting command itself.
    fn receive(&self, regs: Registers, buf: &mut [u8]) -> Result<(), I2cError> {
        match buf {
            [] => Err(I2cError::ZeroLength),
            [only] => {
                self.command(regs, CMD_SINGLE);
                self.settle(regs, false).map_err(I2cError::Bus)?;
                *only = self.read_data(regs);
                Ok(())
            }
            [head @ .., last] => {
                self.command(regs, CMD_START_RECEIVE_ACK);

                let acked = head.len();
                for (i, slot) in head.iter_mut().enumerate() {
                    self.settle(regs, true).map_err(I2cError::Bus)?;
                    *slot = self.read_data(regs);
                    if i + 1 < acked {
                        self.command(regs, CMD_RECEIVE_ACK);
                    }
                }

                self.command(regs, CMD_FINISH);
                self.settle(regs, false).map_err(I2cError::Bus)?;
                *last = self.read_data(regs);
                Ok(())
            }
        }
    }
}

// ============================================================================
// HAL Implementation
// ============================================================================

impl<M: Mmio> I2cBus for I2c<M> {
    type Error = I2cError;

    fn write_to(&mut self, address: u8, byte: u8) -> Result<(), I2cError> {
        let regs = self.master()?;

        self.begin(regs, target(address, false));
        self.mmio.write(regs.mdr, u32::from(byte));
        self.command(regs, CMD_SINGLE);
        self.settle(regs, false).map_err(I2cError::Bus)
    }

    fn write_register_to(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), I2cError> {
        let regs = self.master()?;
        let Some((last, body)) = data.split_last() else {
            return Err(I2cError::ZeroLength);
        };

        self.begin(regs, target(address, false));
        self.mmio.write(regs.mdr, u32::from(register));
        self.command(regs, CMD_START);

        for &byte in body {
            self.settle(regs, true).map_err(I2cError::Bus)?;
            self.mmio.write(regs.mdr, u32::from(byte));
            self.command(regs, CMD_CONTINUE);
        }

        self.settle(regs, true).map_err(I2cError::Bus)?;
        self.mmio.write(regs.mdr, u32::from(*last));
        self.command(regs, CMD_FINISH);
        self.settle(regs, false).map_err(I2cError::Bus)
    }

    fn read_from(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cError> {
        let regs = self.master()?;
        if buf.is_empty() {
            return Err(I2cError::ZeroLength);
        }

        self.begin(regs, target(address, true));
        self.receive(regs, buf)
    }

    fn read_register_from(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), I2cError> {
        let regs = self.master()?;
        if buf.is_empty() {
            return Err(I2cError::ZeroLength);
        }

        self.begin(regs, target(address, false));
        self.mmio.write(regs.mdr, u32::from(register));
        self.command(regs, CMD_START);
        self.settle(regs, true).map_err(I2cError::AddressPhase)?;

        // Repeated start: the bus is still ours, no need to wait for it
        self.mmio.write(regs.msa, target(address, true));
        self.receive(regs, buf)
    }
}

impl<M: Mmio> ByteSink for I2c<M> {
    type Error = I2cError;

    fn write_byte(&mut self, byte: u8, flags: WriteFlags) -> Result<(), I2cError> {
        let regs = self.master()?;
        let address = self.address.ok_or(I2cError::NoAddress)?;

        if !flags.is_multiple() {
            self.begin(regs, target(address, false));
            self.mmio.write(regs.mdr, u32::from(byte));
            self.command(regs, CMD_SINGLE);
            return self.settle(regs, false).map_err(I2cError::Bus);
        }

        if flags.contains(WriteFlags::START) {
            self.begin(regs, target(address, false));
        }
        self.mmio.write(regs.mdr, u32::from(byte));
        self.command(regs, u32::from((flags & WriteFlags::CONTROL).bits()));

        self.settle(regs, !flags.contains(WriteFlags::STOP))
            .map_err(I2cError::Bus)
    }

    fn write_bytes(&mut self, bytes: &[u8], flags: WriteFlags) -> Result<(), I2cError> {
        // The start or stop of an empty segment still has to reach the bus.
        if bytes.is_empty() && flags.is_boundary() {
            return self.write_byte(0, flags);
        }
        frame_bytes(self, bytes, flags)
    }
}
