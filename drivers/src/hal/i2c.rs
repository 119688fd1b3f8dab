//! I2C Hardware Abstraction Layer.
//!
//! [`I2cBus`] is the explicit-address interface: every call names its
//! target. Drivers that also bind a target address implement
//! [`ByteSink`](crate::print::ByteSink) for formatted, multi-byte writes.

use core::fmt;

use crate::print::FormatError;

/// Which side of the bus the controller plays.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    Master,
    Slave,
}

/// I2C controller configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct I2cConfig {
    /// SCL frequency in Hz.
    pub frequency: u32,
    pub role: Role,
}

impl I2cConfig {
    /// Standard mode, 100 kHz master.
    pub const STANDARD: Self = Self::new(100_000, Role::Master);
    /// Fast mode, 400 kHz master.
    pub const FAST: Self = Self::new(400_000, Role::Master);
    /// Fast mode plus, 1 MHz master.
    pub const FAST_PLUS: Self = Self::new(1_000_000, Role::Master);
    /// High-speed mode, 3.33 MHz master.
    pub const HIGH_SPEED: Self = Self::new(3_330_000, Role::Master);

    /// Bus speeds a controller can be opened with.
    pub const SUPPORTED_FREQUENCIES: [u32; 4] = [100_000, 400_000, 1_000_000, 3_330_000];

    pub const fn new(frequency: u32, role: Role) -> Self {
        Self { frequency, role }
    }

    /// Same speed, different role.
    pub const fn with_role(self, role: Role) -> Self {
        Self { role, ..self }
    }

    pub fn is_supported_frequency(&self) -> bool {
        Self::SUPPORTED_FREQUENCIES.contains(&self.frequency)
    }
}

impl Default for I2cConfig {
    /// Default configuration: 100 kHz master.
    fn default() -> Self {
        Self::STANDARD
    }
}

/// What went wrong on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BusFault {
    /// The target did not acknowledge its address.
    AddressNack,
    /// The target did not acknowledge a data byte.
    DataNack,
    /// Another master won arbitration.
    ArbitrationLost,
    /// Error reported without a cause.
    Unknown,
}

impl fmt::Display for BusFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BusFault::AddressNack => "address not acknowledged",
            BusFault::DataNack => "data not acknowledged",
            BusFault::ArbitrationLost => "arbitration lost",
            BusFault::Unknown => "bus error",
        })
    }
}

/// I2C errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum I2cError {
    /// The controller is not open (never opened, failed to open, or closed).
    Unavailable,
    /// No such I2C unit on this chip.
    InvalidUnit(u8),
    /// Bus speed not supported with the current clock.
    InvalidSpeed(u32),
    /// Master operation on a slave controller.
    WrongMode,
    /// A register write with no payload.
    ZeroLength,
    /// Bound-address operation before `set_address`.
    NoAddress,
    /// A transfer failed.
    Bus(BusFault),
    /// The register-select write of a write-then-read failed.
    AddressPhase(BusFault),
    /// A `printf` format problem.
    Format(FormatError),
}

impl From<FormatError> for I2cError {
    fn from(e: FormatError) -> Self {
        I2cError::Format(e)
    }
}

impl fmt::Display for I2cError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            I2cError::Unavailable => f.write_str("I2C controller not open"),
            I2cError::InvalidUnit(unit) => write!(f, "no I2C{unit}"),
            I2cError::InvalidSpeed(hz) => write!(f, "unsupported I2C speed {hz} Hz"),
            I2cError::WrongMode => f.write_str("operation needs a master controller"),
            I2cError::ZeroLength => f.write_str("empty register write"),
            I2cError::NoAddress => f.write_str("no target address bound"),
            I2cError::Bus(fault) => write!(f, "bus: {fault}"),
            I2cError::AddressPhase(fault) => write!(f, "register select: {fault}"),
            I2cError::Format(e) => write!(f, "format: {e}"),
        }
    }
}

/// Master transfers with the 7-bit target address given per call.
pub trait I2cBus {
    type Error: fmt::Debug;

    /// Write one byte as a complete transaction.
    fn write_to(&mut self, address: u8, byte: u8) -> Result<(), Self::Error>;

    /// Write `register` followed by `data` in one transaction.
    fn write_register_to(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), Self::Error>;

    /// Fill `buf` from the target.
    fn read_from(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write `register`, then fill `buf` after a repeated start.
    fn read_register_from(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn presets() {
        assert_eq!(I2cConfig::default(), I2cConfig::STANDARD);
        assert!(I2cConfig::HIGH_SPEED.is_supported_frequency());
        assert!(!I2cConfig::new(200_000, Role::Master).is_supported_frequency());
        assert_eq!(I2cConfig::FAST.with_role(Role::Slave).role, Role::Slave);
    }

    #[test]
    fn errors_display() {
        assert_eq!(
            I2cError::AddressPhase(BusFault::AddressNack).to_string(),
            "register select: address not acknowledged"
        );
        assert_eq!(I2cError::InvalidUnit(12).to_string(), "no I2C12");
    }
}
