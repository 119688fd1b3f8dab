//! Serial Port (UART) Hardware Abstraction Layer.
//!
//! This module defines platform-independent traits for serial communication.
//! Output goes through [`ByteSink`], so every serial port gets the whole
//! [`Print`](crate::print::Print) engine for free.

use core::fmt;

use crate::print::{ByteSink, FormatError};

/// Serial port configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Baud rate in bits per second.
    pub baud_rate: u32,
    /// Number of data bits per frame.
    pub data_bits: DataBits,
    /// Parity checking mode.
    pub parity: Parity,
    /// Number of stop bits.
    pub stop_bits: StopBits,
}

impl SerialConfig {
    /// Create a standard 8N1 configuration at the specified baud rate.
    ///
    /// 8N1 means: 8 data bits, no parity, 1 stop bit.
    pub const fn new_8n1(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// `true` for 8 data bits, no parity, 1 stop bit.
    pub const fn is_8n1(&self) -> bool {
        matches!(
            (self.data_bits, self.parity, self.stop_bits),
            (DataBits::Eight, Parity::None, StopBits::One)
        )
    }
}

impl Default for SerialConfig {
    /// Default configuration: 9600 baud, 8N1.
    fn default() -> Self {
        Self::new_8n1(9600)
    }
}

/// Number of data bits per frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

/// Parity mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Parity {
    /// No parity bit.
    None,
    /// Odd parity.
    Odd,
    /// Even parity.
    Even,
}

/// Number of stop bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StopBits {
    /// One stop bit.
    One,
    /// Two stop bits.
    Two,
}

/// Serial port errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SerialError {
    /// The port is not open (never opened, failed to open, or closed).
    Unavailable,
    /// No such UART on this chip.
    InvalidUnit(u8),
    /// Unsupported baud rate or frame format.
    InvalidConfig,
    /// A `printf` format problem.
    Format(FormatError),
}

impl From<FormatError> for SerialError {
    fn from(e: FormatError) -> Self {
        SerialError::Format(e)
    }
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialError::Unavailable => f.write_str("serial port not open"),
            SerialError::InvalidUnit(unit) => write!(f, "no UART{unit}"),
            SerialError::InvalidConfig => f.write_str("unsupported serial configuration"),
            SerialError::Format(e) => write!(f, "format: {e}"),
        }
    }
}

/// Progress of CR LF detection in [`SerialPort::readline`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum LineEnd {
    None,
    SawCr,
    Done,
}

impl LineEnd {
    fn feed(self, byte: u8) -> Self {
        match (self, byte) {
            (_, b'\r') => LineEnd::SawCr,
            (LineEnd::SawCr, b'\n') => LineEnd::Done,
            _ => LineEnd::None,
        }
    }
}

/// Serial port trait.
///
/// Writing is inherited from [`ByteSink`]; the transaction flags mean
/// nothing to a UART and are ignored.
pub trait SerialPort: ByteSink {
    /// Configure the serial port.
    ///
    /// This must be called before using the serial port.
    fn configure(&mut self, config: SerialConfig) -> Result<(), Self::Error>;

    /// Read a single byte (blocking).
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Read a line into `buf` (blocking) and NUL-terminate it.
    ///
    /// Reading stops after a CR immediately followed by LF, or when `buf` is
    /// full. With `keep_terminators` the CR LF stays in the string (the LF is
    /// replaced by the NUL if there is no room for both); without it the
    /// string ends before the CR. A line cut off by a full buffer loses its
    /// last byte to the NUL.
    ///
    /// Returns the string length, not counting the NUL.
    fn readline(&mut self, buf: &mut [u8], keep_terminators: bool) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut state = LineEnd::None;
        let mut count = 0;
        while count < buf.len() && state != LineEnd::Done {
            let byte = self.read_byte()?;
            buf[count] = byte;
            count += 1;
            state = state.feed(byte);
        }

        let len = match state {
            LineEnd::Done if !keep_terminators => count - 2,
            LineEnd::Done if count < buf.len() => count,
            _ => count - 1,
        };
        buf[len] = 0;
        Ok(len)
    }

    /// Wait until everything written has left the transmitter.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Check if the serial port is busy transmitting.
    fn is_busy(&self) -> bool;
}
