//! Serial-to-I2C echo application.
//!
//! Each cycle prompts on the serial console, reads a line, sends register
//! byte `0x2A` plus the first five characters of the line to the I2C device
//! in one bus transaction, reads six bytes back and echoes them to the
//! console. [`EchoSession::serve`] repeats this forever, paced by a
//! [`RequestFlag`] raised from a periodic timer interrupt.

use common::sync::RequestFlag;
use log::{debug, warn};

use crate::hal::i2c::I2cError;
use crate::hal::mmio::Mmio;
use crate::hal::serial::SerialPort;
use crate::hal::timer::Timer;
use crate::platform::tm4c1294::I2c;
use crate::print::Print;
use crate::printf;

/// Target address of the I2C device.
pub const DEVICE_ADDRESS: u8 = 0x08;
/// Device memory location the payload is written to.
pub const DEVICE_REGISTER: u8 = 0x2A;
/// Characters of the input line forwarded to the device.
pub const PAYLOAD_LEN: usize = 5;
/// Bytes read back from the device.
pub const REPLY_LEN: usize = 6;
/// Serial line buffer, NUL included.
pub const LINE_LEN: usize = 30;
/// Time between two cycles of [`EchoSession::serve`].
pub const PACING_INTERVAL_US: u32 = 500_000;

/// Start `timer` at the pacing interval of [`EchoSession::serve`].
pub fn start_pacing<T: Timer>(timer: &mut T) -> Result<(), T::Error> {
    timer.start(PACING_INTERVAL_US)
}

/// Result of one device exchange.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exchange {
    /// The reply was echoed to the console.
    Echoed,
    /// Writing the payload failed.
    WriteFailed(I2cError),
    /// Reading the reply failed.
    ReadFailed(I2cError),
}

/// One serial console and one I2C device.
pub struct EchoSession<U, M: Mmio> {
    serial: U,
    i2c: I2c<M>,
    line: [u8; LINE_LEN],
    reply: [u8; REPLY_LEN],
}

impl<U: SerialPort, M: Mmio> EchoSession<U, M> {
    /// Compose open drivers into a session talking to the device at
    /// [`DEVICE_ADDRESS`].
    pub fn new(serial: U, mut i2c: I2c<M>) -> Self {
        i2c.set_address(DEVICE_ADDRESS);
        Self {
            serial,
            i2c,
            line: [0; LINE_LEN],
            reply: [0; REPLY_LEN],
        }
    }

    /// Give the drivers back.
    pub fn into_parts(self) -> (U, I2c<M>) {
        (self.serial, self.i2c)
    }

    /// Run one prompt / exchange / echo cycle.
    ///
    /// Device failures are reported on the console and returned as an
    /// [`Exchange`]; only console failures are errors.
    pub fn run_once(&mut self) -> Result<Exchange, U::Error> {
        self.serial.print("Enter a string and press enter: ")?;
        let len = self.serial.readline(&mut self.line, false)?;
        debug!("echo: read {len} bytes");

        printf!(
            &mut self.serial,
            "\r\nWriting the first %d characters to 0x%ux on the I2C device\r\n",
            PAYLOAD_LEN as u32,
            u32::from(DEVICE_REGISTER)
        )?;

        let exchange = self.exchange();
        match exchange {
            Exchange::Echoed => printf!(
                &mut self.serial,
                "I2C: %d chars received\r\n\trxMsg: %6s\r\n\n",
                REPLY_LEN as u32,
                &self.reply[..]
            )?,
            Exchange::WriteFailed(_) => self.serial.println("I2C: Error Writing")?,
            Exchange::ReadFailed(_) => self.serial.println("I2C: Error Reading")?,
        }
        Ok(exchange)
    }

    fn exchange(&mut self) -> Exchange {
        if let Err(e) = printf!(&mut self.i2c, "%c%5s", DEVICE_REGISTER, &self.line[..]) {
            debug!("echo: write failed: {e}");
            return Exchange::WriteFailed(e);
        }
        if let Err(e) = self.i2c.read(&mut self.reply) {
            debug!("echo: read failed: {e}");
            return Exchange::ReadFailed(e);
        }
        Exchange::Echoed
    }

    /// Run cycles forever, one per raise of `flag`.
    pub fn serve(&mut self, flag: &RequestFlag) -> ! {
        loop {
            if let Err(e) = self.run_once() {
                warn!("echo: console error {e:?}");
            }

            flag.clear();
            flag.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::i2c::{BusFault, I2cConfig};
    use crate::hal::serial::SerialConfig;
    use crate::hw::tm4c1294::i2c::{MCS_ADRACK, MCS_DATACK, MCS_ERROR};
    use crate::platform::tm4c1294::Uart;
    use crate::testing::MockMmio;

    fn session(mmio: &MockMmio) -> EchoSession<Uart<&MockMmio>, &MockMmio> {
        let mut uart = Uart::with_mmio(mmio, 0, SerialConfig::new_8n1(115_200));
        uart.open().unwrap();
        let mut i2c = I2c::with_mmio(mmio, 0, I2cConfig::STANDARD);
        i2c.open().unwrap();
        EchoSession::new(uart, i2c)
    }

    fn console(mmio: &MockMmio) -> std::string::String {
        std::string::String::from_utf8(mmio.uart_tx(0)).unwrap()
    }

    #[test]
    fn echoes_device_reply() {
        let mmio = MockMmio::new();
        let mut session = session(&mmio);
        mmio.queue_uart_rx(0, b"hello world\r\n");
        mmio.queue_i2c_rx(b"ABCDEF");

        assert_eq!(session.run_once(), Ok(Exchange::Echoed));

        assert_eq!(mmio.i2c_data(), b"*hello");
        let out = console(&mmio);
        assert!(out.starts_with("Enter a string and press enter: "));
        assert!(out.contains("to 0x2A on the I2C device\r\n"));
        assert!(out.ends_with("I2C: 6 chars received\r\n\trxMsg: ABCDEF\r\n\n"));
    }

    #[test]
    fn short_line_is_padded_with_buffer_bytes() {
        let mmio = MockMmio::new();
        let mut session = session(&mmio);
        mmio.queue_uart_rx(0, b"hi\r\n");
        mmio.queue_i2c_rx(b"ABCDEF");

        session.run_once().unwrap();
        // "hi", the NUL, the LF left behind by readline, then a zero byte
        assert_eq!(mmio.i2c_data(), b"*hi\0\n\0");
    }

    #[test]
    fn reports_write_failure() {
        let mmio = MockMmio::new();
        let mut session = session(&mmio);
        mmio.queue_uart_rx(0, b"abcde\r\n");
        mmio.fail_i2c_command(0, MCS_ERROR | MCS_ADRACK);

        assert_eq!(
            session.run_once(),
            Ok(Exchange::WriteFailed(I2cError::Bus(BusFault::AddressNack)))
        );
        assert!(console(&mmio).ends_with("I2C: Error Writing\r\n"));
    }

    #[test]
    fn reports_read_failure() {
        let mmio = MockMmio::new();
        let mut session = session(&mmio);
        mmio.queue_uart_rx(0, b"abcde\r\n");
        // Six write commands, then the first receive fails
        mmio.fail_i2c_command(6, MCS_ERROR | MCS_DATACK);

        assert_eq!(
            session.run_once(),
            Ok(Exchange::ReadFailed(I2cError::Bus(BusFault::DataNack)))
        );
        assert!(console(&mmio).ends_with("I2C: Error Reading\r\n"));
    }

    #[test]
    fn pacing_timer_runs_at_half_second() {
        use crate::hw::tm4c1294::{SYSCLK_HZ, timer as timer_regs};
        use crate::platform::tm4c1294::PacingTimer;

        let mmio = MockMmio::new();
        let mut timer = PacingTimer::with_mmio(&mmio, 0).unwrap();
        start_pacing(&mut timer).unwrap();

        assert_eq!(
            mmio.peek(timer_regs::base(0) + timer_regs::TAILR),
            SYSCLK_HZ / 2 - 1
        );
    }

    #[test]
    fn console_failure_is_returned() {
        let mmio = MockMmio::new();
        let session = session(&mmio);
        let (mut uart, i2c) = session.into_parts();
        uart.close();

        let mut session = EchoSession::new(uart, i2c);
        assert!(session.run_once().is_err());
    }
}
