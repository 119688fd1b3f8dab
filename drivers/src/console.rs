//! Serial console and `log` backend.
//!
//! A [`ConsoleLogger`] owns a serial port behind a spin lock and renders
//! `log` records onto it as `[LEVEL target] message`. The crate provides one
//! for the platform UART, [`CONSOLE`], installed with [`init`] and written
//! to directly by [`console_print!`](crate::console_print) and
//! [`console_println!`](crate::console_println).

use core::fmt::{self, Write};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

use crate::hal::serial::SerialPort;
use crate::platform::CurrentUart;
use crate::print::SinkWriter;

/// `log` backend writing to a serial port.
pub struct ConsoleLogger<S> {
    port: Mutex<Option<S>>,
}

impl<S> ConsoleLogger<S> {
    /// A logger with no port attached; output is dropped until one is.
    pub const fn new() -> Self {
        Self {
            port: Mutex::new(None),
        }
    }
}

impl<S> Default for ConsoleLogger<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SerialPort + Send> ConsoleLogger<S> {
    /// Route output to `port`, returning the previous one.
    pub fn attach(&self, port: S) -> Option<S> {
        self.port.lock().replace(port)
    }

    /// Take the port back.
    pub fn detach(&self) -> Option<S> {
        self.port.lock().take()
    }

    /// Attach `port` and make this the global `log` backend.
    pub fn install(&'static self, port: S, level: LevelFilter) -> Result<(), SetLoggerError> {
        self.attach(port);
        log::set_logger(self)?;
        log::set_max_level(level);
        Ok(())
    }

    /// Write formatted text, expanding `\n` to `\r\n`.
    pub fn write_fmt(&self, args: fmt::Arguments<'_>) -> fmt::Result {
        match self.port.lock().as_mut() {
            Some(port) => SinkWriter(port).write_fmt(args),
            None => Ok(()),
        }
    }
}

impl<S: SerialPort + Send> Log for ConsoleLogger<S> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        let _ = self.write_fmt(format_args!(
            "[{} {}] {}\n",
            record.level(),
            record.target(),
            record.args()
        ));
    }

    fn flush(&self) {
        if let Some(port) = self.port.lock().as_mut() {
            let _ = port.flush();
        }
    }
}

/// Console on the platform UART.
pub static CONSOLE: ConsoleLogger<CurrentUart> = ConsoleLogger::new();

/// Attach `port` to [`CONSOLE`] and install it as the `log` backend.
///
/// `port` should already be open; output to a closed port is dropped.
pub fn init(port: CurrentUart, level: LevelFilter) -> Result<(), SetLoggerError> {
    CONSOLE.install(port, level)
}

// ============================================================================
// Print Macros
// ============================================================================

/// Print to console without newline
#[macro_export]
macro_rules! console_print {
    ($($arg:tt)*) => {{
        let _ = $crate::console::CONSOLE.write_fmt(format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! console_println {
    () => { $crate::console_print!("\n") };
    ($($arg:tt)*) => {{
        $crate::console_print!("{}\n", format_args!($($arg)*));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::serial::SerialConfig;
    use crate::platform::tm4c1294::Uart;
    use crate::testing::MockMmio;
    use log::Level;

    fn logger(mmio: &MockMmio) -> ConsoleLogger<Uart<&MockMmio>> {
        let mut uart = Uart::with_mmio(mmio, 0, SerialConfig::default());
        uart.open().unwrap();

        let logger = ConsoleLogger::new();
        assert!(logger.attach(uart).is_none());
        logger
    }

    #[test]
    fn formats_records() {
        let mmio = MockMmio::new();
        let logger = logger(&mmio);

        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("i2c")
                .args(format_args!("nack at {:#04x}", 0x3C))
                .build(),
        );

        assert_eq!(mmio.uart_tx(0), b"[WARN i2c] nack at 0x3c\r\n");
    }

    #[test]
    fn write_fmt_expands_newlines() {
        let mmio = MockMmio::new();
        let logger = logger(&mmio);

        logger.write_fmt(format_args!("a\nb{}\n", 1)).unwrap();
        assert_eq!(mmio.uart_tx(0), b"a\r\nb1\r\n");
    }

    #[test]
    fn detached_logger_drops_output() {
        let mmio = MockMmio::new();
        let logger = logger(&mmio);
        let port = logger.detach();
        assert!(port.is_some());

        logger.write_fmt(format_args!("lost")).unwrap();
        assert!(mmio.uart_tx(0).is_empty());
    }

    #[test]
    fn closed_port_reports_error() {
        let mmio = MockMmio::new();
        let logger = logger(&mmio);
        let mut port = logger.detach().unwrap();
        port.close();
        logger.attach(port);

        assert!(logger.write_fmt(format_args!("x")).is_err());
    }
}
