//! Transactional formatted output.
//!
//! A transport (UART, I2C) implements [`ByteSink`]: it knows how to put one
//! byte on the wire together with [`WriteFlags`] describing where that byte
//! sits in a transaction. Everything else, from strings to `printf`, is
//! provided by the blanket [`Print`] extension trait in terms of those two
//! primitives and never touches hardware.
//!
//! # Transaction framing
//!
//! Every `Print` call is one logical transaction. In multi-byte mode only
//! the first byte of the call carries [`WriteFlags::START`] and only the last
//! one carries [`WriteFlags::STOP`], so a bus transport can bracket the whole
//! output of a `printf` in a single start/stop pair.
//!
//! ```no_run
//! use tiva_drivers::print::{Print, WriteFlags};
//! # fn demo<S: tiva_drivers::print::ByteSink>(port: &mut S) -> Result<(), S::Error> {
//! port.print("hello")?;                    // h: BEGIN, ell: CONTINUE, o: END
//! tiva_drivers::printf!(port, "%d/%ux\r\n", -5, 0x2Au32)?;
//! # Ok(()) }
//! ```

mod format;
mod number;

pub use format::{Arg, FormatError};
pub use number::Radix;

use core::fmt;

bitflags::bitflags! {
    /// Per-byte transaction control.
    ///
    /// Bits 0..=2 line up with the I2C master control codes (RUN, START,
    /// STOP), so a bus transport can pass [`WriteFlags::CONTROL`] straight to
    /// its control register. Bit 4 selects single-byte or multi-byte mode;
    /// in single-byte mode the control bits are ignored and every byte is a
    /// complete transaction.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct WriteFlags: u8 {
        /// Transfer the byte.
        const ENABLE = 0x01;
        /// First byte: generate a start condition / address phase.
        const START = 0x02;
        /// Last byte: generate a stop condition.
        const STOP = 0x04;
        /// Multi-byte transaction mode.
        const MULTIPLE = 0x10;

        /// Control bits forwarded to the transport.
        const CONTROL = Self::ENABLE.bits() | Self::START.bits() | Self::STOP.bits();
        /// A complete transaction in one call.
        const TRANSACTION = Self::MULTIPLE.bits() | Self::CONTROL.bits();
        /// Opens a transaction.
        const BEGIN = Self::MULTIPLE.bits() | Self::ENABLE.bits() | Self::START.bits();
        /// Closes a transaction.
        const END = Self::MULTIPLE.bits() | Self::ENABLE.bits() | Self::STOP.bits();
        /// Neither opens nor closes.
        const CONTINUE = Self::MULTIPLE.bits() | Self::ENABLE.bits();
    }
}

impl WriteFlags {
    /// Single-byte mode: each byte is its own transaction.
    pub const SINGLE: Self = Self::empty();

    /// `true` in multi-byte mode.
    #[inline]
    pub const fn is_multiple(self) -> bool {
        self.contains(Self::MULTIPLE)
    }

    /// `true` if the byte opens or closes a transaction.
    #[inline]
    pub const fn is_boundary(self) -> bool {
        self.intersects(Self::START.union(Self::STOP))
    }

    /// Flags for the first byte of a longer run: the stop is deferred.
    #[inline]
    pub const fn head(self) -> Self {
        self.difference(Self::STOP)
    }

    /// Flags for an inner byte: neither start nor stop.
    #[inline]
    pub const fn body(self) -> Self {
        self.difference(Self::START.union(Self::STOP))
    }

    /// Flags for the last byte of a longer run: the start already happened.
    #[inline]
    pub const fn tail(self) -> Self {
        self.difference(Self::START)
    }
}

/// A transport that accepts bytes tagged with transaction flags.
pub trait ByteSink {
    /// Transport error. Formatting failures are folded into it.
    type Error: From<FormatError> + fmt::Debug;

    /// Write a single byte.
    fn write_byte(&mut self, byte: u8, flags: WriteFlags) -> Result<(), Self::Error>;

    /// Write a run of bytes as one framed segment.
    ///
    /// The default frames the run with [`frame_bytes`]. An empty run writes
    /// nothing.
    fn write_bytes(&mut self, bytes: &[u8], flags: WriteFlags) -> Result<(), Self::Error> {
        frame_bytes(self, bytes, flags)
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    type Error = T::Error;

    #[inline]
    fn write_byte(&mut self, byte: u8, flags: WriteFlags) -> Result<(), Self::Error> {
        (**self).write_byte(byte, flags)
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8], flags: WriteFlags) -> Result<(), Self::Error> {
        (**self).write_bytes(bytes, flags)
    }
}

/// Split `flags` over a run of bytes: the first byte keeps the start, the
/// last keeps the stop, and bytes in between carry neither.
pub fn frame_bytes<S>(sink: &mut S, bytes: &[u8], flags: WriteFlags) -> Result<(), S::Error>
where
    S: ByteSink + ?Sized,
{
    match bytes {
        [] => Ok(()),
        [only] => sink.write_byte(*only, flags),
        [first, body @ .., last] => {
            sink.write_byte(*first, flags.head())?;
            for &byte in body {
                sink.write_byte(byte, flags.body())?;
            }
            sink.write_byte(*last, flags.tail())
        }
    }
}

/// The prefix of `text` up to (not including) the first NUL byte.
pub fn until_nul(text: &[u8]) -> &[u8] {
    match text.iter().position(|&b| b == 0) {
        Some(end) => &text[..end],
        None => text,
    }
}

/// Formatted output on top of any [`ByteSink`].
pub trait Print: ByteSink {
    /// Print one byte as a single-byte transaction.
    fn print_char(&mut self, c: u8) -> Result<(), Self::Error> {
        self.write_byte(c, WriteFlags::SINGLE)
    }

    /// Print `text` up to its first NUL byte (or its end).
    fn print<T>(&mut self, text: &T) -> Result<(), Self::Error>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        self.write_bytes(until_nul(text.as_ref()), WriteFlags::TRANSACTION)
    }

    /// Print exactly the first `n` bytes of `text`, NULs included.
    fn print_n<T>(&mut self, text: &T, n: usize) -> Result<(), Self::Error>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let text = text.as_ref();
        self.write_bytes(&text[..n.min(text.len())], WriteFlags::TRANSACTION)
    }

    /// Print `text` followed by `"\r\n"` in one transaction.
    fn println<T>(&mut self, text: &T) -> Result<(), Self::Error>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        self.write_bytes(until_nul(text.as_ref()), WriteFlags::BEGIN)?;
        self.write_bytes(b"\r\n", WriteFlags::END)
    }

    /// Print a signed integer in the given radix.
    fn print_int(&mut self, value: i32, radix: Radix) -> Result<(), Self::Error> {
        number::print_number(self, value as u32, radix, true, false, WriteFlags::TRANSACTION)
    }

    /// Print an unsigned integer in the given radix.
    fn print_uint(&mut self, value: u32, radix: Radix) -> Result<(), Self::Error> {
        number::print_number(self, value, radix, false, false, WriteFlags::TRANSACTION)
    }

    /// Print a float with four fractional digits.
    fn print_float(&mut self, value: f32) -> Result<(), Self::Error> {
        number::print_float(self, value, WriteFlags::TRANSACTION)
    }

    /// Print a format string, see [`Arg`] for the accepted specifiers.
    ///
    /// The whole output is a single transaction. Emission stops at the first
    /// error, which is returned.
    fn printf(&mut self, format: &str, args: &[Arg<'_>]) -> Result<(), Self::Error> {
        format::printf(self, format.as_bytes(), args)
    }
}

impl<T: ByteSink + ?Sized> Print for T {}

/// `core::fmt::Write` adapter over a [`ByteSink`].
///
/// Every `write_str` is a complete transaction and `\n` is expanded to
/// `\r\n`. Meant for line-oriented transports such as a UART console.
pub struct SinkWriter<'a, S: ByteSink + ?Sized>(pub &'a mut S);

impl<S: ByteSink + ?Sized> fmt::Write for SinkWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for line in s.as_bytes().split_inclusive(|&b| b == b'\n') {
            match line.split_last() {
                Some((b'\n', text)) => {
                    self.0
                        .write_bytes(text, WriteFlags::BEGIN)
                        .map_err(|_| fmt::Error)?;
                    self.0
                        .write_bytes(b"\r\n", WriteFlags::END)
                        .map_err(|_| fmt::Error)?;
                }
                _ => self
                    .0
                    .write_bytes(line, WriteFlags::TRANSACTION)
                    .map_err(|_| fmt::Error)?,
            }
        }
        Ok(())
    }
}

/// Call [`Print::printf`] with native values converted into [`Arg`]s.
///
/// ```no_run
/// # use tiva_drivers::print::ByteSink;
/// # fn demo<S: ByteSink>(port: &mut S) -> Result<(), S::Error> {
/// tiva_drivers::printf!(port, "%s=%ux (%d)\r\n", "reg", 0x2Au32, -3)?;
/// # Ok(()) }
/// ```
#[macro_export]
macro_rules! printf {
    ($sink:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::print::Print::printf(
            $sink,
            $format,
            &[$($crate::print::Arg::from($arg)),*],
        )
    };
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::vec::Vec;

    /// Sink that records every byte with its flags.
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub writes: Vec<(u8, WriteFlags)>,
        /// Fail the write with this index (0-based).
        pub fail_at: Option<usize>,
    }

    #[derive(Debug, PartialEq)]
    pub(crate) enum RecorderError {
        Refused,
        Format(FormatError),
    }

    impl From<FormatError> for RecorderError {
        fn from(e: FormatError) -> Self {
            RecorderError::Format(e)
        }
    }

    impl Recorder {
        pub fn failing_at(index: usize) -> Self {
            Self {
                writes: Vec::new(),
                fail_at: Some(index),
            }
        }

        pub fn bytes(&self) -> Vec<u8> {
            self.writes.iter().map(|&(b, _)| b).collect()
        }

        pub fn flags(&self) -> Vec<WriteFlags> {
            self.writes.iter().map(|&(_, f)| f).collect()
        }

        pub fn text(&self) -> std::string::String {
            std::string::String::from_utf8(self.bytes()).unwrap()
        }
    }

    impl ByteSink for Recorder {
        type Error = RecorderError;

        fn write_byte(&mut self, byte: u8, flags: WriteFlags) -> Result<(), RecorderError> {
            if self.fail_at == Some(self.writes.len()) {
                return Err(RecorderError::Refused);
            }
            self.writes.push((byte, flags));
            Ok(())
        }
    }

    /// Exactly one START at the first byte and one STOP at the last.
    pub(crate) fn assert_single_transaction(flags: &[WriteFlags]) {
        assert!(!flags.is_empty());
        for (i, f) in flags.iter().enumerate() {
            assert!(f.is_multiple(), "byte {i} not in multi-byte mode: {f:?}");
            assert!(f.contains(WriteFlags::ENABLE), "byte {i} not enabled");
            assert_eq!(f.contains(WriteFlags::START), i == 0, "start at byte {i}");
            assert_eq!(
                f.contains(WriteFlags::STOP),
                i == flags.len() - 1,
                "stop at byte {i}"
            );
        }
    }

    #[test]
    fn flag_constants_match_control_codes() {
        assert_eq!(WriteFlags::TRANSACTION.bits(), 0x17);
        assert_eq!(WriteFlags::BEGIN.bits(), 0x13);
        assert_eq!(WriteFlags::END.bits(), 0x15);
        assert_eq!(WriteFlags::CONTINUE.bits(), 0x11);
        assert_eq!((WriteFlags::BEGIN & WriteFlags::CONTROL).bits(), 0x03);
        assert!(!WriteFlags::SINGLE.is_multiple());
    }

    #[test]
    fn print_char_is_single_byte_mode() {
        let mut sink = Recorder::default();
        sink.print_char(b'A').unwrap();
        assert_eq!(sink.writes, [(b'A', WriteFlags::SINGLE)]);
    }

    #[test]
    fn print_frames_whole_string() {
        let mut sink = Recorder::default();
        sink.print("hello").unwrap();
        assert_eq!(sink.text(), "hello");
        assert_single_transaction(&sink.flags());
    }

    #[test]
    fn print_single_byte_string_keeps_start_and_stop() {
        let mut sink = Recorder::default();
        sink.print("x").unwrap();
        assert_eq!(sink.writes, [(b'x', WriteFlags::TRANSACTION)]);
    }

    #[test]
    fn print_stops_at_nul() {
        let mut sink = Recorder::default();
        sink.print(b"ab\0cd").unwrap();
        assert_eq!(sink.text(), "ab");
    }

    #[test]
    fn print_n_writes_exact_count_including_nul() {
        let mut sink = Recorder::default();
        sink.print_n(b"a\0bcdef", 4).unwrap();
        assert_eq!(sink.bytes(), b"a\0bc");
        assert_single_transaction(&sink.flags());

        let mut short = Recorder::default();
        short.print_n("ab", 10).unwrap();
        assert_eq!(short.text(), "ab");
    }

    #[test]
    fn println_is_one_transaction() {
        let mut sink = Recorder::default();
        sink.println("ok").unwrap();
        assert_eq!(sink.text(), "ok\r\n");
        assert_single_transaction(&sink.flags());
    }

    #[test]
    fn error_aborts_remaining_bytes() {
        let mut sink = Recorder::failing_at(2);
        assert_eq!(sink.print("hello"), Err(RecorderError::Refused));
        assert_eq!(sink.text(), "he");
    }

    #[test]
    fn sink_writer_expands_newlines() {
        use core::fmt::Write;

        let mut sink = Recorder::default();
        write!(SinkWriter(&mut sink), "a={}\nb", 1).unwrap();
        assert_eq!(sink.text(), "a=1\r\nb");
    }

    #[test]
    fn printf_macro_converts_arguments() {
        let mut sink = Recorder::default();
        crate::printf!(&mut sink, "%s:%d:%c", "n", -7, b'z').unwrap();
        assert_eq!(sink.text(), "n:-7:z");
        assert_single_transaction(&sink.flags());
    }
}
