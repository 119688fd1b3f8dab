//! The `printf` mini-language.
//!
//! | spec          | argument                  | output                          |
//! |---------------|---------------------------|---------------------------------|
//! | `%d %x %b`    | `Int`, `Uint`, `Char`     | signed decimal / hex / binary   |
//! | `%u %ux %ub`  | `Uint`, `Int`, `Char`     | unsigned decimal / hex / binary |
//! | `%s`, `%Ns`   | `Str`                     | up to NUL, or exactly `N` bytes |
//! | `%c`          | `Char`, `Int`, `Uint`     | one byte                        |
//! | `%f`          | `Float`                   | four fractional digits          |
//! | `%%`          | none                      | `%`                             |
//!
//! `#` before the conversion adds a `0x` / `0b` prefix to hex and binary
//! output. A width on anything but `%s` is accepted and ignored.

use core::fmt;

use super::number::{self, Radix};
use super::{ByteSink, WriteFlags, until_nul};

/// A `printf` argument.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Arg<'a> {
    Int(i32),
    Uint(u32),
    Char(u8),
    Str(&'a [u8]),
    Float(f32),
}

impl From<i32> for Arg<'_> {
    fn from(v: i32) -> Self {
        Arg::Int(v)
    }
}

impl From<i16> for Arg<'_> {
    fn from(v: i16) -> Self {
        Arg::Int(v.into())
    }
}

impl From<i8> for Arg<'_> {
    fn from(v: i8) -> Self {
        Arg::Int(v.into())
    }
}

impl From<u32> for Arg<'_> {
    fn from(v: u32) -> Self {
        Arg::Uint(v)
    }
}

impl From<u16> for Arg<'_> {
    fn from(v: u16) -> Self {
        Arg::Uint(v.into())
    }
}

impl From<u8> for Arg<'_> {
    fn from(v: u8) -> Self {
        Arg::Char(v)
    }
}

impl From<f32> for Arg<'_> {
    fn from(v: f32) -> Self {
        Arg::Float(v)
    }
}

impl From<f64> for Arg<'_> {
    fn from(v: f64) -> Self {
        Arg::Float(v as f32)
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(v: &'a [u8]) -> Self {
        Arg::Str(v)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(v: &'a [u8; N]) -> Self {
        Arg::Str(v)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(v: &'a str) -> Self {
        Arg::Str(v.as_bytes())
    }
}

/// Formatting failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// `%` followed by an unrecognized conversion byte.
    UnknownSpecifier(u8),
    /// The format ended inside a specifier.
    Incomplete,
    /// More specifiers than arguments.
    MissingArgument,
    /// The argument does not fit the specifier.
    ArgumentMismatch,
    /// A conversion did not fit its stack buffer.
    Overflow,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownSpecifier(c) if c.is_ascii_graphic() => {
                write!(f, "unknown format specifier '%{}'", *c as char)
            }
            FormatError::UnknownSpecifier(c) => write!(f, "unknown format specifier 0x{c:02X}"),
            FormatError::Incomplete => f.write_str("format ended inside a specifier"),
            FormatError::MissingArgument => f.write_str("missing format argument"),
            FormatError::ArgumentMismatch => f.write_str("argument does not match specifier"),
            FormatError::Overflow => f.write_str("formatted value too long"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Conversion {
    Signed(Radix),
    Unsigned(Radix),
    Str,
    Char,
    Float,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Spec {
    conversion: Conversion,
    alternate: bool,
    width: Option<usize>,
}

/// One unit of output: a literal run, a conversion or a malformed specifier.
#[derive(Debug, PartialEq)]
enum Item<'f> {
    Literal(&'f [u8]),
    Convert(Spec),
    Invalid(FormatError),
}

/// A converted argument, ready to be written.
enum Rendered<'a> {
    Number { value: u32, radix: Radix, signed: bool, prefix: bool },
    Bytes(&'a [u8]),
    Byte(u8),
    Float(f32),
}

/// Split the next item off `format`. `format` must not be empty.
fn next_item(format: &[u8]) -> (Item<'_>, &[u8]) {
    if format[0] != b'%' {
        let end = format
            .iter()
            .position(|&b| b == b'%')
            .unwrap_or(format.len());
        return (Item::Literal(&format[..end]), &format[end..]);
    }

    let mut i = 1;
    let alternate = format.get(i) == Some(&b'#');
    if alternate {
        i += 1;
    }

    let mut width: Option<usize> = None;
    while let Some(d) = format.get(i).filter(|b| b.is_ascii_digit()) {
        let w = width.unwrap_or(0);
        width = Some(w.saturating_mul(10).saturating_add(usize::from(d - b'0')));
        i += 1;
    }

    let Some(&c) = format.get(i) else {
        // A bare trailing '%' is printed as is.
        let item = if i == 1 {
            Item::Literal(&format[..1])
        } else {
            Item::Invalid(FormatError::Incomplete)
        };
        return (item, &[]);
    };

    let conversion = match c {
        b'%' => return (Item::Literal(&format[i..=i]), &format[i + 1..]),
        b'd' => Conversion::Signed(Radix::Decimal),
        b'x' => Conversion::Signed(Radix::Hex),
        b'b' => Conversion::Signed(Radix::Binary),
        b'u' => match format.get(i + 1) {
            Some(b'x') => {
                i += 1;
                Conversion::Unsigned(Radix::Hex)
            }
            Some(b'b') => {
                i += 1;
                Conversion::Unsigned(Radix::Binary)
            }
            _ => Conversion::Unsigned(Radix::Decimal),
        },
        b's' => Conversion::Str,
        b'c' => Conversion::Char,
        b'f' => Conversion::Float,
        other => {
            return (
                Item::Invalid(FormatError::UnknownSpecifier(other)),
                &format[i + 1..],
            );
        }
    };

    let spec = Spec {
        conversion,
        alternate,
        width,
    };
    (Item::Convert(spec), &format[i + 1..])
}

fn render<'a>(spec: Spec, arg: Option<&Arg<'a>>) -> Result<Rendered<'a>, FormatError> {
    let arg = *arg.ok_or(FormatError::MissingArgument)?;
    let number = |radix: Radix, signed: bool| {
        let value = match arg {
            Arg::Int(v) => v as u32,
            Arg::Uint(v) => v,
            Arg::Char(v) => u32::from(v),
            _ => return Err(FormatError::ArgumentMismatch),
        };
        Ok(Rendered::Number {
            value,
            radix,
            signed,
            prefix: spec.alternate && radix != Radix::Decimal,
        })
    };

    match spec.conversion {
        Conversion::Signed(radix) => number(radix, true),
        Conversion::Unsigned(radix) => number(radix, false),
        Conversion::Str => match arg {
            Arg::Str(s) => Ok(Rendered::Bytes(match spec.width {
                Some(n) => &s[..n.min(s.len())],
                None => until_nul(s),
            })),
            _ => Err(FormatError::ArgumentMismatch),
        },
        Conversion::Char => match arg {
            Arg::Char(c) => Ok(Rendered::Byte(c)),
            Arg::Int(v) => Ok(Rendered::Byte(v as u8)),
            Arg::Uint(v) => Ok(Rendered::Byte(v as u8)),
            _ => Err(FormatError::ArgumentMismatch),
        },
        Conversion::Float => match arg {
            Arg::Float(v) => Ok(Rendered::Float(v)),
            _ => Err(FormatError::ArgumentMismatch),
        },
    }
}

/// Flags for one item: start only on the first, stop only on the last.
fn item_flags(first: bool, last: bool) -> WriteFlags {
    let mut flags = WriteFlags::CONTINUE;
    flags.set(WriteFlags::START, first);
    flags.set(WriteFlags::STOP, last);
    flags
}

/// Abort the transaction: a literal `%` closes it, then `err` is returned.
fn abort<S>(sink: &mut S, flags: WriteFlags, err: FormatError) -> Result<(), S::Error>
where
    S: ByteSink + ?Sized,
{
    sink.write_byte(b'%', flags | WriteFlags::STOP)?;
    Err(err.into())
}

pub(super) fn printf<S>(sink: &mut S, format: &[u8], args: &[Arg<'_>]) -> Result<(), S::Error>
where
    S: ByteSink + ?Sized,
{
    let mut args = args.iter();
    let mut rest = format;
    let mut first = true;

    while !rest.is_empty() {
        let (item, tail) = next_item(rest);
        let flags = item_flags(first, tail.is_empty());
        first = false;
        rest = tail;

        match item {
            Item::Literal(text) => sink.write_bytes(text, flags)?,
            Item::Invalid(err) => return abort(sink, flags, err),
            Item::Convert(spec) => match render(spec, args.next()) {
                Ok(Rendered::Number {
                    value,
                    radix,
                    signed,
                    prefix,
                }) => number::print_number(sink, value, radix, signed, prefix, flags)?,
                Ok(Rendered::Bytes(bytes)) => sink.write_bytes(bytes, flags)?,
                Ok(Rendered::Byte(byte)) => sink.write_bytes(&[byte], flags)?,
                Ok(Rendered::Float(value)) => number::print_float(sink, value, flags)?,
                Err(err) => return abort(sink, flags, err),
            },
        }
    }
    Ok(())
}
