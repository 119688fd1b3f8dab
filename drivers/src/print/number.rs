//! Integer and float conversion for the print engine.

use core::fmt::Write;

use heapless::{String, Vec};

use super::{ByteSink, FormatError, WriteFlags};

/// Output base for integer printing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    /// Uppercase, emitted in whole bytes (`0A`, `1F3C`).
    Hex,
    /// Emitted in whole nibbles (`0101`, `10010000`).
    Binary,
}

impl Radix {
    /// Bits per emitted digit group.
    const fn group_bits(self) -> u32 {
        match self {
            Radix::Decimal => 0,
            Radix::Hex => 8,
            Radix::Binary => 4,
        }
    }

    const fn prefix(self) -> &'static [u8] {
        match self {
            Radix::Decimal => b"",
            Radix::Hex => b"0x",
            Radix::Binary => b"0b",
        }
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Sign, prefix and digits of a 32-bit value never exceed this.
const DIGITS_CAP: usize = 36;

/// Print `value` as one framed segment.
///
/// With `signed`, `value` is reinterpreted as `i32`; a negative value emits
/// `-` first (its stop deferred) and the two's-complement magnitude after
/// it (its start consumed).
pub(super) fn print_number<S>(
    sink: &mut S,
    value: u32,
    radix: Radix,
    signed: bool,
    prefix: bool,
    flags: WriteFlags,
) -> Result<(), S::Error>
where
    S: ByteSink + ?Sized,
{
    let mut flags = flags;
    let mut magnitude = value;

    if signed && (value as i32) < 0 {
        sink.write_byte(b'-', flags.head())?;
        flags = flags.tail();
        magnitude = value.wrapping_neg();
    }

    let digits = digits(magnitude, radix, prefix)?;
    sink.write_bytes(&digits, flags)
}

fn digits(value: u32, radix: Radix, prefix: bool) -> Result<Vec<u8, DIGITS_CAP>, FormatError> {
    let mut out = Vec::new();
    if prefix {
        out.extend_from_slice(radix.prefix())
            .map_err(|_| FormatError::Overflow)?;
    }

    match radix {
        Radix::Decimal => {
            let mut text: String<10> = String::new();
            write!(text, "{value}").map_err(|_| FormatError::Overflow)?;
            out.extend_from_slice(text.as_bytes())
                .map_err(|_| FormatError::Overflow)?;
        }
        Radix::Hex | Radix::Binary => {
            let group = radix.group_bits();
            let mask = (1u32 << group) - 1;
            // Most significant non-zero group; zero still gets one group.
            let groups = (u32::BITS - value.leading_zeros()).div_ceil(group).max(1);

            for g in (0..groups).rev() {
                let bits = (value >> (g * group)) & mask;
                match radix {
                    Radix::Hex => {
                        let pair = [HEX_DIGITS[(bits >> 4) as usize], HEX_DIGITS[(bits & 0xF) as usize]];
                        out.extend_from_slice(&pair)
                            .map_err(|_| FormatError::Overflow)?;
                    }
                    _ => {
                        for bit in (0..4).rev() {
                            out.push(b'0' + ((bits >> bit) & 1) as u8)
                                .map_err(|_| FormatError::Overflow)?;
                        }
                    }
                }
            }
        }
    }
    Ok(out)
}

/// Print `value` with four fractional digits as one framed segment.
pub(super) fn print_float<S>(sink: &mut S, value: f32, flags: WriteFlags) -> Result<(), S::Error>
where
    S: ByteSink + ?Sized,
{
    let mut text: String<48> = String::new();
    write!(text, "{value:.4}").map_err(|_| FormatError::Overflow)?;
    sink.write_bytes(text.as_bytes(), flags)
}
