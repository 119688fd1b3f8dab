//! UART register map.

use super::UNIT_STRIDE;
use super::gpio::Port;

pub const UART_BASE: usize = 0x4000_C000;
pub const UART_COUNT: u8 = 8;

// Register offsets
pub const DR: usize = 0x000;
pub const FR: usize = 0x018;
pub const IBRD: usize = 0x024;
pub const FBRD: usize = 0x028;
pub const LCRH: usize = 0x02C;
pub const CTL: usize = 0x030;
pub const CC: usize = 0xFC8;

// Flag Register (FR) bits
pub const FR_BUSY: u32 = 1 << 3;
pub const FR_RXFE: u32 = 1 << 4;
pub const FR_TXFF: u32 = 1 << 5;

// Control Register (CTL) bits
pub const CTL_UARTEN: u32 = 1 << 0;
pub const CTL_TXE: u32 = 1 << 8;
pub const CTL_RXE: u32 = 1 << 9;

// Line Control Register (LCRH): 8 data bits, FIFO disabled (1-byte holding
// register), 1 stop bit, no parity.
pub const LCRH_WLEN_8: u32 = 0b11 << 5;

/// Clock Configuration: baud clock from PIOSC.
pub const CC_CS_PIOSC: u32 = 0x5;

/// PCTL function number routing U*Rx/U*Tx to the pins.
pub const PIN_MUX: u32 = 0x1;

/// Data register receive byte.
pub const DR_DATA: u32 = 0xFF;

/// GPIO port carrying each UART's Rx/Tx pair.
pub const PORTS: [Port; UART_COUNT as usize] = [
    Port::A,
    Port::B,
    Port::A,
    Port::A,
    Port::A,
    Port::C,
    Port::P,
    Port::C,
];

/// Rx pin number within [`PORTS`]; Tx is the next pin.
pub const RX_PINS: [u8; UART_COUNT as usize] = [0, 0, 6, 4, 2, 6, 0, 4];

/// Base address of UART `unit`. The caller validates `unit`.
pub const fn base(unit: u8) -> usize {
    UART_BASE + (unit as usize) * UNIT_STRIDE
}
