//! I2C master/slave register map.

use super::UNIT_STRIDE;
use super::gpio::Port;

pub const I2C_COUNT: u8 = 10;

/// Base address of each I2C instance. The ten modules are split across
/// three apertures, each with the usual 4 KiB stride.
pub const BASES: [usize; I2C_COUNT as usize] = [
    0x4002_0000,
    0x4002_0000 + UNIT_STRIDE,
    0x4002_0000 + 2 * UNIT_STRIDE,
    0x4002_0000 + 3 * UNIT_STRIDE,
    0x400C_0000,
    0x400C_0000 + UNIT_STRIDE,
    0x400C_0000 + 2 * UNIT_STRIDE,
    0x400C_0000 + 3 * UNIT_STRIDE,
    0x400B_8000,
    0x400B_8000 + UNIT_STRIDE,
];

// Master register offsets
pub const MSA: usize = 0x000;
pub const MCS: usize = 0x004;
pub const MDR: usize = 0x008;
pub const MTPR: usize = 0x00C;
pub const MCR: usize = 0x020;

// MCS read (status) bits
pub const MCS_BUSY: u32 = 1 << 0;
pub const MCS_ERROR: u32 = 1 << 1;
pub const MCS_ADRACK: u32 = 1 << 2;
pub const MCS_DATACK: u32 = 1 << 3;
pub const MCS_ARBLST: u32 = 1 << 4;
pub const MCS_BUSBSY: u32 = 1 << 6;

// MCS write (control) bits
pub const MCS_RUN: u32 = 1 << 0;
pub const MCS_START: u32 = 1 << 1;
pub const MCS_STOP: u32 = 1 << 2;
pub const MCS_ACK: u32 = 1 << 3;

/// Continue transmitting/receiving: 0x01.
pub const CMD_CONTINUE: u32 = MCS_RUN;
/// Start and hold the bus: 0x03.
pub const CMD_START: u32 = MCS_START | MCS_RUN;
/// Stop without transferring data: 0x04.
pub const CMD_STOP: u32 = MCS_STOP;
/// Transfer the last byte and stop: 0x05.
pub const CMD_FINISH: u32 = MCS_STOP | MCS_RUN;
/// Complete single-byte transaction: 0x07.
pub const CMD_SINGLE: u32 = MCS_START | MCS_STOP | MCS_RUN;
/// Receive next byte and acknowledge it: 0x09.
pub const CMD_RECEIVE_ACK: u32 = MCS_ACK | MCS_RUN;
/// Start a burst receive, acknowledging each byte: 0x0B.
pub const CMD_START_RECEIVE_ACK: u32 = MCS_ACK | MCS_START | MCS_RUN;

/// MSA receive (read) direction bit.
pub const MSA_RS: u32 = 1 << 0;

// Master Configuration (MCR)
pub const MCR_MFE: u32 = 1 << 4;
pub const MCR_SFE: u32 = 1 << 5;

// Master Timer Period (MTPR)
pub const MTPR_TPR: u32 = 0x7F;
pub const MTPR_HS: u32 = 1 << 7;

/// Standard-mode clock multiplier: SCL_PERIOD = 2 × (1 + TPR) × (6 + 4).
pub const SCL_TIMER_FACTOR: u32 = 20;

/// PCTL function number routing I2C SCL/SDA to the pins.
pub const PIN_MUX: u32 = 0x2;

/// GPIO port carrying each module's SCL/SDA pair.
pub const PORTS: [Port; I2C_COUNT as usize] = [
    Port::B,
    Port::G,
    Port::L,
    Port::K,
    Port::K,
    Port::B,
    Port::A,
    Port::A,
    Port::A,
    Port::A,
];

/// SCL pin number within [`PORTS`].
pub const SCL_PINS: [u8; I2C_COUNT as usize] = [2, 0, 1, 4, 6, 0, 6, 4, 2, 0];

/// SDA pin number within [`PORTS`]. I2C2 is the only module with SDA below
/// SCL.
pub const SDA_PINS: [u8; I2C_COUNT as usize] = [3, 1, 0, 5, 7, 1, 7, 5, 3, 1];
