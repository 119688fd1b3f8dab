//! Simulated TM4C1294 register file for unit tests.
//!
//! Plain registers behave like memory. On top of that the mock models the
//! handful of side effects the drivers depend on:
//!
//! - SYSCTL peripheral-ready registers mirror their clock gating registers
//! - UART `FR` reports an empty receive FIFO until bytes are queued with
//!   [`MockMmio::queue_uart_rx`]; `DR` reads pop that queue and writes are
//!   captured per unit
//! - I2C master writes to `MSA`/`MDR`/`MCS` are logged as [`I2cEvent`]s;
//!   the controller is never busy, `MCS` reads report the status of the last
//!   command (a fault can be scripted for the n-th command) and `MDR` reads
//!   pop scripted receive data

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::vec::Vec;

use crate::hal::mmio::Mmio;
use crate::hw::tm4c1294::{i2c, sysctl, uart};

/// An I2C master register write.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum I2cEvent {
    /// MSA: `address << 1 | RS`.
    Address(u32),
    /// MDR
    Data(u8),
    /// MCS command.
    Command(u32),
}

#[derive(Default)]
struct State {
    regs: BTreeMap<usize, u32>,
    accesses: usize,
    uart_rx: BTreeMap<usize, VecDeque<u8>>,
    uart_tx: BTreeMap<usize, Vec<u8>>,
    i2c_events: Vec<I2cEvent>,
    i2c_rx: VecDeque<u8>,
    i2c_commands: usize,
    i2c_fault: Option<(usize, u32)>,
    i2c_status: u32,
}

#[derive(Default)]
pub(crate) struct MockMmio {
    state: Mutex<State>,
}

fn block(addr: usize) -> usize {
    addr & !0xFFF
}

fn is_uart(addr: usize) -> bool {
    (uart::base(0)..uart::base(uart::UART_COUNT)).contains(&addr)
}

fn is_i2c(addr: usize) -> bool {
    i2c::BASES.contains(&block(addr))
}

/// Clock gating register mirrored by a peripheral-ready register.
fn ready_mirror(addr: usize) -> Option<usize> {
    [
        sysctl::Family::Timer,
        sysctl::Family::Gpio,
        sysctl::Family::Uart,
        sysctl::Family::I2c,
    ]
    .into_iter()
    .find(|f| f.pr() == addr)
    .map(|f| f.rcgc())
}

impl MockMmio {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    /// Number of register reads and writes so far.
    pub fn accesses(&self) -> usize {
        self.with(|s| s.accesses)
    }

    /// Snapshot of every plain register.
    pub fn registers(&self) -> BTreeMap<usize, u32> {
        self.with(|s| s.regs.clone())
    }

    /// Raw register value, without side effects.
    pub fn peek(&self, addr: usize) -> u32 {
        self.with(|s| s.regs.get(&addr).copied().unwrap_or(0))
    }

    /// Set a register without side effects.
    pub fn poke(&self, addr: usize, value: u32) {
        self.with(|s| {
            s.regs.insert(addr, value);
        })
    }

    pub fn queue_uart_rx(&self, unit: u8, bytes: &[u8]) {
        self.with(|s| {
            s.uart_rx
                .entry(uart::base(unit))
                .or_default()
                .extend(bytes.iter().copied())
        })
    }

    pub fn uart_tx(&self, unit: u8) -> Vec<u8> {
        self.with(|s| s.uart_tx.get(&uart::base(unit)).cloned().unwrap_or_default())
    }

    pub fn queue_i2c_rx(&self, bytes: &[u8]) {
        self.with(|s| s.i2c_rx.extend(bytes.iter().copied()))
    }

    /// Make the `n`-th MCS command (0-based) report `status`.
    pub fn fail_i2c_command(&self, n: usize, status: u32) {
        self.with(|s| s.i2c_fault = Some((n, status)))
    }

    pub fn i2c_events(&self) -> Vec<I2cEvent> {
        self.with(|s| s.i2c_events.clone())
    }

    /// Only the MCS commands, in order.
    pub fn i2c_commands(&self) -> Vec<u32> {
        self.i2c_events()
            .into_iter()
            .filter_map(|e| match e {
                I2cEvent::Command(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    /// Only the MDR writes, in order.
    pub fn i2c_data(&self) -> Vec<u8> {
        self.i2c_events()
            .into_iter()
            .filter_map(|e| match e {
                I2cEvent::Data(d) => Some(d),
                _ => None,
            })
            .collect()
    }
}

impl Mmio for MockMmio {
    fn read(&self, addr: usize) -> u32 {
        self.with(|s| {
            s.accesses += 1;
            if let Some(rcgc) = ready_mirror(addr) {
                return s.regs.get(&rcgc).copied().unwrap_or(0);
            }
            if is_uart(addr) {
                let rx = s.uart_rx.entry(block(addr)).or_default();
                match addr - block(addr) {
                    uart::FR if rx.is_empty() => return uart::FR_RXFE,
                    uart::FR => return 0,
                    uart::DR => return rx.pop_front().map(u32::from).unwrap_or(0),
                    _ => {}
                }
            }
            if is_i2c(addr) {
                match addr - block(addr) {
                    i2c::MCS => return s.i2c_status,
                    i2c::MDR => return s.i2c_rx.pop_front().map(u32::from).unwrap_or(0),
                    _ => {}
                }
            }
            s.regs.get(&addr).copied().unwrap_or(0)
        })
    }

    fn write(&self, addr: usize, value: u32) {
        self.with(|s| {
            s.accesses += 1;
            if is_uart(addr) && addr - block(addr) == uart::DR {
                s.uart_tx
                    .entry(block(addr))
                    .or_default()
                    .push((value & uart::DR_DATA) as u8);
                return;
            }
            if is_i2c(addr) {
                match addr - block(addr) {
                    i2c::MSA => s.i2c_events.push(I2cEvent::Address(value)),
                    i2c::MDR => s.i2c_events.push(I2cEvent::Data(value as u8)),
                    i2c::MCS => {
                        s.i2c_events.push(I2cEvent::Command(value));
                        s.i2c_status = match s.i2c_fault {
                            Some((n, status)) if n == s.i2c_commands => status,
                            _ => 0,
                        };
                        s.i2c_commands += 1;
                        return;
                    }
                    _ => {}
                }
            }
            s.regs.insert(addr, value);
        })
    }
}
