//! Pin multiplexing for the peripheral drivers.

use super::sysctl;
use crate::hal::mmio::Mmio;
use crate::hw::tm4c1294::gpio::{AFSEL, AMSEL, DEN, DIR, ODR, PCTL, Port, pctl_shift};
use crate::hw::tm4c1294::sysctl::Family;

fn pin_mask(pins: &[u8]) -> u32 {
    pins.iter().fold(0, |mask, &pin| mask | 1 << pin)
}

/// Route `pins` of `port` to alternate function `function`.
///
/// Powers the port, selects the alternate function with its PCTL mux
/// value, disables analog mode and enables the digital buffers. Pins in
/// `open_drain` are switched to open-drain output. Running this again
/// leaves the port in the same state.
pub fn route_pins<M: Mmio>(mmio: &M, port: Port, pins: &[u8], open_drain: &[u8], function: u32) {
    sysctl::enable_clock(mmio, Family::Gpio, port.index());

    let base = port.base();
    let mask = pin_mask(pins);

    mmio.clear_bits(base + DIR, mask);
    mmio.set_bits(base + AFSEL, mask);
    mmio.clear_bits(base + AMSEL, mask);
    if !open_drain.is_empty() {
        mmio.set_bits(base + ODR, pin_mask(open_drain));
    }
    for &pin in pins {
        let shift = pctl_shift(pin);
        mmio.write_field(base + PCTL, 0xF << shift, function << shift);
    }
    mmio.set_bits(base + DEN, mask);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::tm4c1294::sysctl::RCGCGPIO;
    use crate::testing::MockMmio;

    #[test]
    fn routes_pins_to_function() {
        let mmio = MockMmio::new();
        let base = Port::K.base();
        mmio.poke(base + PCTL, 0x0F00_00FF);
        mmio.poke(base + AMSEL, 0xFF);
        mmio.poke(base + DIR, 0xFF);

        route_pins(&mmio, Port::K, &[6, 7], &[7], 2);

        assert_eq!(mmio.peek(RCGCGPIO), 1 << 9);
        assert_eq!(mmio.peek(base + AFSEL), 0xC0);
        assert_eq!(mmio.peek(base + AMSEL), 0x3F);
        assert_eq!(mmio.peek(base + DIR), 0x3F);
        assert_eq!(mmio.peek(base + ODR), 0x80);
        assert_eq!(mmio.peek(base + DEN), 0xC0);
        assert_eq!(mmio.peek(base + PCTL), 0x2200_00FF);
    }
}
