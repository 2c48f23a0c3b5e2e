//! Fixed blink patterns on the status LED.

use crate::hardware::Led;
use embedded_hal::delay::DelayNs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Blink {
    Short,
    Long,
}

/// Blinks `times` times with equal on and off phases of `half_period_ms`.
/// The LED is left off.
pub fn flash<L: Led, D: DelayNs>(led: &mut L, delay: &mut D, half_period_ms: u32, times: u8) {
    for _ in 0..times {
        led.on();
        delay.delay_ms(half_period_ms);
        led.off();
        delay.delay_ms(half_period_ms);
    }
}
