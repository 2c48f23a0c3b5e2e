//! Relay sequence that moves the effect in or out of the signal path.

use crate::hardware::{Isolator, Led, Relay};
use embedded_hal::delay::DelayNs;

/// Relay, optocoupler and status LED, switched together.
///
/// The bypass position is never stored: it is whatever the relay was left
/// at by the toggles since power-on.
pub struct Actuator<L, R, I> {
    led: L,
    relay: R,
    isolator: I,
    isolator_settle_ms: u32,
    relay_actuation_ms: u32,
}

impl<L, R, I> Actuator<L, R, I>
where
    L: Led,
    R: Relay,
    I: Isolator,
{
    pub fn new(
        led: L,
        relay: R,
        isolator: I,
        isolator_settle_ms: u32,
        relay_actuation_ms: u32,
    ) -> Self {
        Self {
            led,
            relay,
            isolator,
            isolator_settle_ms,
            relay_actuation_ms,
        }
    }

    /// Flips the bypass state.
    ///
    /// The relay only moves while the optocoupler mutes the path, which keeps
    /// the switching pop out of the audio.
    pub fn actuate<D: DelayNs>(&mut self, delay: &mut D) {
        self.isolator.energize();
        delay.delay_ms(self.isolator_settle_ms);

        self.led.toggle();
        self.relay.toggle();
        delay.delay_ms(self.relay_actuation_ms);

        self.isolator.de_energize();
    }

    pub fn led(&mut self) -> &mut L {
        &mut self.led
    }
}
