use crate::actuator::Actuator;
use crate::debounce::{Debouncer, SwitchLevel};
use crate::hardware::{Button, EdgeTrigger, Isolator, Led, Relay};
use crate::indicator::{self, Blink};
use crate::timing::Timing;
use embedded_hal::delay::DelayNs;

/// Everything one footswitch session touches: the switch, the actuator, the
/// delay source and the timing set.
///
/// Exactly one logic path owns the pedal at a time (configurator, then one
/// execution driver), so no locking is involved.
pub struct Pedal<B, L, R, I, D> {
    switch: B,
    actuator: Actuator<L, R, I>,
    delay: D,
    debouncer: Debouncer,
    timing: Timing,
}

impl<B, L, R, I, D> Pedal<B, L, R, I, D>
where
    B: Button,
    L: Led,
    R: Relay,
    I: Isolator,
    D: DelayNs,
{
    pub fn new(switch: B, led: L, relay: R, isolator: I, delay: D, timing: Timing) -> Self {
        Self {
            switch,
            actuator: Actuator::new(
                led,
                relay,
                isolator,
                timing.isolator_settle_ms,
                timing.relay_actuation_ms,
            ),
            delay,
            debouncer: Debouncer::new(timing.debounce_ms),
            timing,
        }
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Raw, unfiltered level.
    pub fn level(&mut self) -> SwitchLevel {
        SwitchLevel::sample(&mut self.switch)
    }

    pub fn is_pressed(&mut self) -> bool {
        self.level() == SwitchLevel::Pressed
    }

    pub fn settle(&mut self) {
        self.debouncer.settle(&mut self.delay);
    }

    /// Debounced level, `None` when the line moved during the settle time.
    pub fn confirm(&mut self) -> Option<SwitchLevel> {
        self.debouncer.confirm(&mut self.switch, &mut self.delay)
    }

    pub fn actuate(&mut self) {
        debug!("actuate");
        self.actuator.actuate(&mut self.delay);
    }

    pub fn flash(&mut self, blink: Blink, times: u8) {
        let half_period_ms = match blink {
            Blink::Short => self.timing.blink_short_ms,
            Blink::Long => self.timing.blink_long_ms,
        };
        indicator::flash(self.actuator.led(), &mut self.delay, half_period_ms, times);
    }

    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Blocks until the switch reads released. Not bounded.
    pub fn wait_for_release(&mut self) {
        while self.is_pressed() {
            self.delay.delay_ms(self.timing.release_poll_ms);
        }
    }
}

impl<B: EdgeTrigger, L, R, I, D> Pedal<B, L, R, I, D> {
    /// Suspends until the footswitch line changes.
    pub async fn wait_for_change(&mut self) {
        self.switch.wait_for_change().await;
    }
}
