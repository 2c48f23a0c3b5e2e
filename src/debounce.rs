//! Delay-and-recheck filtering of the footswitch.

use crate::hardware::Button;
use embedded_hal::delay::DelayNs;

/// Logical footswitch position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchLevel {
    Pressed,
    Released,
}

impl SwitchLevel {
    pub fn sample<B: Button>(button: &mut B) -> Self {
        if button.is_pressed() {
            SwitchLevel::Pressed
        } else {
            SwitchLevel::Released
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            SwitchLevel::Pressed => SwitchLevel::Released,
            SwitchLevel::Released => SwitchLevel::Pressed,
        }
    }
}

/// Fixed-duration debounce.
///
/// The filter never re-samples on its own: a level is trusted only when the
/// caller reads the same value before and after [`settle`](Self::settle).
/// A switch that bounces back exactly at the boundary reads as unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    settle_ms: u32,
}

impl Debouncer {
    pub const fn new(settle_ms: u32) -> Self {
        Self { settle_ms }
    }

    /// Busy-waits long enough to outlast contact bounce.
    pub fn settle<D: DelayNs>(&self, delay: &mut D) {
        delay.delay_ms(self.settle_ms);
    }

    /// Samples, settles and samples again. Returns the level only when both
    /// readings agree.
    pub fn confirm<B: Button, D: DelayNs>(
        &self,
        button: &mut B,
        delay: &mut D,
    ) -> Option<SwitchLevel> {
        let before = SwitchLevel::sample(button);
        self.settle(delay);
        let after = SwitchLevel::sample(button);

        if before == after {
            Some(before)
        } else {
            trace!("bounce rejected: {} -> {}", before, after);
            None
        }
    }
}
