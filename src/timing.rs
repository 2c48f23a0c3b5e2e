//! Fixed timings of the controller, all in milliseconds.

/// Wait that outlasts mechanical contact bounce.
pub const DEBOUNCE_MS: u32 = 5;
/// Optocoupler rise time before the relay may move (TLP225A: 2 ms).
pub const ISOLATOR_SETTLE_MS: u32 = 3;
/// Relay operate time (AZ850: 2 ms).
pub const RELAY_ACTUATION_MS: u32 = 3;
/// Sample period of the power-on hold window.
pub const HOLD_SAMPLE_MS: u32 = 10;
/// Length of the power-on hold window in samples (~3 s).
pub const HOLD_WINDOW_SAMPLES: u16 = 300;
/// A hold must last strictly more samples than this to count as long.
pub const LONG_HOLD_SAMPLES: u16 = 275;
pub const BLINK_SHORT_MS: u32 = 50;
pub const BLINK_LONG_MS: u32 = 150;
/// Poll period while blocking until the switch is let go.
pub const RELEASE_POLL_MS: u32 = 1;

/// Timing set used by the [`Pedal`](crate::Pedal).
///
/// `Default` gives the values tuned for the TLP225A/AZ850 pair; tests shrink
/// or stretch them freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub debounce_ms: u32,
    pub isolator_settle_ms: u32,
    pub relay_actuation_ms: u32,
    pub hold_sample_ms: u32,
    pub hold_window_samples: u16,
    pub long_hold_samples: u16,
    pub blink_short_ms: u32,
    pub blink_long_ms: u32,
    pub release_poll_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            isolator_settle_ms: ISOLATOR_SETTLE_MS,
            relay_actuation_ms: RELAY_ACTUATION_MS,
            hold_sample_ms: HOLD_SAMPLE_MS,
            hold_window_samples: HOLD_WINDOW_SAMPLES,
            long_hold_samples: LONG_HOLD_SAMPLES,
            blink_short_ms: BLINK_SHORT_MS,
            blink_long_ms: BLINK_LONG_MS,
            release_poll_ms: RELEASE_POLL_MS,
        }
    }
}

impl Timing {
    /// Whether a hold that ended after `held` samples selects the long-hold
    /// path.
    pub fn is_long_hold(&self, held: u16) -> bool {
        held > self.long_hold_samples
    }
}
