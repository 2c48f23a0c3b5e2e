//! Settings ritual run once at power-on.
//!
//! Holding the footswitch while powering up enters configuration:
//! - release within the hold window: toggle momentary/alternate
//! - hold past the long-hold threshold: additionally toggle the power-on
//!   bypass state
//!
//! A hold that outlasts the whole window never sees a release inside it, so
//! only the power-on state flips.

use crate::config::{ConfigStore, Configuration, Setting, Storage};
use crate::error::Error;
use crate::hardware::{Button, Isolator, Led, Relay};
use crate::indicator::Blink;
use crate::pedal::Pedal;
use embedded_hal::delay::DelayNs;

const ACKNOWLEDGE_BLINKS: u8 = 3;
const LONG_HOLD_BLINKS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Switch not held at power-on.
    Untouched,
    /// Held, but the press did not survive the debounce.
    Bounced,
    /// Released after `held` samples, momentary flipped.
    ModeToggled { held: u16 },
    /// Long hold, power-on state flipped. `momentary_toggled` is false when
    /// the hold outlasted the whole window.
    DefaultToggled { held: u16, momentary_toggled: bool },
}

/// Runs the power-on configuration and updates `config` and the store
/// together. Must complete before any execution driver starts.
///
/// A failed commit does not cut the ritual short: `config` still carries both
/// flips and the switch is released before the first error is returned.
pub fn configure<B, L, R, I, D, S>(
    pedal: &mut Pedal<B, L, R, I, D>,
    store: &mut ConfigStore<S>,
    config: &mut Configuration,
) -> Result<Outcome, Error<S::Error>>
where
    B: Button,
    L: Led,
    R: Relay,
    I: Isolator,
    D: DelayNs,
    S: Storage,
{
    if !pedal.is_pressed() {
        return Ok(Outcome::Untouched);
    }

    pedal.settle();
    if !pedal.is_pressed() {
        debug!("power-on press bounced");
        pedal.settle();
        return Ok(Outcome::Bounced);
    }

    info!("configuration mode");
    pedal.flash(Blink::Short, ACKNOWLEDGE_BLINKS);

    // The first storage failure is kept and reported once the ritual is over,
    // so the release guard still runs before the driver takes the switch.
    let mut failure = None;
    let timing = *pedal.timing();
    let mut held = 0;
    let mut momentary_toggled = false;
    while held < timing.hold_window_samples {
        if !pedal.is_pressed() {
            config.momentary = !config.momentary;
            if let Err(e) = store.commit(Setting::Momentary, config.momentary) {
                failure = failure.or(Some(e));
            }
            momentary_toggled = true;
            break;
        }
        pedal.delay_ms(timing.hold_sample_ms);
        held += 1;
    }
    debug!("held for {} samples", held);

    let outcome = if timing.is_long_hold(held) {
        config.initial_state = !config.initial_state;
        if let Err(e) = store.commit(Setting::InitialState, config.initial_state) {
            failure = failure.or(Some(e));
        }
        pedal.flash(Blink::Long, LONG_HOLD_BLINKS);
        pedal.wait_for_release();
        Outcome::DefaultToggled {
            held,
            momentary_toggled,
        }
    } else {
        Outcome::ModeToggled { held }
    };

    pedal.settle();
    match failure {
        Some(e) => Err(e),
        None => Ok(outcome),
    }
}
