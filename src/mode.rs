//! Interpretation of debounced switch levels under the active mode.

use crate::config::Configuration;
use crate::debounce::SwitchLevel;

/// What the caller has to do after feeding the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reaction {
    Idle,
    Actuate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Mode {
    /// Actuates whenever the confirmed level equals `target`, then waits for
    /// the opposite level.
    Momentary { target: SwitchLevel },
    /// One actuation per press. `armed` is the alternate flag: set on release,
    /// cleared once the press has been acted upon. `release_pending` marks a
    /// press whose actuation is deferred to its release.
    Alternate {
        armed: bool,
        invert_timing: bool,
        release_pending: bool,
    },
}

/// Bypass mode state for one powered session. Never persisted.
///
/// The machine is a pure transition function: it never waits, so both the
/// polling loop and the edge handler drive it the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeMachine {
    mode: Mode,
    initial_state: bool,
}

impl ModeMachine {
    pub fn new(config: &Configuration) -> Self {
        let mode = if config.momentary {
            // Engaged-by-default inverts the polarity: the released switch
            // already matches, so the first observation engages the effect.
            let target = if config.initial_state {
                SwitchLevel::Released
            } else {
                SwitchLevel::Pressed
            };
            Mode::Momentary { target }
        } else {
            Mode::Alternate {
                armed: true,
                invert_timing: config.invert_timing,
                release_pending: false,
            }
        };

        Self {
            mode,
            initial_state: config.initial_state,
        }
    }

    #[cfg(test)]
    fn is_momentary(&self) -> bool {
        matches!(self.mode, Mode::Momentary { .. })
    }

    /// Startup synchronisation of the relay with the stored default.
    ///
    /// Alternate mode needs one forced actuation when the effect should start
    /// engaged. Momentary mode gets there through its first observation.
    pub fn start(&mut self) -> Reaction {
        match self.mode {
            Mode::Alternate { .. } if self.initial_state => Reaction::Actuate,
            _ => Reaction::Idle,
        }
    }

    /// Feeds one debounced level. Repeating the same level is harmless.
    pub fn on_confirmed(&mut self, level: SwitchLevel) -> Reaction {
        match &mut self.mode {
            Mode::Momentary { target } => {
                if level == *target {
                    *target = target.opposite();
                    Reaction::Actuate
                } else {
                    Reaction::Idle
                }
            }
            Mode::Alternate {
                armed,
                invert_timing,
                release_pending,
            } => match level {
                SwitchLevel::Pressed if *armed => {
                    *armed = false;
                    if *invert_timing {
                        *release_pending = true;
                        Reaction::Idle
                    } else {
                        Reaction::Actuate
                    }
                }
                SwitchLevel::Pressed => Reaction::Idle,
                SwitchLevel::Released => {
                    *armed = true;
                    if core::mem::take(release_pending) {
                        Reaction::Actuate
                    } else {
                        Reaction::Idle
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SwitchLevel::{Pressed, Released};

    fn machine(initial_state: bool, momentary: bool, invert_timing: bool) -> ModeMachine {
        ModeMachine::new(&Configuration {
            initial_state,
            momentary,
            invert_timing,
        })
    }

    fn actuations(machine: &mut ModeMachine, levels: &[SwitchLevel]) -> Vec<usize> {
        levels
            .iter()
            .enumerate()
            .filter(|(_, level)| machine.on_confirmed(**level) == Reaction::Actuate)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn momentary_follows_the_switch_level() {
        let mut m = machine(false, true, false);
        assert_eq!(m.start(), Reaction::Idle);

        // Repeated samples of a held switch count once.
        let levels = [Released, Pressed, Pressed, Pressed, Released, Released, Pressed];
        let fired = actuations(&mut m, &levels);

        assert_eq!(fired, [1, 4, 6]);
    }

    #[test]
    fn momentary_engaged_by_default_starts_on_release() {
        let mut m = machine(true, true, false);
        assert_eq!(m.start(), Reaction::Idle);

        let fired = actuations(&mut m, &[Released, Released, Pressed, Released]);

        assert_eq!(fired, [0, 2, 3]);
    }

    #[test]
    fn alternate_actuates_on_press() {
        let mut m = machine(false, false, false);
        assert_eq!(m.start(), Reaction::Idle);

        let fired = actuations(&mut m, &[Released, Pressed, Pressed, Released, Pressed, Released]);

        assert_eq!(fired, [1, 4]);
    }

    #[test]
    fn alternate_inverted_actuates_on_release() {
        let mut m = machine(false, false, true);

        let levels = [Released, Pressed, Pressed, Released, Released, Pressed, Released];
        let fired = actuations(&mut m, &levels);

        assert_eq!(fired, [3, 6]);
    }

    #[test]
    fn alternate_engaged_by_default_forces_one_actuation() {
        let mut m = machine(true, false, false);
        assert_eq!(m.start(), Reaction::Actuate);
        assert_eq!(m.on_confirmed(Released), Reaction::Idle);
        assert_eq!(m.on_confirmed(Pressed), Reaction::Actuate);
    }

    #[test]
    fn alternate_held_at_start_fires_once() {
        // Flag starts set, so a switch already held counts as one press.
        let mut m = machine(false, false, false);

        let fired = actuations(&mut m, &[Pressed, Pressed, Released, Pressed]);

        assert_eq!(fired, [0, 3]);
    }

    #[test]
    fn momentary_ignores_invert_timing() {
        let mut m = machine(false, true, true);
        assert!(m.is_momentary());

        let fired = actuations(&mut m, &[Pressed, Released]);

        assert_eq!(fired, [0, 1]);
    }
}
