//! Execution strategies feeding the footswitch to the [`ModeMachine`].
//!
//! Both drivers share the debounce, the state machine and the actuator, so
//! the pedal behaves the same whichever one the firmware is built with.

use crate::config::Configuration;
use crate::debounce::SwitchLevel;
use crate::hardware::{Button, EdgeTrigger, Isolator, Led, Relay};
use crate::mode::{ModeMachine, Reaction};
use crate::pedal::Pedal;
use embedded_hal::delay::DelayNs;

/// One way of scheduling switch observations.
#[allow(async_fn_in_trait)]
pub trait ExecutionDriver<B: Button> {
    /// Runs one observation round.
    async fn step<L, R, I, D>(
        &mut self,
        pedal: &mut Pedal<B, L, R, I, D>,
        machine: &mut ModeMachine,
    ) where
        L: Led,
        R: Relay,
        I: Isolator,
        D: DelayNs;
}

/// Hands the pedal to `driver` for the rest of the session.
///
/// `config` is the snapshot left by the power-on configurator; it is not
/// reloaded afterwards.
pub async fn run<X, B, L, R, I, D>(
    mut driver: X,
    mut pedal: Pedal<B, L, R, I, D>,
    config: &Configuration,
) -> !
where
    X: ExecutionDriver<B>,
    B: Button,
    L: Led,
    R: Relay,
    I: Isolator,
    D: DelayNs,
{
    let mut machine = start(&mut pedal, config);
    loop {
        driver.step(&mut pedal, &mut machine).await;
    }
}

/// Builds the session state and brings the relay in line with the stored
/// power-on state.
pub fn start<B, L, R, I, D>(pedal: &mut Pedal<B, L, R, I, D>, config: &Configuration) -> ModeMachine
where
    B: Button,
    L: Led,
    R: Relay,
    I: Isolator,
    D: DelayNs,
{
    let mut machine = ModeMachine::new(config);
    info!("bypass running: {}", config);
    if machine.start() == Reaction::Actuate {
        pedal.actuate();
    }
    machine
}

fn feed<B, L, R, I, D>(
    pedal: &mut Pedal<B, L, R, I, D>,
    machine: &mut ModeMachine,
    level: SwitchLevel,
) where
    B: Button,
    L: Led,
    R: Relay,
    I: Isolator,
    D: DelayNs,
{
    if machine.on_confirmed(level) == Reaction::Actuate {
        trace!("{} confirmed", level);
        pedal.actuate();
    }
}

/// Re-samples the switch continuously. All waiting is busy-wait.
#[derive(Debug, Default)]
pub struct Polling;

impl<B: Button> ExecutionDriver<B> for Polling {
    async fn step<L, R, I, D>(
        &mut self,
        pedal: &mut Pedal<B, L, R, I, D>,
        machine: &mut ModeMachine,
    ) where
        L: Led,
        R: Relay,
        I: Isolator,
        D: DelayNs,
    {
        if let Some(level) = pedal.confirm() {
            feed(pedal, machine, level);
        }
    }
}

/// Sleeps on the edge trigger and runs one debounce-confirm-actuate round per
/// change.
///
/// The wait is skipped while the line differs from the last confirmed level,
/// which stands in for the latched change flag of a pin-change interrupt:
/// edges that land while a round is running are serviced right after it, and
/// the level present at startup is observed without an edge. A round only
/// spins for the fixed debounce and relay times.
#[derive(Debug, Default)]
pub struct Interrupt {
    confirmed: Option<SwitchLevel>,
}

impl Interrupt {
    pub const fn new() -> Self {
        Self { confirmed: None }
    }

    /// Level seen by the last successful round.
    pub fn confirmed(&self) -> Option<SwitchLevel> {
        self.confirmed
    }

    /// Handler body: one round, bounded in time, never re-entered.
    pub fn on_change<B, L, R, I, D>(
        &mut self,
        pedal: &mut Pedal<B, L, R, I, D>,
        machine: &mut ModeMachine,
    ) where
        B: Button,
        L: Led,
        R: Relay,
        I: Isolator,
        D: DelayNs,
    {
        if let Some(level) = pedal.confirm() {
            self.confirmed = Some(level);
            feed(pedal, machine, level);
        }
    }
}

impl<B: Button + EdgeTrigger> ExecutionDriver<B> for Interrupt {
    async fn step<L, R, I, D>(
        &mut self,
        pedal: &mut Pedal<B, L, R, I, D>,
        machine: &mut ModeMachine,
    ) where
        L: Led,
        R: Relay,
        I: Isolator,
        D: DelayNs,
    {
        // An edge between this read and the trigger being armed is not
        // latched on real EXTI hardware. If the line then holds, the change
        // waits for the next edge.
        if self.confirmed == Some(pedal.level()) {
            pedal.wait_for_change().await;
        }
        self.on_change(pedal, machine);
    }
}
