//! Virtual-time bench for host tests.
//!
//! A shared clock only moves when the code under test calls `DelayNs`, so
//! scripted switch presses line up with busy-waits exactly.

use crate::config::{Configuration, Setting, Storage};
use crate::hardware::{Button, EdgeTrigger, Isolator, Led, Relay};
use crate::pedal::Pedal;
use crate::timing::Timing;
use embedded_hal::delay::DelayNs;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const NS_PER_MS: u64 = 1_000_000;

pub type SimPedal = Pedal<SimSwitch, SimLed, SimRelay, SimIsolator, SimDelay>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    LedOn,
    LedOff,
    LedToggle,
    RelayToggle,
    IsolatorOn,
    IsolatorOff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub at_ms: u64,
    pub output: Output,
}

#[derive(Clone, Default)]
pub struct Bench {
    clock_ns: Rc<Cell<u64>>,
    events: Rc<RefCell<Vec<Event>>>,
    edges: Rc<RefCell<Vec<u64>>>,
}

impl Bench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock_ns.get() / NS_PER_MS
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay { bench: self.clone() }
    }

    pub fn led(&self) -> SimLed {
        SimLed { bench: self.clone() }
    }

    pub fn relay(&self) -> SimRelay {
        SimRelay { bench: self.clone() }
    }

    pub fn isolator(&self) -> SimIsolator {
        SimIsolator { bench: self.clone() }
    }

    /// Pedal with default timing and a switch pressed during each
    /// `[start, end)` interval, in ms.
    pub fn pedal(&self, pressed: &[(u64, u64)]) -> SimPedal {
        Pedal::new(
            SimSwitch::new(self, pressed),
            self.led(),
            self.relay(),
            self.isolator(),
            self.delay(),
            Timing::default(),
        )
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Times at which the relay moved.
    pub fn actuations(&self) -> Vec<u64> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.output == Output::RelayToggle)
            .map(|e| e.at_ms)
            .collect()
    }

    /// Effect engaged when the relay moved an odd number of times.
    pub fn relay_engaged(&self) -> bool {
        self.actuations().len() % 2 == 1
    }

    /// First scripted switch edge strictly after now.
    pub fn next_edge_ms(&self) -> Option<u64> {
        let now = self.now_ms();
        self.edges.borrow().iter().copied().find(|&edge| edge > now)
    }

    fn record(&self, output: Output) {
        let at_ms = self.now_ms();
        self.events.borrow_mut().push(Event { at_ms, output });
    }
}

pub struct SimDelay {
    bench: Bench,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        let clock = &self.bench.clock_ns;
        clock.set(clock.get() + u64::from(ns));
    }
}

pub struct SimSwitch {
    bench: Bench,
    pressed: Vec<(u64, u64)>,
}

impl SimSwitch {
    pub fn new(bench: &Bench, pressed: &[(u64, u64)]) -> Self {
        let mut edges: Vec<u64> = pressed.iter().flat_map(|&(start, end)| [start, end]).collect();
        edges.sort_unstable();
        edges.dedup();
        *bench.edges.borrow_mut() = edges;

        Self {
            bench: bench.clone(),
            pressed: pressed.to_vec(),
        }
    }
}

impl Button for SimSwitch {
    fn is_pressed(&mut self) -> bool {
        let now = self.bench.now_ms();
        self.pressed.iter().any(|&(start, end)| (start..end).contains(&now))
    }
}

impl EdgeTrigger for SimSwitch {
    async fn wait_for_change(&mut self) {
        let edge = self
            .bench
            .next_edge_ms()
            .expect("waited for an edge after the end of the script");
        self.bench.clock_ns.set(edge * NS_PER_MS);
    }
}

pub struct SimLed {
    bench: Bench,
}

impl Led for SimLed {
    fn on(&mut self) {
        self.bench.record(Output::LedOn);
    }

    fn off(&mut self) {
        self.bench.record(Output::LedOff);
    }

    fn toggle(&mut self) {
        self.bench.record(Output::LedToggle);
    }
}

pub struct SimRelay {
    bench: Bench,
}

impl Relay for SimRelay {
    fn toggle(&mut self) {
        self.bench.record(Output::RelayToggle);
    }
}

pub struct SimIsolator {
    bench: Bench,
}

impl Isolator for SimIsolator {
    fn energize(&mut self) {
        self.bench.record(Output::IsolatorOn);
    }

    fn de_energize(&mut self) {
        self.bench.record(Output::IsolatorOff);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageFault;

/// EEPROM stand-in.
#[derive(Debug, Default, Clone)]
pub struct RamStorage {
    pub cells: [u8; 8],
    pub writes: usize,
    pub failing: bool,
}

impl RamStorage {
    /// Storage already holding `config`, without counting as writes.
    pub fn with(config: Configuration) -> Self {
        let mut storage = Self::default();
        storage.cells[Setting::InitialState.address() as usize] = config.initial_state as u8;
        storage.cells[Setting::Momentary.address() as usize] = config.momentary as u8;
        storage.cells[Setting::InvertTiming.address() as usize] = config.invert_timing as u8;
        storage
    }
}

impl Storage for RamStorage {
    type Error = StorageFault;

    fn read(&mut self, address: u8) -> Result<u8, Self::Error> {
        if self.failing {
            return Err(StorageFault);
        }
        self.cells.get(address as usize).copied().ok_or(StorageFault)
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        if self.failing {
            return Err(StorageFault);
        }
        let cell = self.cells.get_mut(address as usize).ok_or(StorageFault)?;
        *cell = value;
        self.writes += 1;
        Ok(())
    }
}
