use super::traits::{Isolator, Relay};
use embedded_hal::digital::{OutputPin, StatefulOutputPin};

/// Relay coil driver. The line level is the relay position.
pub struct GpioRelay<P> {
    pin: P,
}

impl<P> GpioRelay<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: StatefulOutputPin> Relay for GpioRelay<P> {
    fn toggle(&mut self) {
        if self.pin.toggle().is_err() {
            warn!("relay write failed");
        }
    }
}

/// Optocoupler LED drive, conducting while the line is high.
pub struct GpioIsolator<P> {
    pin: P,
}

impl<P> GpioIsolator<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: OutputPin> Isolator for GpioIsolator<P> {
    fn energize(&mut self) {
        if self.pin.set_high().is_err() {
            warn!("optocoupler write failed");
        }
    }

    fn de_energize(&mut self) {
        if self.pin.set_low().is_err() {
            warn!("optocoupler write failed");
        }
    }
}
