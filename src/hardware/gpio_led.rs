use super::traits::Led;
use embedded_hal::digital::StatefulOutputPin;

/// Status LED, lit while the line is high.
pub struct GpioLed<P> {
    pin: P,
}

impl<P> GpioLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: StatefulOutputPin> Led for GpioLed<P> {
    fn on(&mut self) {
        if self.pin.set_high().is_err() {
            warn!("indicator write failed");
        }
    }

    fn off(&mut self) {
        if self.pin.set_low().is_err() {
            warn!("indicator write failed");
        }
    }

    fn toggle(&mut self) {
        if self.pin.toggle().is_err() {
            warn!("indicator write failed");
        }
    }
}
