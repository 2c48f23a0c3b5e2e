use super::traits::Button;
use embedded_hal::digital::InputPin;

/// Footswitch wired active-low: pressed pulls the line to ground.
pub struct GpioButton<P> {
    pin: P,
}

impl<P> GpioButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> Button for GpioButton<P> {
    fn is_pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(_) => {
                warn!("footswitch read failed, assuming released");
                false
            }
        }
    }
}

#[cfg(feature = "async")]
impl<P: embedded_hal_async::digital::Wait> super::traits::EdgeTrigger for GpioButton<P> {
    async fn wait_for_change(&mut self) {
        if self.pin.wait_for_any_edge().await.is_err() {
            warn!("footswitch edge wait failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock, State, Transaction};

    #[test]
    fn low_line_reads_as_pressed() {
        let expectations = [Transaction::get(State::Low), Transaction::get(State::High)];
        let mut button = GpioButton::new(Mock::new(&expectations));

        assert!(button.is_pressed());
        assert!(!button.is_pressed());

        button.pin.done();
    }

    #[cfg(feature = "async")]
    #[test]
    fn edge_trigger_waits_for_any_edge() {
        use super::super::traits::EdgeTrigger;
        use embedded_hal_mock::eh1::digital::Edge;

        let expectations = [Transaction::wait_for_edge(Edge::Any)];
        let mut button = GpioButton::new(Mock::new(&expectations));

        embassy_futures::block_on(button.wait_for_change());

        button.pin.done();
    }
}
