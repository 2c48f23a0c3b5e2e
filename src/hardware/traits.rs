pub trait Led {
    fn on(&mut self);
    fn off(&mut self);
    fn toggle(&mut self);
}

pub trait Button {
    fn is_pressed(&mut self) -> bool;
}

/// Latching relay coil driver. Every call flips the contacts.
pub trait Relay {
    fn toggle(&mut self);
}

/// Optocoupler that mutes the signal path while the relay moves.
pub trait Isolator {
    fn energize(&mut self);
    fn de_energize(&mut self);
}

/// Change-of-state trigger on the footswitch line.
#[allow(async_fn_in_trait)]
pub trait EdgeTrigger {
    /// Resolves on the next rising or falling edge.
    async fn wait_for_change(&mut self);
}
