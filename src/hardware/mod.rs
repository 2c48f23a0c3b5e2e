//! Pin-level adapters between `embedded-hal` and the controller.

pub mod gpio_button;
pub mod gpio_led;
pub mod gpio_relay;
pub mod traits;

#[cfg(feature = "stm32")]
pub mod flash_storage;

pub use gpio_button::GpioButton;
pub use gpio_led::GpioLed;
pub use gpio_relay::{GpioIsolator, GpioRelay};
pub use traits::{Button, EdgeTrigger, Isolator, Led, Relay};
