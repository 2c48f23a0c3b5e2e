//! STM32F103 Blue Pill True Bypass Footswitch
//! =============================================================================================
//!
//! Date			Author          Notes
//! 16/10/2026	    TBP             Initial release
//!
//!==============================================================================================
//!
//! One footswitch puts an external effect in or out of the audio path through
//! a relay. An optocoupler mutes the path while the relay moves.
//!
//! Hardware Connections:
//!   Relay coil driver   -> PA1
//!   Optocoupler LED     -> PA2
//!   Footswitch          -> PA3 (to GND when pressed, pull-up enabled)
//!   Status LED          -> PA5
//!
//! Settings live in the last flash page and can only be changed at power-on:
//! 1. Hold the footswitch while powering up, the LED blinks three times
//! 2. Release within ~2.75 s to swap momentary/alternate operation
//! 3. Keep holding past ~2.75 s to also swap the power-on bypass state
//!    (two long blinks, then let go)
//!
//! Build with `--features interrupt` for the EXTI-driven variant, the default
//! build polls the footswitch.

#![no_std]
#![no_main]

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_stm32::{
    exti::ExtiInput,
    flash::Flash,
    gpio::{Level, Output, Pull, Speed},
};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use true_bypass::{
    ConfigStore, Configuration, Pedal, Timing, driver,
    hardware::{GpioButton, GpioIsolator, GpioLed, GpioRelay, flash_storage::FlashStorage},
    power_on,
};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());
    info!("true bypass starting");

    // All outputs start low: relay in bypass, optocoupler and LED off.
    let relay = GpioRelay::new(Output::new(p.PA1, Level::Low, Speed::Low));
    let isolator = GpioIsolator::new(Output::new(p.PA2, Level::Low, Speed::Low));
    let led = GpioLed::new(Output::new(p.PA5, Level::Low, Speed::Low));

    // The EXTI line stays unarmed until the interrupt driver first waits on
    // it, i.e. after the power-on configuration is done.
    let footswitch = GpioButton::new(ExtiInput::new(p.PA3, p.EXTI3, Pull::Up));

    let mut pedal = Pedal::new(footswitch, led, relay, isolator, Delay, Timing::default());
    let mut store = ConfigStore::new(FlashStorage::new(Flash::new_blocking(p.FLASH)));

    let mut config = store.load().unwrap_or_else(|e| {
        warn!("settings unreadable ({}), using defaults", e);
        Configuration::default()
    });

    match power_on::configure(&mut pedal, &mut store, &mut config) {
        Ok(outcome) => info!("power-on: {}", outcome),
        Err(e) => error!("saving settings failed: {}", e),
    }

    #[cfg(not(feature = "interrupt"))]
    let execution = driver::Polling;
    #[cfg(feature = "interrupt")]
    let execution = driver::Interrupt::new();

    driver::run(execution, pedal, &config).await
}
