//! True bypass footswitch controller
//!
//! One footswitch switches an external effect in or out of the signal path
//! through a relay, with an optocoupler isolating the audio while the relay
//! moves. The logic here is hardware-agnostic and builds on `embedded-hal`;
//! the firmware under `src/bin/` binds it to an STM32F103.
//!
//! Startup order:
//! 1. [`config::ConfigStore::load`] reads the persisted settings once
//! 2. [`power_on::configure`] lets the user flip settings by holding the switch
//! 3. [`driver::run`] hands the switch over to the [`mode::ModeMachine`]
//!    through either the [`driver::Polling`] or the [`driver::Interrupt`] driver

#![cfg_attr(not(test), no_std)]

// Must stay first so the log macros are visible to every other module.
#[macro_use]
mod fmt;

pub mod actuator;
pub mod config;
pub mod debounce;
pub mod driver;
pub mod error;
pub mod hardware;
pub mod indicator;
pub mod mode;
pub mod pedal;
pub mod power_on;
pub mod timing;

#[cfg(test)]
mod sim;

pub use config::{ConfigStore, Configuration, Setting, Storage};
pub use debounce::SwitchLevel;
pub use error::Error;
pub use pedal::Pedal;
pub use timing::Timing;
