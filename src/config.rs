//! Persisted settings and the store that reads and writes them.

use crate::error::Error;

/// Cell holding the power-on bypass state.
pub const INITIAL_STATE_ADDRESS: u8 = 0x00;
/// Cell holding the momentary/alternate selection.
pub const MOMENTARY_ADDRESS: u8 = 0x02;
/// Cell holding the alternate-mode actuation timing.
pub const INVERT_TIMING_ADDRESS: u8 = 0x04;

/// Byte-addressed non-volatile cells.
pub trait Storage {
    type Error;

    fn read(&mut self, address: u8) -> Result<u8, Self::Error>;
    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error>;
}

/// User settings, loaded once per boot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// Effect engaged right after power-on.
    pub initial_state: bool,
    /// Bypass follows the switch level instead of toggling per press.
    pub momentary: bool,
    /// In alternate mode, actuate on release instead of on press.
    pub invert_timing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Setting {
    InitialState,
    Momentary,
    InvertTiming,
}

impl Setting {
    pub const fn address(self) -> u8 {
        match self {
            Setting::InitialState => INITIAL_STATE_ADDRESS,
            Setting::Momentary => MOMENTARY_ADDRESS,
            Setting::InvertTiming => INVERT_TIMING_ADDRESS,
        }
    }
}

pub struct ConfigStore<S> {
    storage: S,
}

impl<S: Storage> ConfigStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Reads all three cells. Any nonzero byte counts as `true`.
    pub fn load(&mut self) -> Result<Configuration, Error<S::Error>> {
        let config = Configuration {
            initial_state: self.read_flag(Setting::InitialState)?,
            momentary: self.read_flag(Setting::Momentary)?,
            invert_timing: self.read_flag(Setting::InvertTiming)?,
        };
        debug!("settings loaded: {}", config);
        Ok(config)
    }

    /// Persists one setting as `0x00` or `0x01`.
    pub fn commit(&mut self, setting: Setting, value: bool) -> Result<(), Error<S::Error>> {
        self.storage
            .write(setting.address(), value as u8)
            .map_err(Error::Storage)?;
        info!("{} set to {}", setting, value);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> S {
        self.storage
    }

    fn read_flag(&mut self, setting: Setting) -> Result<bool, Error<S::Error>> {
        let byte = self
            .storage
            .read(setting.address())
            .map_err(Error::Storage)?;
        Ok(byte != 0)
    }
}
