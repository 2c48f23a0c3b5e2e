use thiserror::Error;

/// Failures the controller can report.
///
/// Switch and relay faults cannot be sensed, so the only reportable failure
/// is the settings storage refusing a read or a write.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    #[error("settings storage access failed")]
    Storage(E),
}
