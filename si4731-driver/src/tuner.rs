//! Tuner abstraction
//!
//! The operations any FM tuner front-end offers to the application loop.

use si4731_protocol::{Frequency, SeekDirection, TuneStatus};

use crate::error::Error;

/// Auxiliary GPIO outputs on the tuner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioPin {
    Gpio1,
    Gpio2,
}

/// FM tuner operations
pub trait Tuner {
    /// Reset and power up into FM receive mode
    fn init(&mut self) -> Result<(), Error>;

    /// Tune to a station
    fn tune(&mut self, frequency: Frequency) -> Result<(), Error>;

    /// Start a seek to the next valid channel
    fn seek(&mut self, direction: SeekDirection) -> Result<(), Error>;

    /// Read tune status, optionally cancelling a running seek
    ///
    /// Failures are folded into [`TuneStatus::status`].
    fn read_status(&mut self, abort_seek: bool) -> TuneStatus;

    /// Drive an auxiliary GPIO
    fn set_gpio(&mut self, pin: GpioPin, high: bool) -> Result<(), Error>;

    /// Enable or mute audio output
    fn set_audio_enabled(&mut self, enabled: bool) -> Result<(), Error>;
}
