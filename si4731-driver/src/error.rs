//! Driver errors

use si4731_hal::BusError;
use si4731_protocol::{FrequencyError, StatusByte};

/// Si4731 driver errors
///
/// Every failure is terminal for the operation that produced it; nothing
/// here is retried by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Device did not acknowledge the address probe after reset
    NoResponse(BusError),
    /// CTS was not asserted within the poll budget
    CtsTimeout,
    /// Bus transport reported an error
    Bus(BusError),
    /// Fewer bytes came back than were requested
    ShortRead {
        /// Bytes requested
        expected: usize,
        /// Bytes received
        actual: usize,
    },
    /// Status reply marked the read as failed
    ChipError(StatusByte),
    /// Reply to FM_SEEK_START had CTS or ERR set
    SeekRejected(StatusByte),
    /// Control pin could not be driven
    Pin,
    /// Operation is part of the interface but has no implementation
    Unsupported,
    /// Station outside the tunable band
    InvalidFrequency(FrequencyError),
    /// Command issued before a successful `init()`
    NotInitialized,
}

impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Error::Bus(e)
    }
}

impl From<FrequencyError> for Error {
    fn from(e: FrequencyError) -> Self {
        Error::InvalidFrequency(e)
    }
}
