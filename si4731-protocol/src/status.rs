//! Status byte and FM_TUNE_STATUS reply decoding

use crate::frequency::Frequency;

/// Status byte bits
pub mod bits {
    /// Clear to send the next command
    pub const CTS: u8 = 0b1000_0000;
    /// Error / command result bit
    pub const ERR: u8 = 0b0100_0000;
    /// Seek/tune complete
    pub const STC: u8 = 0b0000_0001;

    /// FM_TUNE_STATUS RESP1: band limit reached during seek
    pub const RESP1_BLTF: u8 = 0b1000_0000;
    /// FM_TUNE_STATUS RESP1: valid channel
    pub const RESP1_VALID: u8 = 0b0000_0001;
}

/// Length of the FM_TUNE_STATUS reply
pub const TUNE_STATUS_REPLY_LEN: usize = 8;

/// The first byte of every reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusByte(pub u8);

impl StatusByte {
    /// Chip is ready for the next command
    pub const fn cts(self) -> bool {
        self.0 & bits::CTS != 0
    }

    /// Error bit is set
    pub const fn error(self) -> bool {
        self.0 & bits::ERR != 0
    }

    /// Seek/tune complete interrupt is pending
    pub const fn stc(self) -> bool {
        self.0 & bits::STC != 0
    }

    /// Reply read right after FM_SEEK_START signals rejection
    ///
    /// Either of the top two bits set counts as a failed seek.
    pub const fn seek_rejected(self) -> bool {
        self.0 & (bits::CTS | bits::ERR) != 0
    }
}

/// Decoded FM_TUNE_STATUS reply
///
/// When `status` is false the remaining fields must not be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TuneStatus {
    /// Tuned frequency in 10 kHz units
    pub frequency: u16,
    /// Seek stopped at the band edge
    pub frequency_limit_hit: bool,
    /// AFC railed (not reported by this decode path)
    pub afc_rail: bool,
    /// Chip considers the channel valid
    pub valid_channel: bool,
    /// Received signal strength
    pub rssi: u8,
    /// Signal-to-noise ratio
    pub snr: u8,
    /// Multipath/multiplier byte, passed through
    pub mult: u8,
    /// Reserved trailing byte, passed through
    pub junk: u8,
    /// Overall success of the read
    pub status: bool,
}

impl TuneStatus {
    /// Decode an 8-byte reply
    ///
    /// Total over all inputs. `status` mirrors bit 6 of the first byte:
    /// when it is clear the read counts as failed.
    pub fn decode(reply: &[u8; TUNE_STATUS_REPLY_LEN]) -> Self {
        let resp1 = reply[1];
        Self {
            frequency: u16::from_be_bytes([reply[2], reply[3]]),
            frequency_limit_hit: resp1 & bits::RESP1_BLTF != 0,
            afc_rail: false,
            valid_channel: resp1 & bits::RESP1_VALID != 0,
            rssi: reply[4],
            snr: reply[5],
            mult: reply[6],
            junk: reply[7],
            status: StatusByte(reply[0]).error(),
        }
    }

    /// A result carrying no data, marked failed
    pub fn failed() -> Self {
        Self::default()
    }

    /// Whether the read succeeded
    pub fn is_ok(&self) -> bool {
        self.status
    }

    /// Tuned frequency as a [`Frequency`]
    pub fn tuned(&self) -> Frequency {
        Frequency::from_raw(self.frequency)
    }
}
