//! Command encoding
//!
//! Each [`Command`] maps to the exact bytes written in one I2C transaction.
//! Encoding never waits for CTS; the caller gates before sending.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frequency::Frequency;

/// Command opcodes
pub mod opcode {
    /// Power up the chip and select its function
    pub const POWER_UP: u8 = 0x01;
    /// Tune to a given FM frequency
    pub const FM_TUNE_FREQ: u8 = 0x20;
    /// Begin an autonomous seek
    pub const FM_SEEK_START: u8 = 0x21;
    /// Query tune/seek status
    pub const FM_TUNE_STATUS: u8 = 0x22;
}

/// Argument flag bits
pub mod flags {
    /// POWER_UP ARG1: enable the 32.768 kHz crystal oscillator
    pub const POWER_UP_XOSCEN: u8 = 0b0001_0000;
    /// POWER_UP ARG1: FM receive function
    pub const POWER_UP_FUNC_FM: u8 = 0b0000_0000;
    /// POWER_UP ARG2: analog audio outputs
    pub const POWER_UP_OPMODE_ANALOG: u8 = 0b0000_0101;
    /// FM_SEEK_START: seek towards higher frequencies
    pub const SEEK_UP: u8 = 0b0000_1000;
    /// FM_TUNE_STATUS: cancel a seek/tune in progress
    pub const STATUS_CANCEL: u8 = 0b0000_0010;
}

/// Longest encoded command (FM_TUNE_FREQ)
pub const MAX_COMMAND_LEN: usize = 5;

/// POWER_UP argument bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerUpArgs {
    /// ARG1: interrupt enables, oscillator, function
    pub arg1: u8,
    /// ARG2: audio output mode
    pub arg2: u8,
}

impl PowerUpArgs {
    /// FM receive, crystal oscillator on, analog audio out
    pub const FM_ANALOG: Self = Self {
        arg1: flags::POWER_UP_XOSCEN | flags::POWER_UP_FUNC_FM,
        arg2: flags::POWER_UP_OPMODE_ANALOG,
    };
}

impl Default for PowerUpArgs {
    fn default() -> Self {
        Self::FM_ANALOG
    }
}

/// Seek direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeekDirection {
    /// Towards higher frequencies
    Up,
    /// Towards lower frequencies
    Down,
}

impl SeekDirection {
    /// FM_SEEK_START argument byte
    pub const fn flags(self) -> u8 {
        match self {
            SeekDirection::Up => flags::SEEK_UP,
            SeekDirection::Down => 0,
        }
    }
}

/// A command the driver can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// POWER_UP with its two argument bytes
    PowerUp(PowerUpArgs),
    /// FM_TUNE_FREQ to a station
    TuneFreq(Frequency),
    /// FM_SEEK_START in a direction
    SeekStart(SeekDirection),
    /// FM_TUNE_STATUS, optionally cancelling a running seek
    TuneStatus {
        /// Set the cancel flag
        abort_seek: bool,
    },
}

impl Command {
    /// Opcode byte
    pub const fn opcode(&self) -> u8 {
        match self {
            Command::PowerUp(_) => opcode::POWER_UP,
            Command::TuneFreq(_) => opcode::FM_TUNE_FREQ,
            Command::SeekStart(_) => opcode::FM_SEEK_START,
            Command::TuneStatus { .. } => opcode::FM_TUNE_STATUS,
        }
    }

    /// Encode into a fixed buffer
    ///
    /// Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8; MAX_COMMAND_LEN]) -> usize {
        buffer[0] = self.opcode();
        match *self {
            Command::PowerUp(args) => {
                buffer[1] = args.arg1;
                buffer[2] = args.arg2;
                3
            }
            Command::TuneFreq(freq) => {
                let [hi, lo] = freq.to_bytes();
                buffer[1] = 0; // no FREEZE/FAST
                buffer[2] = hi;
                buffer[3] = lo;
                buffer[4] = 0; // automatic antenna capacitor
                5
            }
            Command::SeekStart(direction) => {
                buffer[1] = direction.flags();
                2
            }
            Command::TuneStatus { abort_seek } => {
                buffer[1] = if abort_seek { flags::STATUS_CANCEL } else { 0 };
                2
            }
        }
    }

    /// Encode into a heapless Vec
    pub fn to_vec(&self) -> Vec<u8, MAX_COMMAND_LEN> {
        let mut buffer = [0u8; MAX_COMMAND_LEN];
        let len = self.encode(&mut buffer);
        // capacity equals the buffer size, so this cannot fall back
        Vec::from_slice(&buffer[..len]).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_up_bytes() {
        let cmd = Command::PowerUp(PowerUpArgs::default());
        assert_eq!(cmd.to_vec().as_slice(), &[0x01, 0b0001_0000, 0b0000_0101]);
    }

    #[test]
    fn test_tune_freq_bytes() {
        let freq = Frequency::from_mhz(88.5).unwrap();
        let cmd = Command::TuneFreq(freq);
        assert_eq!(cmd.to_vec().as_slice(), &[0x20, 0x00, 0x22, 0x92, 0x00]);

        let freq = Frequency::from_mhz(101.1).unwrap();
        let cmd = Command::TuneFreq(freq);
        assert_eq!(cmd.to_vec().as_slice(), &[0x20, 0x00, 0x27, 0x7E, 0x00]);
    }

    #[test]
    fn test_seek_bytes() {
        let up = Command::SeekStart(SeekDirection::Up).to_vec();
        assert_eq!(up.as_slice(), &[0x21, 0b0000_1000]);

        let down = Command::SeekStart(SeekDirection::Down).to_vec();
        assert_eq!(down.as_slice(), &[0x21, 0x00]);
    }

    #[test]
    fn test_tune_status_bytes() {
        let plain = Command::TuneStatus { abort_seek: false }.to_vec();
        assert_eq!(plain.as_slice(), &[0x22, 0x00]);

        let abort = Command::TuneStatus { abort_seek: true }.to_vec();
        assert_eq!(abort.as_slice(), &[0x22, 0b0000_0010]);
    }

    #[test]
    fn test_encode_length() {
        let mut buffer = [0xFFu8; MAX_COMMAND_LEN];
        let len = Command::SeekStart(SeekDirection::Up).encode(&mut buffer);
        assert_eq!(len, 2);
        // untouched tail
        assert_eq!(buffer[2], 0xFF);
    }
}
