//! Operator console
//!
//! Single-byte commands typed on a serial terminal, and their execution
//! against any [`Tuner`]. Every seek is followed by a status read so the
//! operator sees where the tuner landed.
//!
//! | byte | command |
//! |------|---------|
//! | `u`  | seek up |
//! | `d`  | seek down |
//! | `s`  | read status |
//! | `a`  | read status and cancel a running seek |

use si4731_protocol::{SeekDirection, TuneStatus};

use crate::error::Error;
use crate::tuner::Tuner;

/// Console commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioCommand {
    SeekUp,
    SeekDown,
    Status,
    AbortSeek,
}

/// Bytes that are not commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// Line endings and spaces from the terminal
    Whitespace,
    /// Any other byte
    Unknown(u8),
}

impl RadioCommand {
    /// Parse one console byte (case-insensitive)
    pub fn from_byte(byte: u8) -> Result<Self, ConsoleError> {
        match byte.to_ascii_lowercase() {
            b'u' => Ok(RadioCommand::SeekUp),
            b'd' => Ok(RadioCommand::SeekDown),
            b's' => Ok(RadioCommand::Status),
            b'a' => Ok(RadioCommand::AbortSeek),
            b if b.is_ascii_whitespace() => Err(ConsoleError::Whitespace),
            b => Err(ConsoleError::Unknown(b)),
        }
    }
}

/// What a console command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandOutcome {
    /// The command that ran
    pub command: RadioCommand,
    /// Result of the seek, `Ok` for status-only commands
    pub result: Result<(), Error>,
    /// Status read after the command
    pub status: TuneStatus,
}

/// Run a console command
pub fn execute<T: Tuner>(tuner: &mut T, command: RadioCommand) -> CommandOutcome {
    let (result, abort_seek) = match command {
        RadioCommand::SeekUp => {
            debug!("commanding seek up");
            (tuner.seek(SeekDirection::Up), false)
        }
        RadioCommand::SeekDown => {
            debug!("commanding seek down");
            (tuner.seek(SeekDirection::Down), false)
        }
        RadioCommand::Status => (Ok(()), false),
        RadioCommand::AbortSeek => (Ok(()), true),
    };

    CommandOutcome {
        command,
        result,
        status: tuner.read_status(abort_seek),
    }
}
