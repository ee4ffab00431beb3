//! Inter-task communication channels
//!
//! Console commands flow from the UART receiver to the radio task; command
//! outcomes flow back to the UART transmitter.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use si4731_driver::{CommandOutcome, RadioCommand};

/// Channel capacity for operator commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for outcome reports
const REPORT_CHANNEL_SIZE: usize = 4;

/// Parsed console commands waiting for the radio
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, RadioCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Finished commands waiting to be printed
pub static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, CommandOutcome, REPORT_CHANNEL_SIZE> =
    Channel::new();
