//! Si4731 Command Protocol
//!
//! This crate defines the byte-level command/response contract of the Si4731
//! FM receiver. It is pure: nothing here touches a bus or waits.
//!
//! # Protocol Overview
//!
//! Every command is a single I2C write starting with an opcode, followed by
//! argument bytes. The chip answers every read with a status byte first:
//! ```text
//! ┌─────┬─────┬───┬───┬───────┬───┬───┬─────┐
//! │ CTS │ ERR │ - │ - │ RSQ   │RDS│ - │ STC │
//! │ b7  │ b6  │b5 │b4 │ b3    │b2 │b1 │ b0  │
//! └─────┴─────┴───┴───┴───────┴───┴───┴─────┘
//! ```
//!
//! The FM_TUNE_STATUS reply is 8 bytes:
//! ```text
//! ┌────────┬───────┬─────────┬─────────┬──────┬─────┬──────┬──────┐
//! │ STATUS │ FLAGS │ FREQ_HI │ FREQ_LO │ RSSI │ SNR │ MULT │ JUNK │
//! └────────┴───────┴─────────┴─────────┴──────┴─────┴──────┴──────┘
//! ```
//!
//! Frequencies travel as big-endian 16-bit values in 10 kHz units.

// proptest needs std in the test harness
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod frequency;
pub mod status;

pub use command::{Command, PowerUpArgs, SeekDirection, MAX_COMMAND_LEN};
pub use frequency::{Frequency, FrequencyError};
pub use status::{StatusByte, TuneStatus, TUNE_STATUS_REPLY_LEN};

/// 7-bit bus address when the SEN pin is held low
pub const ADDRESS_SEN_LOW: u8 = 0x11;

/// 7-bit bus address when the SEN pin is held high
pub const ADDRESS_SEN_HIGH: u8 = 0x63;
