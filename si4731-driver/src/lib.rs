//! Si4731 FM tuner driver
//!
//! Blocking, register-level driver for the Si4731 FM receiver:
//!
//! - Reset and address-select pin sequencing ([`reset`])
//! - The clear-to-send gate every command waits on ([`cts`])
//! - Tune, seek and tune-status operations ([`Si4731`])
//! - An operator console mapping terminal bytes to operations ([`console`])
//!
//! The bus comes in through [`si4731_hal::I2cBus`]; pins and delays are
//! plain `embedded-hal` 1.0 traits, so tests can substitute fakes and run
//! without real waits.
//!
//! ```ignore
//! let bus = HalBus::new(i2c);
//! let mut radio = Si4731::new(bus, rst, sen, delay);
//! radio.init()?;
//! radio.tune_mhz(101.1)?;
//! let status = radio.read_status(false);
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// must come first so the logging macros are visible below
mod fmt;

pub mod config;
pub mod console;
pub mod cts;
pub mod device;
pub mod error;
pub mod reset;
pub mod tuner;

#[cfg(test)]
mod mock;

pub use config::{AddressMode, ConfigError, DriverConfig};
pub use console::{execute, CommandOutcome, ConsoleError, RadioCommand};
pub use cts::CtsGate;
pub use device::Si4731;
pub use error::Error;
pub use tuner::{GpioPin, Tuner};

pub use si4731_protocol::{Frequency, FrequencyError, SeekDirection, StatusByte, TuneStatus};
