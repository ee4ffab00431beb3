//! Driver configuration
//!
//! Timing and addressing knobs. [`DriverConfig::default`] reproduces the
//! documented sequencing: 10 ms waits everywhere and 100 CTS polls.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use si4731_protocol::{PowerUpArgs, ADDRESS_SEN_HIGH, ADDRESS_SEN_LOW};

/// Which bus address the chip answers on, chosen by the SEN pin level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AddressMode {
    /// SEN driven low, address 0x11
    #[default]
    SenLow,
    /// SEN driven high, address 0x63
    SenHigh,
}

impl AddressMode {
    /// 7-bit bus address for this mode
    pub const fn address(self) -> u8 {
        match self {
            AddressMode::SenLow => ADDRESS_SEN_LOW,
            AddressMode::SenHigh => ADDRESS_SEN_HIGH,
        }
    }

    /// Level the SEN pin must be driven to
    pub const fn sen_high(self) -> bool {
        matches!(self, AddressMode::SenHigh)
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `cts_max_polls` must be at least 1
    ZeroCtsPolls,
    /// `cts_poll_interval_ms` must be at least 1
    ZeroCtsInterval,
}

/// Driver timing and addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverConfig {
    /// Bus address selection
    pub address: AddressMode,
    /// Wait before each CTS status read
    pub cts_poll_interval_ms: u32,
    /// CTS reads before giving up
    pub cts_max_polls: u32,
    /// Settle time around SEN and before the reset pulse
    pub pin_settle_ms: u32,
    /// Reset low hold, and high hold after release
    pub reset_hold_ms: u32,
    /// Wait before reading the reply to TUNE_FREQ / SEEK_START
    pub reply_delay_ms: u32,
    /// Wait before reading the 8-byte FM_TUNE_STATUS reply
    pub status_reply_delay_ms: u32,
    /// POWER_UP argument bytes
    pub power_up: PowerUpArgs,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            address: AddressMode::SenLow,
            cts_poll_interval_ms: 10,
            cts_max_polls: 100,
            pin_settle_ms: 10,
            reset_hold_ms: 10,
            reply_delay_ms: 10,
            status_reply_delay_ms: 1,
            power_up: PowerUpArgs::FM_ANALOG,
        }
    }
}

impl DriverConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cts_max_polls == 0 {
            return Err(ConfigError::ZeroCtsPolls);
        }
        if self.cts_poll_interval_ms == 0 {
            return Err(ConfigError::ZeroCtsInterval);
        }
        Ok(())
    }

    /// Bus address derived from [`Self::address`]
    pub fn bus_address(&self) -> u8 {
        self.address.address()
    }

    /// Longest a single CTS wait can block, in milliseconds
    pub fn cts_timeout_ms(&self) -> u32 {
        self.cts_poll_interval_ms.saturating_mul(self.cts_max_polls)
    }
}
