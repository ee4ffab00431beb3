//! Clear-to-send gate
//!
//! The chip must not receive a command until bit 7 of its status byte is
//! set. The gate polls that byte at a fixed interval and gives up after a
//! bounded number of reads.

use embedded_hal::delay::DelayNs;
use si4731_hal::I2cBus;
use si4731_protocol::StatusByte;

use crate::config::DriverConfig;
use crate::error::Error;

/// Bounded CTS poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CtsGate {
    /// Wait before each status read
    pub interval_ms: u32,
    /// Reads before reporting a timeout
    pub max_polls: u32,
}

impl CtsGate {
    /// Create a gate from explicit timing
    pub const fn new(interval_ms: u32, max_polls: u32) -> Self {
        Self {
            interval_ms,
            max_polls,
        }
    }

    /// Gate using the driver configuration's timing
    pub fn from_config(config: &DriverConfig) -> Self {
        Self::new(config.cts_poll_interval_ms, config.cts_max_polls)
    }

    /// Block until the chip asserts CTS
    ///
    /// Each poll waits `interval_ms`, then reads one status byte. A read
    /// error or an empty read counts as "not ready". Returns the number of
    /// polls it took, or [`Error::CtsTimeout`] after exactly `max_polls`
    /// reads without CTS.
    pub fn wait<B, D>(&self, bus: &mut B, delay: &mut D, address: u8) -> Result<u32, Error>
    where
        B: I2cBus,
        D: DelayNs,
    {
        for poll in 1..=self.max_polls {
            delay.delay_ms(self.interval_ms);

            let mut status = [0u8; 1];
            match bus.read(address, &mut status) {
                Ok(1) if StatusByte(status[0]).cts() => {
                    trace!("CTS after {} polls", poll);
                    return Ok(poll);
                }
                Ok(_) => {}
                Err(e) => {
                    trace!("CTS poll {} read failed: {}", poll, e);
                }
            }
        }

        warn!("CTS not asserted after {} polls", self.max_polls);
        Err(Error::CtsTimeout)
    }
}

impl Default for CtsGate {
    fn default() -> Self {
        Self::from_config(&DriverConfig::default())
    }
}
