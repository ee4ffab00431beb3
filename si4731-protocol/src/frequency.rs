//! FM station frequencies
//!
//! The chip counts in 10 kHz steps, so 101.1 MHz is 10110 on the wire.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors converting a human-facing station value into a [`Frequency`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrequencyError {
    /// NaN or infinite input
    NotFinite,
    /// Outside the tuner's FM band
    OutOfBand,
}

/// Station frequency in 10 kHz units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frequency(u16);

impl Frequency {
    /// Lowest tunable station (64.00 MHz)
    pub const MIN: Self = Self(6400);

    /// Highest tunable station (108.00 MHz)
    pub const MAX: Self = Self(10800);

    /// Convert a station in MHz (e.g. `101.1`), rounding to the nearest 10 kHz
    pub fn from_mhz(mhz: f32) -> Result<Self, FrequencyError> {
        if !mhz.is_finite() {
            return Err(FrequencyError::NotFinite);
        }
        if mhz <= 0.0 {
            return Err(FrequencyError::OutOfBand);
        }

        // `as` saturates, so absurdly large inputs land above MAX
        let units = (mhz * 100.0 + 0.5) as u32;
        if units < Self::MIN.0 as u32 || units > Self::MAX.0 as u32 {
            return Err(FrequencyError::OutOfBand);
        }
        Ok(Self(units as u16))
    }

    /// Build from 10 kHz units, checking the band
    pub fn from_units(units: u16) -> Result<Self, FrequencyError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&units) {
            return Err(FrequencyError::OutOfBand);
        }
        Ok(Self(units))
    }

    /// Build from a raw value reported by the chip (no band check)
    pub const fn from_raw(units: u16) -> Self {
        Self(units)
    }

    /// Value in 10 kHz units
    pub const fn units(self) -> u16 {
        self.0
    }

    /// Big-endian wire bytes `[high, low]`
    pub const fn to_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Parse big-endian wire bytes `[high, low]`
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    /// Whole MHz and hundredths, for display without floats (`101.10`)
    pub const fn mhz_parts(self) -> (u16, u8) {
        (self.0 / 100, (self.0 % 100) as u8)
    }

    /// Approximate value in MHz
    pub fn mhz(self) -> f32 {
        self.0 as f32 / 100.0
    }
}
