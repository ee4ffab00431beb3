//! I2C bus abstractions
//!
//! Provides the transport trait the Si4731 driver talks through, plus an
//! adapter for any `embedded-hal` 1.0 blocking I2C master.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// Error from I2C operations
///
/// Transport-neutral: a nonzero "end transmission" code from any bus
/// implementation maps onto one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received (no device at the address, or data rejected)
    Nack,
    /// Overrun/underrun
    Overrun,
    /// Timeout
    Timeout,
    /// Other error
    Other,
}

impl From<ErrorKind> for BusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => BusError::Bus,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => BusError::Nack,
            ErrorKind::Overrun => BusError::Overrun,
            _ => BusError::Other,
        }
    }
}

/// I2C bus master
///
/// Byte-oriented write framing and counted reads against a 7-bit address.
/// One write call is one begin/end transmission pair.
pub trait I2cBus {
    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write (may be empty)
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError>;

    /// Request `buf.len()` bytes from a device
    ///
    /// Returns the number of bytes actually read, which may be fewer than
    /// requested. Callers decide whether a short read is a failure.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, BusError>;

    /// Check that a device acknowledges its address
    ///
    /// Issues a zero-length write transaction.
    fn probe(&mut self, address: u8) -> Result<(), BusError> {
        self.write(address, &[])
    }
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        (**self).write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, BusError> {
        (**self).read(address, buf)
    }

    fn probe(&mut self, address: u8) -> Result<(), BusError> {
        (**self).probe(address)
    }
}

/// [`I2cBus`] over any `embedded-hal` blocking I2C master
///
/// `embedded-hal` reads either fill the whole buffer or fail, so a
/// successful read always reports the full length.
#[derive(Debug)]
pub struct HalBus<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> HalBus<I2C> {
    /// Wrap an I2C peripheral
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Release the wrapped peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> I2cBus for HalBus<I2C> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        self.i2c
            .write(address, data)
            .map_err(|e| BusError::from(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, BusError> {
        self.i2c
            .read(address, buf)
            .map_err(|e| BusError::from(e.kind()))?;
        Ok(buf.len())
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz), the fastest the Si4731 accepts
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Build from a clock in kHz, clamped to what the tuner supports
    pub fn from_khz(khz: u32) -> Self {
        Self {
            frequency: khz.clamp(10, 400) * 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorType, NoAcknowledgeSource, Operation};

    /// Fake embedded-hal I2C master
    struct FakeI2c {
        fail_with: Option<ErrorKind>,
        fill: u8,
        last_write: [u8; 4],
        last_write_len: usize,
    }

    impl FakeI2c {
        fn new() -> Self {
            Self {
                fail_with: None,
                fill: 0,
                last_write: [0; 4],
                last_write_len: 0,
            }
        }
    }

    impl ErrorType for FakeI2c {
        type Error = ErrorKind;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            _address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if let Some(kind) = self.fail_with {
                return Err(kind);
            }
            for op in operations {
                match op {
                    Operation::Write(data) => {
                        self.last_write_len = data.len();
                        self.last_write[..data.len()].copy_from_slice(data);
                    }
                    Operation::Read(buf) => buf.fill(self.fill),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_hal_bus_read_reports_full_length() {
        let mut fake = FakeI2c::new();
        fake.fill = 0x80;
        let mut bus = HalBus::new(fake);

        let mut buf = [0u8; 8];
        assert_eq!(bus.read(0x11, &mut buf), Ok(8));
        assert_eq!(buf, [0x80; 8]);
    }

    #[test]
    fn test_hal_bus_write_passes_bytes() {
        let mut bus = HalBus::new(FakeI2c::new());
        bus.write(0x11, &[0x22, 0x02]).unwrap();

        let fake = bus.release();
        assert_eq!(fake.last_write_len, 2);
        assert_eq!(&fake.last_write[..2], &[0x22, 0x02]);
    }

    #[test]
    fn test_probe_is_empty_write() {
        let mut bus = HalBus::new(FakeI2c::new());
        bus.write(0x11, &[0xAA]).unwrap();
        bus.probe(0x11).unwrap();

        assert_eq!(bus.release().last_write_len, 0);
    }

    #[test]
    fn test_error_mapping() {
        let mut fake = FakeI2c::new();
        fake.fail_with = Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        let mut bus = HalBus::new(fake);
        assert_eq!(bus.probe(0x11), Err(BusError::Nack));

        assert_eq!(BusError::from(ErrorKind::ArbitrationLoss), BusError::ArbitrationLost);
        assert_eq!(BusError::from(ErrorKind::Bus), BusError::Bus);
        assert_eq!(BusError::from(ErrorKind::Other), BusError::Other);
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut bus = HalBus::new(FakeI2c::new());
        {
            let mut borrowed = &mut bus;
            I2cBus::write(&mut borrowed, 0x11, &[1, 2, 3]).unwrap();
        }
        assert_eq!(bus.release().last_write_len, 3);
    }

    #[test]
    fn test_i2c_config() {
        assert_eq!(I2cConfig::default(), I2cConfig::STANDARD);
        assert_eq!(I2cConfig::from_khz(400), I2cConfig::FAST);
        assert_eq!(I2cConfig::from_khz(1000).frequency, 400_000);
    }
}
