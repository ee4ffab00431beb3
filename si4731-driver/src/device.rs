//! Si4731 device facade
//!
//! Sequences the reset pins, the CTS gate, command encoding and status
//! decoding into the public operations. Every call blocks until the chip has
//! answered or the CTS budget is spent.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──▶ init() ──▶ tune / seek / read_status ... ──▶ release()
//! ```
//!
//! Commands issued before a successful [`Si4731::init`] fail with
//! [`Error::NotInitialized`] without touching the bus.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use si4731_hal::I2cBus;
use si4731_protocol::{
    Command, Frequency, SeekDirection, StatusByte, TuneStatus, MAX_COMMAND_LEN,
    TUNE_STATUS_REPLY_LEN,
};

use crate::config::{ConfigError, DriverConfig};
use crate::cts::CtsGate;
use crate::error::Error;
use crate::reset::{pulse_reset, select_address};
use crate::tuner::{GpioPin, Tuner};

/// Si4731 FM receiver on an I2C bus
///
/// Owns (or exclusively borrows, via `&mut B`) the bus transport, the RST
/// and SEN pins and a delay provider. Several handles can share one bus by
/// each borrowing it in turn.
pub struct Si4731<B, RST, SEN, D> {
    bus: B,
    rst: RST,
    sen: SEN,
    delay: D,
    config: DriverConfig,
    cts: CtsGate,
    initialized: bool,
}

impl<B, RST, SEN, D> Si4731<B, RST, SEN, D>
where
    B: I2cBus,
    RST: OutputPin,
    SEN: OutputPin,
    D: DelayNs,
{
    /// Create a driver with the default timing and SEN-low addressing
    pub fn new(bus: B, rst: RST, sen: SEN, delay: D) -> Self {
        let config = DriverConfig::default();
        Self {
            bus,
            rst,
            sen,
            delay,
            cts: CtsGate::from_config(&config),
            config,
            initialized: false,
        }
    }

    /// Create a driver with explicit configuration
    pub fn with_config(
        bus: B,
        rst: RST,
        sen: SEN,
        delay: D,
        config: DriverConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            bus,
            rst,
            sen,
            delay,
            cts: CtsGate::from_config(&config),
            config,
            initialized: false,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Whether `init()` has completed successfully
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Give back the bus, pins and delay
    pub fn release(self) -> (B, RST, SEN, D) {
        (self.bus, self.rst, self.sen, self.delay)
    }

    /// Reset the chip and power it up in FM receive mode
    ///
    /// Drives SEN, pulses RST, probes the bus address, then sends POWER_UP
    /// between two CTS waits. Any failing step aborts; nothing is retried.
    pub fn init(&mut self) -> Result<(), Error> {
        self.initialized = false;

        select_address(&mut self.sen, &mut self.delay, &self.config)?;

        if let Err(e) = self.reset_chip() {
            error!("restart failed when running through init");
            return Err(e);
        }
        debug!("running through power up sequence");

        if let Err(e) = self.power_up() {
            error!("power up failed");
            return Err(e);
        }

        info!("chip is powered up in FM mode and ready to go");
        self.initialized = true;
        Ok(())
    }

    /// Check the chip acknowledges its bus address
    pub fn probe(&mut self) -> Result<(), Error> {
        let address = self.config.bus_address();
        debug!("testing connection");
        match self.bus.probe(address) {
            Ok(()) => {
                debug!("successfully connected to the chip");
                Ok(())
            }
            Err(e) => {
                error!("received error with connection: {}", e);
                Err(Error::NoResponse(e))
            }
        }
    }

    /// Tune to a station
    ///
    /// After sending FM_TUNE_FREQ one status byte is read back and logged;
    /// its contents do not affect the result.
    pub fn tune(&mut self, frequency: Frequency) -> Result<(), Error> {
        self.ensure_initialized()?;
        debug!("tuning to station: {} x 10 kHz", frequency.units());

        self.wait_for_cts()?;
        self.send(&Command::TuneFreq(frequency))?;

        self.delay.delay_ms(self.config.reply_delay_ms);
        let mut reply = [0u8; 1];
        match self.bus.read(self.config.bus_address(), &mut reply) {
            Ok(1) => debug!("response after tune: {:#x}", reply[0]),
            Ok(_) => warn!("no response byte after tune"),
            Err(e) => warn!("reading tune response failed: {}", e),
        }
        Ok(())
    }

    /// Tune to a station given in MHz (e.g. `101.1`)
    pub fn tune_mhz(&mut self, mhz: f32) -> Result<(), Error> {
        let frequency = Frequency::from_mhz(mhz)?;
        self.tune(frequency)
    }

    /// Start a seek
    ///
    /// The status byte read right after FM_SEEK_START decides the result:
    /// CTS or ERR set there means the seek is reported as failed, even if
    /// the chip physically accepted the command.
    pub fn seek(&mut self, direction: SeekDirection) -> Result<(), Error> {
        self.ensure_initialized()?;
        debug!(
            "seeking {}",
            match direction {
                SeekDirection::Up => "up",
                SeekDirection::Down => "down",
            }
        );

        self.wait_for_cts()?;
        self.send(&Command::SeekStart(direction))?;

        self.delay.delay_ms(self.config.reply_delay_ms);
        let mut reply = [0u8; 1];
        self.read_reply(&mut reply)?;

        let status = StatusByte(reply[0]);
        if status.seek_rejected() {
            error!("seek rejected, status {:#x}", reply[0]);
            return Err(Error::SeekRejected(status));
        }
        Ok(())
    }

    /// Read tune status, optionally cancelling a running seek
    ///
    /// Never fails outright: CTS timeout, bus errors, short reads and a
    /// clear success bit all come back as `status == false`.
    pub fn read_status(&mut self, abort_seek: bool) -> TuneStatus {
        match self.fetch_status(abort_seek) {
            Ok(reply) => {
                let status = TuneStatus::decode(&reply);
                if !status.status {
                    error!("received back error status from module");
                }
                log_status(&status);
                status
            }
            Err(e) => {
                error!("tune status read failed: {}", e);
                TuneStatus::failed()
            }
        }
    }

    /// Read tune status, reporting why it failed
    ///
    /// Same exchange as [`Self::read_status`]; a clear success bit maps to
    /// [`Error::ChipError`].
    pub fn try_read_status(&mut self, abort_seek: bool) -> Result<TuneStatus, Error> {
        let reply = self.fetch_status(abort_seek)?;
        let status = TuneStatus::decode(&reply);
        if !status.status {
            return Err(Error::ChipError(StatusByte(reply[0])));
        }
        log_status(&status);
        Ok(status)
    }

    /// Drive an auxiliary GPIO (not implemented)
    pub fn set_gpio(&mut self, pin: GpioPin, high: bool) -> Result<(), Error> {
        debug!("set_gpio({}, {}) is unsupported", pin, high);
        Err(Error::Unsupported)
    }

    /// Enable or mute audio (not implemented)
    pub fn set_audio_enabled(&mut self, enabled: bool) -> Result<(), Error> {
        debug!("set_audio_enabled({}) is unsupported", enabled);
        Err(Error::Unsupported)
    }

    fn reset_chip(&mut self) -> Result<(), Error> {
        pulse_reset(&mut self.rst, &mut self.delay, &self.config)?;
        self.probe()
    }

    fn power_up(&mut self) -> Result<(), Error> {
        if let Err(e) = self.wait_for_cts() {
            error!("wait for cts timed out");
            return Err(e);
        }

        self.send(&Command::PowerUp(self.config.power_up))?;

        if let Err(e) = self.wait_for_cts() {
            error!("wait for cts timed out (after power up cmd sent)");
            return Err(e);
        }

        info!("power up cmds entered right");
        Ok(())
    }

    fn fetch_status(&mut self, abort_seek: bool) -> Result<[u8; TUNE_STATUS_REPLY_LEN], Error> {
        self.ensure_initialized()?;
        self.wait_for_cts()?;

        if abort_seek {
            info!("cancelling current seek");
        }
        self.send(&Command::TuneStatus { abort_seek })?;

        self.delay.delay_ms(self.config.status_reply_delay_ms);
        let mut reply = [0u8; TUNE_STATUS_REPLY_LEN];
        self.read_reply(&mut reply)?;
        Ok(reply)
    }

    fn wait_for_cts(&mut self) -> Result<u32, Error> {
        let address = self.config.bus_address();
        self.cts.wait(&mut self.bus, &mut self.delay, address)
    }

    fn send(&mut self, command: &Command) -> Result<(), Error> {
        let mut buffer = [0u8; MAX_COMMAND_LEN];
        let len = command.encode(&mut buffer);
        trace!("TX {:02x}", &buffer[..len]);

        self.bus
            .write(self.config.bus_address(), &buffer[..len])
            .map_err(|e| {
                error!("error occurred when sending command {:#x}: {}", buffer[0], e);
                Error::Bus(e)
            })
    }

    fn read_reply(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        let expected = buf.len();
        let actual = self.bus.read(self.config.bus_address(), buf)?;
        if actual != expected {
            error!("didn't read back the correct number of bytes: {} of {}", actual, expected);
            return Err(Error::ShortRead { expected, actual });
        }
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), Error> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }
}

fn log_status(status: &TuneStatus) {
    debug!("valid channel: {}", status.valid_channel);
    debug!("freq_limit_hit: {}", status.frequency_limit_hit);
    debug!(
        "current freq: {} (rssi {}, snr {})",
        status.frequency, status.rssi, status.snr
    );
}

impl<B, RST, SEN, D> Tuner for Si4731<B, RST, SEN, D>
where
    B: I2cBus,
    RST: OutputPin,
    SEN: OutputPin,
    D: DelayNs,
{
    fn init(&mut self) -> Result<(), Error> {
        Si4731::init(self)
    }

    fn tune(&mut self, frequency: Frequency) -> Result<(), Error> {
        Si4731::tune(self, frequency)
    }

    fn seek(&mut self, direction: SeekDirection) -> Result<(), Error> {
        Si4731::seek(self, direction)
    }

    fn read_status(&mut self, abort_seek: bool) -> TuneStatus {
        Si4731::read_status(self, abort_seek)
    }

    fn set_gpio(&mut self, pin: GpioPin, high: bool) -> Result<(), Error> {
        Si4731::set_gpio(self, pin, high)
    }

    fn set_audio_enabled(&mut self, enabled: bool) -> Result<(), Error> {
        Si4731::set_audio_enabled(self, enabled)
    }
}
