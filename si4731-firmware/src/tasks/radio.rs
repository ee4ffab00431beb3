//! Radio task
//!
//! Owns the Si4731. Brings the chip up after the startup delay, tunes the
//! configured station, then runs console commands one at a time.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Timer};

use si4731_driver::{execute, Frequency, Si4731};
use si4731_hal::HalBus;

use crate::channels::{COMMAND_CHANNEL, REPORT_CHANNEL};
use crate::config::{STARTUP_DELAY_S, STATION_UNITS};

/// The board's tuner: blocking I2C0, RST and SEN outputs
pub type Radio = Si4731<HalBus<I2c<'static, I2C0, Blocking>>, Output<'static>, Output<'static>, Delay>;

/// Radio task - initializes the tuner and executes console commands
#[embassy_executor::task]
pub async fn radio_task(mut radio: Radio) {
    info!("Radio task started, waiting {}s for the board to settle", STARTUP_DELAY_S);
    Timer::after_secs(STARTUP_DELAY_S).await;

    start_radio(&mut radio);

    loop {
        let cmd = COMMAND_CHANNEL.receive().await;
        let outcome = execute(&mut radio, cmd);

        if let Err(e) = outcome.result {
            warn!("{:?} failed: {:?}", cmd, e);
        }
        debug!("Status after {:?}: {:?}", cmd, outcome.status);

        if REPORT_CHANNEL.try_send(outcome).is_err() {
            warn!("Report channel full, dropping outcome");
        }
    }
}

/// Power up and tune the startup station
///
/// Failures are logged; later commands report `NotInitialized` until the
/// board is reset.
fn start_radio(radio: &mut Radio) {
    if let Err(e) = radio.init() {
        error!("Radio init failed: {:?}", e);
        return;
    }

    match Frequency::from_units(STATION_UNITS) {
        Ok(station) => {
            info!("Tuning startup station {} x 10 kHz", station.units());
            if let Err(e) = radio.tune(station) {
                error!("Startup tune failed: {:?}", e);
            }
        }
        Err(e) => error!("Startup station out of band: {:?}", e),
    }
}
