//! Reset and address-select sequencing
//!
//! Pin timing (defaults):
//! ```text
//! SEN  ──┐ settle ┌───────── held at the address level
//!        └────────┘
//! RST    settle ──┐  hold  ┌── hold ──▶ probe
//!                 └────────┘
//! ```
//! The chip latches its bus mode on the rising RST edge, so SEN must be
//! stable before the pulse.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::DriverConfig;
use crate::error::Error;

/// Drive SEN to the level selecting the configured bus address
///
/// One-time setup, not repeated per command.
pub fn select_address<P, D>(sen: &mut P, delay: &mut D, config: &DriverConfig) -> Result<(), Error>
where
    P: OutputPin,
    D: DelayNs,
{
    let high = config.address.sen_high();
    debug!("setting SEN pin {}", if high { "high" } else { "low" });

    delay.delay_ms(config.pin_settle_ms);
    if high {
        sen.set_high().map_err(|_| Error::Pin)?;
    } else {
        sen.set_low().map_err(|_| Error::Pin)?;
    }
    delay.delay_ms(config.pin_settle_ms);
    Ok(())
}

/// Pulse RST low then high
///
/// The datasheet minimum low time is far shorter than the configured hold.
/// Reset is only guaranteed once RST has returned high.
pub fn pulse_reset<P, D>(rst: &mut P, delay: &mut D, config: &DriverConfig) -> Result<(), Error>
where
    P: OutputPin,
    D: DelayNs,
{
    debug!("attempting to reset");

    delay.delay_ms(config.pin_settle_ms);
    rst.set_low().map_err(|_| Error::Pin)?;
    delay.delay_ms(config.reset_hold_ms);
    rst.set_high().map_err(|_| Error::Pin)?;
    delay.delay_ms(config.reset_hold_ms);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AddressMode;
    use crate::mock::{rig, Event};

    #[test]
    fn test_select_address_low() {
        let (_, _, mut sen, mut delay, trace) = rig();
        select_address(&mut sen, &mut delay, &DriverConfig::default()).unwrap();

        assert_eq!(
            trace.events(),
            vec![
                Event::DelayMs(10),
                Event::Pin { name: "sen", high: false },
                Event::DelayMs(10),
            ]
        );
    }

    #[test]
    fn test_select_address_high() {
        let (_, _, mut sen, mut delay, trace) = rig();
        let config = DriverConfig {
            address: AddressMode::SenHigh,
            ..DriverConfig::default()
        };
        select_address(&mut sen, &mut delay, &config).unwrap();

        assert!(trace
            .events()
            .contains(&Event::Pin { name: "sen", high: true }));
    }

    #[test]
    fn test_reset_pulse_timing() {
        let (_, mut rst, _, mut delay, trace) = rig();
        pulse_reset(&mut rst, &mut delay, &DriverConfig::default()).unwrap();

        assert_eq!(
            trace.events(),
            vec![
                Event::DelayMs(10),
                Event::Pin { name: "rst", high: false },
                Event::DelayMs(10),
                Event::Pin { name: "rst", high: true },
                Event::DelayMs(10),
            ]
        );
    }

    #[test]
    fn test_pin_failure() {
        let (_, mut rst, _, mut delay, trace) = rig();
        rst.fail = true;

        assert_eq!(
            pulse_reset(&mut rst, &mut delay, &DriverConfig::default()),
            Err(Error::Pin)
        );
        // stopped at the first edge
        assert_eq!(trace.events(), vec![Event::DelayMs(10)]);
    }
}
