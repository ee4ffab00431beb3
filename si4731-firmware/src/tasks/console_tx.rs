//! Console UART transmit task
//!
//! Prints one line per finished command back to the operator terminal.

use core::fmt::Write as _;

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;
use heapless::String;

use si4731_driver::CommandOutcome;

use crate::channels::REPORT_CHANNEL;

/// Longest report line
const LINE_LEN: usize = 96;

/// Console TX task - writes command outcomes to the terminal
#[embassy_executor::task]
pub async fn console_tx_task(mut tx: BufferedUartTx) {
    info!("Console TX task started");

    loop {
        let outcome = REPORT_CHANNEL.receive().await;
        let line = format_outcome(&outcome);

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("UART write error: {:?}", e);
        }
    }
}

/// Render an outcome as a terminal line
///
/// `101.10 MHz rssi 42 snr 18 valid`, prefixed with the failure if the
/// command itself failed. Overlong lines are truncated.
fn format_outcome(outcome: &CommandOutcome) -> String<LINE_LEN> {
    let mut line = String::new();

    if let Err(e) = outcome.result {
        let _ = write!(line, "{:?} failed ({:?}); ", outcome.command, e);
    }

    let status = &outcome.status;
    if status.status {
        let (whole, frac) = status.tuned().mhz_parts();
        let _ = write!(
            line,
            "{}.{:02} MHz rssi {} snr {}{}",
            whole,
            frac,
            status.rssi,
            status.snr,
            if status.valid_channel { " valid" } else { "" }
        );
        if status.frequency_limit_hit {
            let _ = line.push_str(" band-limit");
        }
    } else {
        let _ = line.push_str("status unavailable");
    }

    let _ = line.push_str("\r\n");
    line
}
