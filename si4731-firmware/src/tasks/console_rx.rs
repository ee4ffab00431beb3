//! Console UART receive task
//!
//! Turns operator keystrokes into radio commands.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use si4731_driver::{ConsoleError, RadioCommand};

use crate::channels::COMMAND_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

/// Console RX task - parses bytes and queues commands for the radio
#[embassy_executor::task]
pub async fn console_rx_task(mut rx: BufferedUartRx) {
    info!("Console RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match RadioCommand::from_byte(byte) {
                        Ok(cmd) => {
                            debug!("Console command: {:?}", cmd);
                            if COMMAND_CHANNEL.try_send(cmd).is_err() {
                                warn!("Command channel full, dropping {:?}", cmd);
                            }
                        }
                        Err(ConsoleError::Whitespace) => {}
                        Err(ConsoleError::Unknown(b)) => {
                            warn!("Ignoring console byte {:#x}", b);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
