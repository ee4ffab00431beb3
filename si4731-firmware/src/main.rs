//! Si4731 operator-console firmware
//!
//! RP2040 firmware that brings up an Si4731 FM receiver and lets an
//! operator drive it from a serial terminal:
//!
//! ```text
//! UART0 RX ──▶ console_rx ──▶ COMMAND_CHANNEL ──▶ radio ──▶ REPORT_CHANNEL ──▶ console_tx ──▶ UART0 TX
//! ```
//!
//! Board wiring:
//! - I2C0: SDA GPIO4, SCL GPIO5
//! - Si4731 RST: GPIO15, SEN: GPIO14
//! - Console UART0: TX GPIO0, RX GPIO1
//!
//! Bus clock, address mode, startup delay, startup station and console baud
//! rate come from `radio.toml`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use si4731_driver::{DriverConfig, Si4731};
use si4731_hal::{HalBus, I2cConfig};

mod channels;
mod tasks;

/// Constants generated from radio.toml
mod config {
    use si4731_driver::AddressMode;

    include!(concat!(env!("OUT_DIR"), "/radio_config.rs"));
}

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Si4731 firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Console UART
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config::CONSOLE_BAUD;
    let tx_buf = TX_BUF.init([0u8; 128]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("Console UART initialized at {} baud", config::CONSOLE_BAUD);

    // Tuner bus and control pins
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::from_khz(config::I2C_FREQUENCY_KHZ).frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let rst = Output::new(p.PIN_15, Level::High);
    let sen = Output::new(p.PIN_14, Level::Low);

    let driver_config = DriverConfig {
        address: config::ADDRESS_MODE,
        ..DriverConfig::default()
    };
    let radio = unwrap!(Si4731::with_config(
        HalBus::new(i2c),
        rst,
        sen,
        Delay,
        driver_config
    ));

    info!(
        "Si4731 on I2C0 at {} kHz, address {:#x}",
        config::I2C_FREQUENCY_KHZ,
        radio.config().bus_address()
    );

    // Spawn tasks
    spawner.spawn(tasks::console_rx_task(rx)).unwrap();
    spawner.spawn(tasks::console_tx_task(tx)).unwrap();
    spawner.spawn(tasks::radio_task(radio)).unwrap();

    info!("All tasks spawned, type u/d/s/a on the console");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
