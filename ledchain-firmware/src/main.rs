//! Ledchain - Scrolling text firmware for chained LED matrices
//!
//! Main firmware binary for RP2040 boards driving a daisy chain of
//! MAX7219 8x8 matrix modules over SPI0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::Spi;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use ledchain_core::config::{DisplayConfig, SpiHwConfig};
use ledchain_core::{Font8x8, ScrollDisplay};
use ledchain_drivers::Max7219;
use ledchain_hal::SpiConfig;
use ledchain_hal_rp2040::spi::embassy_config;
use ledchain_hal_rp2040::{check_pinout, BlockingSpi, LoadPin};

use crate::channels::ScrollRequest;
use crate::config::parse_config;

mod channels;
mod config;
mod tasks;

/// Embedded default configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Ledchain firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Chain: {} modules, brightness {}, {}",
        config.module_count,
        config.brightness.level(),
        config.chain_order
    );

    // The board routes SPI0 to GP18 (SCK) / GP19 (TX) with LOAD on GP17
    let board = SpiHwConfig::default();
    if config.spi.mosi.pin != board.mosi.pin
        || config.spi.sck.pin != board.sck.pin
        || config.spi.cs.pin != board.cs.pin
    {
        warn!(
            "Configured pins {}/{}/{} differ from board wiring, using {}/{}/{}",
            config.spi.mosi.pin,
            config.spi.sck.pin,
            config.spi.cs.pin,
            board.mosi.pin,
            board.sck.pin,
            board.cs.pin
        );
    }

    let spi_config = SpiConfig {
        frequency: config.spi.frequency_hz,
        ..SpiConfig::default()
    };
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, embassy_config(&spi_config));
    let load = LoadPin::new(Output::new(p.PIN_17, Level::High), config.spi.cs.inverted);
    info!("SPI0 initialized at {} Hz", spi_config.frequency);

    let module_count = config.module_count as usize;
    let mut driver = match Max7219::new(
        BlockingSpi::new(spi),
        load,
        module_count,
        config.chain_order,
    ) {
        Ok(driver) => driver,
        Err(e) => halt("MAX7219 setup failed", e),
    };

    if let Err(e) = driver.init(config.brightness) {
        halt("MAX7219 init failed", e);
    }
    info!("MAX7219 chain initialized");

    let display = match ScrollDisplay::new(driver, Font8x8, module_count) {
        Ok(display) => display,
        Err(e) => halt("Display setup failed", e),
    };

    unwrap!(spawner.spawn(tasks::scroll_task(display)));
    info!("Scroll task spawned, firmware running");

    if let Some(text) = config.boot_text.clone() {
        channels::submit(ScrollRequest::new(text, &config.scroll)).await;
    }

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after(Duration::from_secs(60)).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded config, falling back to defaults
fn load_config() -> DisplayConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("display.toml parse error: {:?}, using defaults", e);
            return DisplayConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        warn!("display.toml rejected: {:?}, using defaults", e);
        return DisplayConfig::default();
    }
    if let Err(e) = check_pinout(&config.spi) {
        warn!("display.toml pinout not usable on SPI0: {:?}", e);
    }

    info!("Loaded configuration from display.toml");
    config
}

/// Log a fatal setup error and park the core
fn halt<E: Format>(what: &str, e: E) -> ! {
    error!("{}: {:?}", what, e);
    loop {
        cortex_m::asm::wfi();
    }
}
