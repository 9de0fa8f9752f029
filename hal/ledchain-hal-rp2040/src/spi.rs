//! Blocking SPI master
//!
//! The matrix chain is written a few bytes at a time with LOAD framing
//! each transfer, so blocking writes are used: `blocking_write` waits for
//! the FIFO to drain before returning.

use embassy_rp::spi::{self, Blocking, Instance, Spi};
use ledchain_hal::spi::{Phase, Polarity};
use ledchain_hal::{SpiBus, SpiConfig};

/// SPI transfer error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError {
    /// Peripheral reported a failure
    Bus,
}

/// Blocking SPI master implementing [`SpiBus`]
pub struct BlockingSpi<'d, T: Instance> {
    spi: Spi<'d, T, Blocking>,
}

impl<'d, T: Instance> BlockingSpi<'d, T> {
    /// Wrap an already configured peripheral
    pub fn new(spi: Spi<'d, T, Blocking>) -> Self {
        Self { spi }
    }

    /// Release the underlying peripheral
    pub fn into_inner(self) -> Spi<'d, T, Blocking> {
        self.spi
    }
}

impl<T: Instance> SpiBus for BlockingSpi<'_, T> {
    type Error = SpiError;

    fn write(&mut self, data: &[u8]) -> Result<(), SpiError> {
        self.spi.blocking_write(data).map_err(|_| SpiError::Bus)
    }
}

/// Translate the board-agnostic config into an Embassy config
///
/// The RP2040 PL022 only shifts MSB first, so `bit_order` is not used.
pub fn embassy_config(config: &SpiConfig) -> spi::Config {
    let (polarity, phase) = config.mode.into();

    let mut c = spi::Config::default();
    c.frequency = config.frequency;
    c.polarity = match polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    c.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    c
}
