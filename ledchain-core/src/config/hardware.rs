//! Hardware configuration types
//!
//! Pin assignment and bus timing for the SPI link to the chain.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default SPI clock (the MAX7219 tops out at 10 MHz)
pub const DEFAULT_SPI_FREQUENCY_HZ: u32 = 10_000_000;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// SPI link to the first module in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiHwConfig {
    /// Data out (DIN on the module)
    pub mosi: PinConfig,
    /// Clock (CLK on the module)
    pub sck: PinConfig,
    /// Load / chip select (CS on the module)
    pub cs: PinConfig,
    /// Bus clock in Hz
    pub frequency_hz: u32,
}

impl Default for SpiHwConfig {
    fn default() -> Self {
        // SPI0 on the Pico: GP19 TX, GP18 SCK, GP17 CSn
        Self {
            mosi: PinConfig::new(19),
            sck: PinConfig::new(18),
            cs: PinConfig::new(17),
            frequency_hz: DEFAULT_SPI_FREQUENCY_HZ,
        }
    }
}

impl SpiHwConfig {
    /// Check that no pin is assigned twice
    pub fn has_pin_conflict(&self) -> bool {
        self.mosi.pin == self.sck.pin || self.mosi.pin == self.cs.pin || self.sck.pin == self.cs.pin
    }
}
