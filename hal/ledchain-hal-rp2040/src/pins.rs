//! Pin function checks for config-driven SPI wiring
//!
//! Pin numbers come from the TOML config, but only some RP2040 GPIOs can
//! carry SPI0 signals. These checks run before any peripheral is touched
//! so a bad config is reported instead of silently driving the wrong pin.

use ledchain_core::config::SpiHwConfig;

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// GPIOs that can carry SPI0 SCK
pub const SPI0_SCK_PINS: [u8; 4] = [2, 6, 18, 22];

/// GPIOs that can carry SPI0 TX (MOSI)
pub const SPI0_TX_PINS: [u8; 4] = [3, 7, 19, 23];

/// Error when checking a pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin has no SPI0 clock function
    NotSckCapable,
    /// Pin has no SPI0 TX function
    NotTxCapable,
    /// Same pin assigned to two signals
    Conflict,
}

/// Check if a GPIO can carry SPI0 SCK
pub fn is_spi0_sck(pin: u8) -> bool {
    SPI0_SCK_PINS.contains(&pin)
}

/// Check if a GPIO can carry SPI0 TX
pub fn is_spi0_tx(pin: u8) -> bool {
    SPI0_TX_PINS.contains(&pin)
}

/// Validate an SPI pin assignment against the RP2040 pin functions
///
/// LOAD is driven as plain GPIO, so any free pin works for it.
pub fn check_pinout(spi: &SpiHwConfig) -> Result<(), PinError> {
    for pin in [spi.mosi.pin, spi.sck.pin, spi.cs.pin] {
        if pin >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
    }
    if spi.has_pin_conflict() {
        return Err(PinError::Conflict);
    }
    if !is_spi0_sck(spi.sck.pin) {
        return Err(PinError::NotSckCapable);
    }
    if !is_spi0_tx(spi.mosi.pin) {
        return Err(PinError::NotTxCapable);
    }
    Ok(())
}
