//! Configuration type definitions

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::SpiHwConfig;
use crate::canvas::MAX_MODULES;
use crate::scroll::ScrollParams;

/// Maximum length of the boot banner text
pub const MAX_TEXT_LEN: usize = 64;

/// Highest intensity level the driver chip accepts
pub const MAX_BRIGHTNESS: u8 = 15;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Module count outside 1..=MAX_MODULES
    InvalidModuleCount,
    /// The same GPIO is used for more than one SPI signal
    PinConflict,
    /// SPI clock of zero
    InvalidFrequency,
}

/// LED intensity level (0-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Brightness(u8);

impl Brightness {
    /// Dimmest setting
    pub const MIN: Brightness = Brightness(0);
    /// Brightest setting
    pub const MAX: Brightness = Brightness(MAX_BRIGHTNESS);

    /// Create a brightness level, clamping anything above the maximum
    pub const fn new(level: u8) -> Self {
        if level > MAX_BRIGHTNESS {
            Self(MAX_BRIGHTNESS)
        } else {
            Self(level)
        }
    }

    /// Raw level
    pub const fn level(&self) -> u8 {
        self.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self(7)
    }
}

impl From<u8> for Brightness {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

/// Mapping between canvas index and position in the SPI transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChainOrder {
    /// Trailing segment is shifted out first (data enters at the right)
    #[default]
    Reversed,
    /// Leading segment is shifted out first
    Forward,
}

/// Default scroll behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScrollConfig {
    /// Wait between pixel-steps in milliseconds
    pub step_delay_ms: u32,
    /// Passes of the text per request
    pub repetitions: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 50,
            repetitions: 1,
        }
    }
}

impl ScrollConfig {
    /// Scroll parameters using every module in the chain
    pub fn params(&self) -> ScrollParams {
        ScrollParams {
            visible_segments: MAX_MODULES,
            repetitions: self.repetitions,
            step_delay_ms: self.step_delay_ms,
        }
    }
}

/// Complete display configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Number of chained modules
    pub module_count: u8,
    /// Initial intensity
    pub brightness: Brightness,
    /// Physical addressing order
    pub chain_order: ChainOrder,
    /// SPI wiring and clock
    pub spi: SpiHwConfig,
    /// Scroll defaults
    pub scroll: ScrollConfig,
    /// Text scrolled once at start-up
    pub boot_text: Option<String<MAX_TEXT_LEN>>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            module_count: 4,
            brightness: Brightness::default(),
            chain_order: ChainOrder::Reversed,
            spi: SpiHwConfig::default(),
            scroll: ScrollConfig::default(),
            boot_text: None,
        }
    }
}

impl DisplayConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the config for values the hardware cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let modules = self.module_count as usize;
        if modules == 0 || modules > MAX_MODULES {
            return Err(ConfigError::InvalidModuleCount);
        }
        if self.spi.has_pin_conflict() {
            return Err(ConfigError::PinConflict);
        }
        if self.spi.frequency_hz == 0 {
            return Err(ConfigError::InvalidFrequency);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PinConfig;

    #[test]
    fn test_brightness_clamps() {
        assert_eq!(Brightness::new(3).level(), 3);
        assert_eq!(Brightness::new(15).level(), 15);
        assert_eq!(Brightness::new(16).level(), 15);
        assert_eq!(Brightness::from(200), Brightness::MAX);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = DisplayConfig::default();
        assert_eq!(config.module_count, 4);
        assert_eq!(config.chain_order, ChainOrder::Reversed);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_module_count() {
        let mut config = DisplayConfig::default();
        config.module_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidModuleCount));

        config.module_count = MAX_MODULES as u8 + 1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidModuleCount));

        config.module_count = MAX_MODULES as u8;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_pins() {
        let mut config = DisplayConfig::default();
        config.spi.cs = PinConfig::new(config.spi.sck.pin);
        assert_eq!(config.validate(), Err(ConfigError::PinConflict));

        let mut config = DisplayConfig::default();
        config.spi.frequency_hz = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFrequency));
    }

    #[test]
    fn test_scroll_params_from_config() {
        let scroll = ScrollConfig {
            step_delay_ms: 25,
            repetitions: 2,
        };
        let params = scroll.params();
        assert_eq!(params.step_delay_ms, 25);
        assert_eq!(params.repetitions, 2);
        assert_eq!(params.visible_segments, MAX_MODULES);
    }
}
