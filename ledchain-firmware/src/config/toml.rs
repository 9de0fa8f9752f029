//! Simple TOML parser for the display configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `display.toml`. It does NOT support full TOML.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - `[display]`, `[spi]` and `[scroll]` section headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings
//! - Arrays and inline tables
//! - Dotted keys

use heapless::String;

use ledchain_core::config::{
    Brightness, ChainOrder, DisplayConfig, PinConfig, MAX_TEXT_LEN,
};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Boot text longer than the text buffer
    TextTooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Spi,
    Scroll,
}

/// Parse TOML configuration into a DisplayConfig
///
/// Keys that are not set keep their defaults; unknown keys are ignored.
pub fn parse_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "spi" => Ok(Section::Spi),
        "scroll" => Ok(Section::Scroll),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse a key = value line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin string like "gpio17" or "!gpio17"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let s = parse_string(value);
    let (inverted, s) = match s.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let number = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: u8 = number.parse().map_err(|_| ParseError::InvalidPin)?;

    Ok(PinConfig { pin, inverted })
}

/// Parse the chain addressing order
fn parse_chain_order(value: &str) -> Result<ChainOrder, ParseError> {
    match parse_string(value) {
        "reversed" | "Reversed" => Ok(ChainOrder::Reversed),
        "forward" | "Forward" => Ok(ChainOrder::Forward),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_text(value: &str) -> Result<String<MAX_TEXT_LEN>, ParseError> {
    let mut text = String::new();
    text.push_str(parse_string(value))
        .map_err(|_| ParseError::TextTooLong)?;
    Ok(text)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DisplayConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Display => match key {
            "module_count" | "modules" => config.module_count = parse_int(value)?,
            // Out-of-range brightness is clamped, not rejected
            "brightness" => config.brightness = Brightness::new(parse_int(value)?),
            "chain_order" => config.chain_order = parse_chain_order(value)?,
            "boot_text" => {
                let text = parse_text(value)?;
                config.boot_text = (!text.is_empty()).then_some(text);
            }
            _ => {} // Ignore unknown keys
        },
        Section::Spi => match key {
            "mosi_pin" => config.spi.mosi = parse_pin(value)?,
            "sck_pin" => config.spi.sck = parse_pin(value)?,
            "cs_pin" => config.spi.cs = parse_pin(value)?,
            "frequency_hz" | "frequency" => config.spi.frequency_hz = parse_int(value)?,
            _ => {}
        },
        Section::Scroll => match key {
            "step_delay_ms" => config.scroll.step_delay_ms = parse_int(value)?,
            "repetitions" => config.scroll.repetitions = parse_int(value)?,
            _ => {}
        },
        Section::Root => {
            // No root-level keys
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin() {
        let pin = parse_pin("gpio17").unwrap();
        assert_eq!(pin.pin, 17);
        assert!(!pin.inverted);

        let pin = parse_pin("\"!gpio5\"").unwrap();
        assert_eq!(pin.pin, 5);
        assert!(pin.inverted);

        assert_eq!(parse_pin("pin5"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpioX"), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("display"), Ok(Section::Display));
        assert_eq!(parse_section_header(" spi "), Ok(Section::Spi));
        assert_eq!(parse_section_header("scroll"), Ok(Section::Scroll));
        assert_eq!(
            parse_section_header("display.extra"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_inline_comment_outside_string() {
        assert_eq!(
            parse_key_value("brightness = 4 # dim"),
            Some(("brightness", "4"))
        );
        assert_eq!(
            parse_key_value("boot_text = \"#1 FAN\""),
            Some(("boot_text", "\"#1 FAN\""))
        );
        assert_eq!(parse_key_value("brightness ="), None);
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
[display]
module_count = 8
brightness = 20      # clamped to 15
chain_order = "forward"
boot_text = "HELLO"

[spi]
mosi_pin = "gpio19"
sck_pin = "gpio18"
cs_pin = "!gpio17"
frequency_hz = 5000000

[scroll]
step_delay_ms = 30
repetitions = 3
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.module_count, 8);
        assert_eq!(config.brightness, Brightness::MAX);
        assert_eq!(config.chain_order, ChainOrder::Forward);
        assert_eq!(config.boot_text.as_deref(), Some("HELLO"));
        assert_eq!(config.spi.cs.pin, 17);
        assert!(config.spi.cs.inverted);
        assert_eq!(config.spi.frequency_hz, 5_000_000);
        assert_eq!(config.scroll.step_delay_ms, 30);
        assert_eq!(config.scroll.repetitions, 3);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[display]\nmodule_count = 2\n").unwrap();
        let defaults = DisplayConfig::default();

        assert_eq!(config.module_count, 2);
        assert_eq!(config.brightness, defaults.brightness);
        assert_eq!(config.spi, defaults.spi);
        assert_eq!(config.scroll, defaults.scroll);
        assert_eq!(config.boot_text, None);
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_config("[display]\nmodule_count = four\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\nchain_order = \"sideways\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_config("[heater]\n"), Err(ParseError::InvalidSection));

        let long = "[display]\nboot_text = \"0123456789012345678901234567890123456789012345678901234567890123456789\"\n";
        assert_eq!(parse_config(long), Err(ParseError::TextTooLong));
    }
}
