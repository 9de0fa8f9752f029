//! Configuration loading and parsing
//!
//! The display configuration is compiled into the firmware from
//! `display.toml` and parsed at start-up by a small no_std parser.

pub mod toml;

pub use toml::{parse_config, ParseError};
