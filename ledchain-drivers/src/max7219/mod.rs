//! MAX7219 LED matrix driver (daisy-chained)
//!
//! The MAX7219 is a serially interfaced LED display driver. In matrix use
//! each chip scans one 8x8 dot matrix, one digit register per row.
//!
//! # Serial Protocol
//!
//! Every chip has a 16-bit shift register; chips are chained DOUT to DIN:
//! - One 16-bit word per chip: register address byte, then data byte
//! - Bytes are clocked MSB first, SPI mode 0, up to 10 MHz
//! - Data latches into every chip on the rising edge of LOAD (CS)
//!
//! The word for the chip furthest from the MCU is shifted out first. To
//! touch a single chip, every other chip in the same frame gets a NOOP.

pub mod driver;
pub mod layout;

pub use driver::{encode_frame, Max7219, Max7219Error, FRAME_CAPACITY};
pub use layout::ChainLayout;

/// MAX7219 register addresses
pub mod reg {
    /// No operation (used to pad frames for other chips)
    pub const NOOP: u8 = 0x00;
    /// Row 0 data; rows 1-7 follow at consecutive addresses
    pub const DIGIT0: u8 = 0x01;
    /// BCD decode mode per digit
    pub const DECODE_MODE: u8 = 0x09;
    /// Segment current (0-15)
    pub const INTENSITY: u8 = 0x0A;
    /// Number of scanned digits minus one
    pub const SCAN_LIMIT: u8 = 0x0B;
    /// Shutdown (0) or normal operation (1)
    pub const SHUTDOWN: u8 = 0x0C;
    /// Display test: all LEDs on while set
    pub const DISPLAY_TEST: u8 = 0x0F;

    /// Digit register for a display row
    pub const fn digit(row: u8) -> u8 {
        DIGIT0 + row
    }
}
