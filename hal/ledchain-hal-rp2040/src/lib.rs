//! RP2040-specific HAL for the matrix firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `ledchain-hal` traits:
//!
//! - Blocking SPI master (implements `ledchain_hal::SpiBus`)
//! - LOAD/CS output with optional inversion (implements `ledchain_hal::OutputPin`)
//! - Pinout checks for config-driven SPI wiring

#![no_std]

pub mod gpio;
pub mod pins;
pub mod spi;

pub use gpio::LoadPin;
pub use pins::{check_pinout, PinError};
pub use spi::{BlockingSpi, SpiError};

// Re-export shared traits from ledchain-hal for convenience
pub use ledchain_hal::{OutputPin as OutputPinTrait, SpiBus as SpiBusTrait};
