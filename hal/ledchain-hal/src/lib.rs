//! Ledchain Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the matrix driver is written
//! against. Chip-specific HALs implement them so the same driver and core
//! logic run on any board that has an SPI master and a spare GPIO.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ledchain-drivers (MAX7219 chain)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledchain-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ ledchain-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (chip select / load line)
//! - [`spi::SpiBus`] - SPI bus write operations

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use spi::{BitOrder, Mode, SpiBus, SpiConfig};
