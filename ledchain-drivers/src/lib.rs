//! Display driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in ledchain-core for display hardware:
//!
//! - MAX7219 daisy-chained 8x8 matrix driver
//! - Logical-to-physical module mapping for the chain

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod max7219;

pub use max7219::{ChainLayout, Max7219, Max7219Error};
