//! GPIO output wrapper
//!
//! Wraps an Embassy `Output` so the driver only sees logical levels.
//! Boards that put an inverting level shifter on LOAD set `inverted`.

use embassy_rp::gpio::{Level, Output};
use ledchain_hal::OutputPin;

/// LOAD/CS line for the matrix chain
pub struct LoadPin<'d> {
    pin: Output<'d>,
    inverted: bool,
}

impl<'d> LoadPin<'d> {
    /// Wrap an output, driving it to the logical idle (high) level
    pub fn new(mut pin: Output<'d>, inverted: bool) -> Self {
        pin.set_level(physical_level(true, inverted));
        Self { pin, inverted }
    }

    /// Release the underlying output
    pub fn into_inner(self) -> Output<'d> {
        self.pin
    }
}

impl OutputPin for LoadPin<'_> {
    fn set_high(&mut self) {
        self.pin.set_level(physical_level(true, self.inverted));
    }

    fn set_low(&mut self) {
        self.pin.set_level(physical_level(false, self.inverted));
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }
}

fn physical_level(high: bool, inverted: bool) -> Level {
    if high != inverted {
        Level::High
    } else {
        Level::Low
    }
}
