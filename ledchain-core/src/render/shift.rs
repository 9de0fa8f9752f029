//! One-pixel horizontal shift across chained segments
//!
//! Each row byte behaves like one stage of a long shift register. Moving
//! the strip left means every byte shifts towards its MSB and the bit that
//! falls out of segment `i + 1` lands in the LSB of segment `i`.

use crate::canvas::{Canvas, ROWS};

/// MSB of a row byte (leftmost pixel of a module)
const OUTGOING_BIT: u8 = 0b1000_0000;

/// LSB of a row byte (rightmost pixel of a module)
const INCOMING_BIT: u8 = 0b0000_0001;

/// Shift every row of the canvas one pixel to the left
///
/// The leftmost pixel column is discarded. The rightmost pixel column of
/// the trailing segment is left at 0 for the injector to fill.
pub fn shift_left(canvas: &mut Canvas) {
    let segments = canvas.segments_mut();

    for row in 0..ROWS {
        let mut carry = false;

        // Trailing to leading, so each segment receives the bit its
        // right-hand neighbour just pushed out.
        for segment in segments.iter_mut().rev() {
            let byte = &mut segment[row];
            let shifted_out = *byte & OUTGOING_BIT != 0;

            *byte <<= 1;
            if carry {
                *byte |= INCOMING_BIT;
            }

            carry = shifted_out;
        }
    }
}

impl Canvas {
    /// Shift the whole strip one pixel to the left
    pub fn shift_left(&mut self) {
        shift_left(self);
    }
}
