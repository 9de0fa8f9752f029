//! Feeding glyph columns into the trailing segment

use crate::canvas::{Canvas, Glyph, COLUMNS, ROWS};

/// Extract one pixel column of a glyph as 8 row bits
///
/// Bit `r` of the result is the pixel in row `r`. Offset 0 is the glyph's
/// leftmost column; offsets past the cell yield an empty column.
pub fn glyph_column(glyph: &Glyph, column_offset: u8) -> u8 {
    let column = column_offset as usize;
    if column >= COLUMNS {
        return 0;
    }

    glyph
        .rows()
        .iter()
        .enumerate()
        .fold(0u8, |bits, (row, &byte)| {
            bits | (((byte >> (COLUMNS - 1 - column)) & 0x01) << row)
        })
}

/// Write one glyph column into the rightmost pixel column of the strip
///
/// Only the LSB of each trailing-segment row changes.
pub fn inject_column(canvas: &mut Canvas, glyph: &Glyph, column_offset: u8) {
    let column = glyph_column(glyph, column_offset);
    let trailing = canvas.trailing_mut();

    for row in 0..ROWS {
        if (column >> row) & 0x01 != 0 {
            trailing[row] |= 0b0000_0001;
        } else {
            trailing[row] &= !0b0000_0001;
        }
    }
}

impl Canvas {
    /// Write one glyph column into the trailing segment's LSBs
    pub fn inject_column(&mut self, glyph: &Glyph, column_offset: u8) {
        inject_column(self, glyph, column_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SegmentBuffer;
    use proptest::prelude::*;

    const ARROW: Glyph = Glyph::new([
        0b0001_1000,
        0b0011_1100,
        0b0111_1110,
        0b1111_1111,
        0b0001_1000,
        0b0001_1000,
        0b0001_1000,
        0b0000_0000,
    ]);

    #[test]
    fn test_glyph_column_reads_left_to_right() {
        // Leftmost column only has the row 3 pixel
        assert_eq!(glyph_column(&ARROW, 0), 0b0000_1000);
        // Centre column is set from row 0 down to row 6
        assert_eq!(glyph_column(&ARROW, 3), 0b0111_1111);
        assert_eq!(glyph_column(&ARROW, 8), 0);
    }

    #[test]
    fn test_inject_only_touches_trailing_lsb() {
        let mut canvas = Canvas::new(2).unwrap();
        canvas.set_segment(0, SegmentBuffer::from_rows([0xFF; 8]));
        canvas.set_segment(1, SegmentBuffer::from_rows([0xF0; 8]));

        inject_column(&mut canvas, &Glyph::new([0x80; 8]), 0);

        assert_eq!(canvas.segment(0).unwrap().rows(), &[0xFF; 8]);
        assert_eq!(canvas.segment(1).unwrap().rows(), &[0xF1; 8]);

        // An empty column clears the LSB again
        inject_column(&mut canvas, &Glyph::BLANK, 0);
        assert_eq!(canvas.segment(1).unwrap().rows(), &[0xF0; 8]);
    }

    #[test]
    fn test_glyph_round_trip_single_segment() {
        let mut canvas = Canvas::new(1).unwrap();

        for offset in 0..COLUMNS as u8 {
            canvas.shift_left();
            canvas.inject_column(&ARROW, offset);
        }

        assert_eq!(canvas.segment(0).unwrap().rows(), ARROW.rows());
    }

    proptest! {
        #[test]
        fn prop_glyph_round_trip(rows in any::<[u8; ROWS]>(), modules in 1usize..=8) {
            let glyph = Glyph::new(rows);
            let mut canvas = Canvas::new(modules).unwrap();

            for offset in 0..COLUMNS as u8 {
                canvas.shift_left();
                canvas.inject_column(&glyph, offset);
            }

            prop_assert_eq!(canvas.trailing().rows(), glyph.rows());
            for segment in &canvas.segments()[..modules - 1] {
                prop_assert!(segment.is_blank());
            }
        }

        #[test]
        fn prop_injected_bit_fills_vacated_pixel(
            rows in any::<[u8; ROWS]>(),
            offset in 0u8..8,
            modules in 1usize..=4,
        ) {
            let glyph = Glyph::new(rows);
            let mut canvas = Canvas::new(modules).unwrap();
            canvas.set_segment(0, SegmentBuffer::from_rows([0x5A; 8]));
            let before: [u128; ROWS] = core::array::from_fn(|r| canvas.pixel_line(r));

            canvas.shift_left();
            canvas.inject_column(&glyph, offset);

            let width = canvas.width() as u32;
            let mask = (1u128 << width) - 1;
            for row in 0..ROWS {
                let bit = glyph.pixel(row, offset as usize) as u128;
                prop_assert_eq!(canvas.pixel_line(row), ((before[row] << 1) & mask) | bit);
            }
        }
    }
}
