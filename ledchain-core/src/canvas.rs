//! Display state model
//!
//! A [`Canvas`] is the in-memory image of the whole chain: one
//! [`SegmentBuffer`] per physical module, ordered left to right.
//!
//! Every buffer holds 8 row bytes. Bit 7 of a row byte is the leftmost
//! pixel of that row on its module, bit 0 the rightmost. Reading row `r`
//! across segments `0..N` MSB-first gives one continuous pixel line.

use core::ops::{Index, IndexMut};

use heapless::Vec;

/// Rows per module (and per glyph)
pub const ROWS: usize = 8;

/// Pixel columns per module (and per glyph)
pub const COLUMNS: usize = 8;

/// Maximum number of chained modules
///
/// Bounded so a full pixel line fits in a `u128`.
pub const MAX_MODULES: usize = 16;

/// Canvas addressing and construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasError {
    /// Module count outside `1..=MAX_MODULES`
    InvalidModuleCount,
    /// Segment index beyond the end of the chain
    SegmentOutOfRange,
    /// Row index outside `0..8`
    RowOutOfRange,
}

/// Fixed 8x8 bit pattern for one character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph([u8; ROWS]);

impl Glyph {
    /// All pixels off
    pub const BLANK: Glyph = Glyph([0; ROWS]);

    /// Create a glyph from its row bytes (top row first)
    pub const fn new(rows: [u8; ROWS]) -> Self {
        Self(rows)
    }

    /// Row bytes, top row first
    pub const fn rows(&self) -> &[u8; ROWS] {
        &self.0
    }

    /// Pixel at `(row, column)`, column 0 being the leftmost
    ///
    /// Positions outside the cell read as off.
    pub fn pixel(&self, row: usize, column: usize) -> bool {
        if row >= ROWS || column >= COLUMNS {
            return false;
        }
        (self.0[row] >> (COLUMNS - 1 - column)) & 0x01 != 0
    }
}

impl From<[u8; ROWS]> for Glyph {
    fn from(rows: [u8; ROWS]) -> Self {
        Self(rows)
    }
}

/// Pixel state of one physical module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentBuffer {
    rows: [u8; ROWS],
}

impl SegmentBuffer {
    /// Create an all-off buffer
    pub const fn new() -> Self {
        Self { rows: [0; ROWS] }
    }

    /// Create a buffer from row bytes
    pub const fn from_rows(rows: [u8; ROWS]) -> Self {
        Self { rows }
    }

    /// Row bytes, top row first
    pub const fn rows(&self) -> &[u8; ROWS] {
        &self.rows
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.rows = [0; ROWS];
    }

    /// Check whether every pixel is off
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }
}

impl From<Glyph> for SegmentBuffer {
    fn from(glyph: Glyph) -> Self {
        Self { rows: glyph.0 }
    }
}

impl Index<usize> for SegmentBuffer {
    type Output = u8;

    fn index(&self, row: usize) -> &u8 {
        &self.rows[row]
    }
}

impl IndexMut<usize> for SegmentBuffer {
    fn index_mut(&mut self, row: usize) -> &mut u8 {
        &mut self.rows[row]
    }
}

/// The whole scrolling strip
///
/// Index 0 is the leftmost module (first to scroll off), the last index is
/// the trailing module where new columns enter. The module count is fixed
/// when the canvas is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    segments: Vec<SegmentBuffer, MAX_MODULES>,
}

impl Canvas {
    /// Create a blank canvas for a chain of `module_count` modules
    pub fn new(module_count: usize) -> Result<Self, CanvasError> {
        if module_count == 0 || module_count > MAX_MODULES {
            return Err(CanvasError::InvalidModuleCount);
        }

        let mut segments = Vec::new();
        for _ in 0..module_count {
            // Capacity checked above
            let _ = segments.push(SegmentBuffer::new());
        }

        Ok(Self { segments })
    }

    /// Number of modules in the chain
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a canvas has at least one module
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Strip width in pixels
    pub fn width(&self) -> usize {
        self.segments.len() * COLUMNS
    }

    /// All segment buffers, leftmost first
    pub fn segments(&self) -> &[SegmentBuffer] {
        &self.segments
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [SegmentBuffer] {
        &mut self.segments
    }

    /// Get one segment buffer
    pub fn segment(&self, index: usize) -> Option<&SegmentBuffer> {
        self.segments.get(index)
    }

    /// Index of the trailing (rightmost) segment
    pub fn trailing_index(&self) -> usize {
        self.segments.len() - 1
    }

    /// The trailing (rightmost) segment
    pub fn trailing(&self) -> &SegmentBuffer {
        &self.segments[self.trailing_index()]
    }

    pub(crate) fn trailing_mut(&mut self) -> &mut SegmentBuffer {
        let last = self.trailing_index();
        &mut self.segments[last]
    }

    /// Read one row byte
    pub fn row(&self, segment: usize, row: usize) -> Option<u8> {
        if row >= ROWS {
            return None;
        }
        self.segments.get(segment).map(|s| s[row])
    }

    /// Write one row byte
    ///
    /// Out-of-range addresses are ignored.
    pub fn set_row(&mut self, segment: usize, row: usize, value: u8) {
        let _ = self.try_set_row(segment, row, value);
    }

    /// Write one row byte, reporting out-of-range addresses
    pub fn try_set_row(&mut self, segment: usize, row: usize, value: u8) -> Result<(), CanvasError> {
        if row >= ROWS {
            return Err(CanvasError::RowOutOfRange);
        }
        let buffer = self
            .segments
            .get_mut(segment)
            .ok_or(CanvasError::SegmentOutOfRange)?;
        buffer[row] = value;
        Ok(())
    }

    /// Replace a whole segment
    ///
    /// Out-of-range indices are ignored.
    pub fn set_segment(&mut self, segment: usize, data: SegmentBuffer) {
        let _ = self.try_set_segment(segment, data);
    }

    /// Replace a whole segment, reporting out-of-range indices
    pub fn try_set_segment(&mut self, segment: usize, data: SegmentBuffer) -> Result<(), CanvasError> {
        let buffer = self
            .segments
            .get_mut(segment)
            .ok_or(CanvasError::SegmentOutOfRange)?;
        *buffer = data;
        Ok(())
    }

    /// Turn every pixel of every segment off
    pub fn clear(&mut self) {
        for segment in self.segments.iter_mut() {
            segment.clear();
        }
    }

    /// Check whether every pixel is off
    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(SegmentBuffer::is_blank)
    }

    /// One full pixel row across the chain
    ///
    /// Segment 0's MSB ends up in the highest used bit; the trailing
    /// segment's LSB is bit 0. Returns 0 for rows outside `0..8`.
    pub fn pixel_line(&self, row: usize) -> u128 {
        if row >= ROWS {
            return 0;
        }
        self.segments
            .iter()
            .fold(0u128, |line, segment| (line << COLUMNS) | segment[row] as u128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_module_count() {
        assert_eq!(Canvas::new(0), Err(CanvasError::InvalidModuleCount));
        assert_eq!(
            Canvas::new(MAX_MODULES + 1),
            Err(CanvasError::InvalidModuleCount)
        );

        let canvas = Canvas::new(4).unwrap();
        assert_eq!(canvas.len(), 4);
        assert_eq!(canvas.width(), 32);
        assert_eq!(canvas.trailing_index(), 3);
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_set_row_out_of_range_is_ignored() {
        let mut canvas = Canvas::new(2).unwrap();
        canvas.set_row(2, 0, 0xFF);
        canvas.set_row(0, 8, 0xFF);
        assert!(canvas.is_blank());

        canvas.set_row(1, 7, 0xA5);
        assert_eq!(canvas.row(1, 7), Some(0xA5));
        assert_eq!(canvas.row(1, 8), None);
        assert_eq!(canvas.row(2, 0), None);
    }

    #[test]
    fn test_try_set_reports_errors() {
        let mut canvas = Canvas::new(2).unwrap();
        assert_eq!(
            canvas.try_set_row(5, 0, 1),
            Err(CanvasError::SegmentOutOfRange)
        );
        assert_eq!(canvas.try_set_row(0, 9, 1), Err(CanvasError::RowOutOfRange));
        assert_eq!(
            canvas.try_set_segment(2, SegmentBuffer::new()),
            Err(CanvasError::SegmentOutOfRange)
        );
        assert!(canvas.try_set_segment(1, SegmentBuffer::from_rows([1; 8])).is_ok());
        assert_eq!(canvas.segment(1).unwrap().rows(), &[1; 8]);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut canvas = Canvas::new(3).unwrap();
        canvas.set_segment(0, SegmentBuffer::from_rows([0xFF; 8]));
        canvas.set_row(2, 3, 0x18);

        canvas.clear();
        let once = canvas.clone();
        canvas.clear();

        assert!(canvas.is_blank());
        assert_eq!(canvas, once);
    }

    #[test]
    fn test_pixel_line_concatenates_segments() {
        let mut canvas = Canvas::new(3).unwrap();
        canvas.set_row(0, 4, 0x80);
        canvas.set_row(1, 4, 0x01);
        canvas.set_row(2, 4, 0xF0);

        assert_eq!(canvas.pixel_line(4), 0x80_01_F0);
        assert_eq!(canvas.pixel_line(3), 0);
        assert_eq!(canvas.pixel_line(8), 0);
    }

    #[test]
    fn test_glyph_pixels() {
        let glyph = Glyph::new([0x80, 0x01, 0, 0, 0, 0, 0, 0xFF]);
        assert!(glyph.pixel(0, 0));
        assert!(!glyph.pixel(0, 1));
        assert!(glyph.pixel(1, 7));
        assert!(glyph.pixel(7, 3));
        assert!(!glyph.pixel(8, 0));
        assert!(!glyph.pixel(0, 8));

        let segment = SegmentBuffer::from(glyph);
        assert_eq!(segment.rows(), glyph.rows());
    }
}
