//! Scroll session state
//!
//! A session walks a text string one glyph column at a time. The number of
//! repetitions only determines the total step count; once the last
//! character's last column has been produced the cursor wraps back to the
//! first character without a gap.

use core::str::Chars;

use crate::canvas::COLUMNS;

/// One pixel-step worth of input for the injector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColumnStep {
    /// Character whose glyph supplies the column
    pub character: char,
    /// Column within that glyph (0 = leftmost)
    pub column: u8,
}

/// Transient state of one scroll invocation
#[derive(Debug, Clone)]
pub struct ScrollSession<'a> {
    text: &'a str,
    cursor: Chars<'a>,
    current: Option<char>,
    column: u8,
    visible_segments: usize,
    total_steps: u32,
    remaining: u32,
}

impl<'a> ScrollSession<'a> {
    /// Start a session
    ///
    /// `visible_segments` is clamped to `module_count`. An empty text gives
    /// a session with zero steps.
    pub fn new(text: &'a str, visible_segments: usize, repetitions: u32, module_count: usize) -> Self {
        let char_count = text.chars().count() as u32;
        let total_steps = char_count
            .saturating_mul(COLUMNS as u32)
            .saturating_mul(repetitions);

        let mut cursor = text.chars();
        let current = cursor.next();

        Self {
            text,
            cursor,
            current,
            column: 0,
            visible_segments: visible_segments.min(module_count),
            total_steps,
            remaining: total_steps,
        }
    }

    /// Text being scrolled
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Requested visible segment count after clamping
    pub fn visible_segments(&self) -> usize {
        self.visible_segments
    }

    /// Total pixel-steps for the whole session
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Pixel-steps not yet taken
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Check whether every step has been taken
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Take the next step
    ///
    /// Returns the character and glyph column to inject, advancing the
    /// column offset and wrapping the text cursor as needed.
    pub fn next_column(&mut self) -> Option<ColumnStep> {
        if self.remaining == 0 {
            return None;
        }
        let character = self.current?;
        let step = ColumnStep {
            character,
            column: self.column,
        };

        self.remaining -= 1;
        self.column += 1;
        if self.column as usize >= COLUMNS {
            self.column = 0;
            self.advance_char();
        }

        Some(step)
    }

    fn advance_char(&mut self) {
        self.current = match self.cursor.next() {
            Some(c) => Some(c),
            None => {
                // Wrap to the start of the text
                self.cursor = self.text.chars();
                self.cursor.next()
            }
        };
    }
}

impl Iterator for ScrollSession<'_> {
    type Item = ColumnStep;

    fn next(&mut self) -> Option<ColumnStep> {
        self.next_column()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}
