//! Scroll driver
//!
//! [`ScrollDisplay`] owns the canvas and ties the shift engine, the column
//! injector, a glyph source and a frame sink together. Every pixel-step is
//! shift, inject, flush, wait, in that order, and a flush only ever sees a
//! finished frame.

use embedded_hal::delay::DelayNs;
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

use super::session::{ColumnStep, ScrollSession};
use crate::canvas::{Canvas, CanvasError, Glyph, SegmentBuffer};
use crate::traits::{CancelToken, FrameSink, GlyphSource};

/// Errors from a scroll run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollError<E> {
    /// The frame sink failed to transmit
    Sink(E),
    /// The cancel token fired; the last complete frame stays on the display
    Cancelled,
}

impl<E> From<E> for ScrollError<E> {
    fn from(e: E) -> Self {
        ScrollError::Sink(e)
    }
}

/// Parameters for one scroll run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollParams {
    /// Requested visible segment count (clamped to the chain length)
    pub visible_segments: usize,
    /// How many times the text passes through
    pub repetitions: u32,
    /// Wait after each flushed step, in milliseconds
    pub step_delay_ms: u32,
}

impl Default for ScrollParams {
    fn default() -> Self {
        Self {
            visible_segments: usize::MAX,
            repetitions: 1,
            step_delay_ms: 50,
        }
    }
}

/// A chain of matrix modules rendering through a frame sink
pub struct ScrollDisplay<S, G> {
    canvas: Canvas,
    sink: S,
    glyphs: G,
}

impl<S: FrameSink, G: GlyphSource> ScrollDisplay<S, G> {
    /// Create a display for `module_count` chained modules
    pub fn new(sink: S, glyphs: G, module_count: usize) -> Result<Self, CanvasError> {
        Ok(Self {
            canvas: Canvas::new(module_count)?,
            sink,
            glyphs,
        })
    }

    /// Current canvas contents
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Number of modules in the chain
    pub fn module_count(&self) -> usize {
        self.canvas.len()
    }

    /// Get access to the underlying sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get mutable access to the underlying sink
    ///
    /// Used for sink-level settings such as brightness.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the display and return the sink and glyph source
    pub fn into_parts(self) -> (S, G) {
        (self.sink, self.glyphs)
    }

    /// Send the canvas to the hardware
    pub fn flush(&mut self) -> Result<(), S::Error> {
        self.sink.flush(&self.canvas)
    }

    /// Blank the canvas and the hardware
    pub fn clear(&mut self) -> Result<(), S::Error> {
        self.canvas.clear();
        self.flush()
    }

    /// Show a glyph on one segment
    ///
    /// Out-of-range indices are ignored and nothing is sent.
    pub fn show_on_segment(&mut self, segment: usize, glyph: Glyph) -> Result<(), S::Error> {
        match self.canvas.try_set_segment(segment, SegmentBuffer::from(glyph)) {
            Ok(()) => self.flush(),
            Err(_) => Ok(()),
        }
    }

    /// Show a character on the leftmost segment
    pub fn write_char(&mut self, c: char) -> Result<(), S::Error> {
        let glyph = self.glyphs.glyph(c);
        self.show_on_segment(0, glyph)
    }

    /// Set one row byte directly
    ///
    /// Out-of-range addresses are ignored and nothing is sent.
    pub fn write_row(&mut self, segment: usize, row: usize, value: u8) -> Result<(), S::Error> {
        match self.canvas.try_set_row(segment, row, value) {
            Ok(()) => self.flush(),
            Err(_) => Ok(()),
        }
    }

    /// Apply one column step to the canvas without flushing
    fn render_step(&mut self, step: ColumnStep) {
        let glyph = self.glyphs.glyph(step.character);
        self.canvas.shift_left();
        self.canvas.inject_column(&glyph, step.column);
    }

    /// Shift, inject and flush one pixel-step
    ///
    /// Returns `Ok(false)` once the session has no steps left.
    pub fn step(&mut self, session: &mut ScrollSession<'_>) -> Result<bool, S::Error> {
        match session.next_column() {
            Some(step) => {
                self.render_step(step);
                self.flush()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Scroll text across the chain, blocking between steps
    ///
    /// Clears and flushes once, then runs `len(text) * 8 * repetitions`
    /// pixel-steps. Empty text sends nothing. Returns the number of steps
    /// taken.
    pub fn scroll<D: DelayNs>(
        &mut self,
        text: &str,
        params: ScrollParams,
        delay: &mut D,
    ) -> Result<u32, S::Error> {
        if text.is_empty() {
            return Ok(0);
        }

        let mut session = ScrollSession::new(
            text,
            params.visible_segments,
            params.repetitions,
            self.canvas.len(),
        );

        self.clear()?;

        let mut steps = 0;
        while self.step(&mut session)? {
            delay.delay_ms(params.step_delay_ms);
            steps += 1;
        }

        Ok(steps)
    }

    /// Scroll text across the chain, yielding between steps
    ///
    /// Same frame sequence as [`scroll`](Self::scroll). The cancel token is
    /// checked before every pixel-step; when it fires the run stops with
    /// [`ScrollError::Cancelled`] and the last flushed frame stays up.
    pub async fn scroll_async<D, C>(
        &mut self,
        text: &str,
        params: ScrollParams,
        delay: &mut D,
        cancel: &C,
    ) -> Result<u32, ScrollError<S::Error>>
    where
        D: AsyncDelayNs,
        C: CancelToken + ?Sized,
    {
        if text.is_empty() {
            return Ok(0);
        }

        let mut session = ScrollSession::new(
            text,
            params.visible_segments,
            params.repetitions,
            self.canvas.len(),
        );

        self.clear()?;

        let mut steps = 0;
        while !session.is_finished() {
            if cancel.is_cancelled() {
                return Err(ScrollError::Cancelled);
            }
            self.step(&mut session)?;
            delay.delay_ms(params.step_delay_ms).await;
            steps += 1;
        }

        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font8x8;
    use core::cell::Cell;
    use core::convert::Infallible;
    use core::sync::atomic::{AtomicBool, Ordering};
    use embassy_futures::block_on;

    /// Records every flushed frame
    struct RecordingSink {
        frames: std::vec::Vec<Canvas>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                frames: std::vec::Vec::new(),
            }
        }
    }

    impl FrameSink for RecordingSink {
        type Error = Infallible;

        fn flush(&mut self, canvas: &Canvas) -> Result<(), Infallible> {
            self.frames.push(canvas.clone());
            Ok(())
        }
    }

    /// Fails on the nth flush
    struct FailingSink {
        flushes: u32,
        fail_at: u32,
    }

    #[derive(Debug, PartialEq, Eq)]
    struct BusDown;

    impl FrameSink for FailingSink {
        type Error = BusDown;

        fn flush(&mut self, _canvas: &Canvas) -> Result<(), BusDown> {
            self.flushes += 1;
            if self.flushes == self.fail_at {
                Err(BusDown)
            } else {
                Ok(())
            }
        }
    }

    /// Counts requested delay time
    #[derive(Default)]
    struct CountingDelay {
        calls: u32,
        total_ms: u32,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.calls += 1;
            self.total_ms += ms;
        }
    }

    impl AsyncDelayNs for CountingDelay {
        async fn delay_ns(&mut self, _ns: u32) {}

        async fn delay_ms(&mut self, ms: u32) {
            self.calls += 1;
            self.total_ms += ms;
        }
    }

    /// Fires after a fixed number of polls
    struct CancelAfter {
        polls: Cell<u32>,
        limit: u32,
    }

    impl CancelToken for CancelAfter {
        fn is_cancelled(&self) -> bool {
            let n = self.polls.get();
            self.polls.set(n + 1);
            n >= self.limit
        }
    }

    fn params(repetitions: u32) -> ScrollParams {
        ScrollParams {
            visible_segments: 4,
            repetitions,
            step_delay_ms: 10,
        }
    }

    #[test]
    fn test_scroll_flush_count() {
        let mut display = ScrollDisplay::new(RecordingSink::new(), Font8x8, 4).unwrap();
        let mut delay = CountingDelay::default();

        let steps = display.scroll("AB", params(2), &mut delay).unwrap();

        assert_eq!(steps, 32);
        // One blank frame up front plus one per step
        assert_eq!(display.sink().frames.len(), 33);
        assert!(display.sink().frames[0].is_blank());
        assert_eq!(delay.calls, 32);
        assert_eq!(delay.total_ms, 320);
    }

    #[test]
    fn test_empty_text_sends_nothing() {
        let mut display = ScrollDisplay::new(RecordingSink::new(), Font8x8, 4).unwrap();
        let mut delay = CountingDelay::default();

        assert_eq!(display.scroll("", params(3), &mut delay), Ok(0));
        assert!(display.sink().frames.is_empty());
        assert_eq!(delay.calls, 0);
    }

    #[test]
    fn test_every_frame_is_a_one_pixel_shift() {
        let mut display = ScrollDisplay::new(RecordingSink::new(), Font8x8, 3).unwrap();
        let mut delay = CountingDelay::default();
        display.scroll("Hi!", params(2), &mut delay).unwrap();

        let frames = &display.sink().frames;
        let mask = (1u128 << 24) - 1;
        let mut session = ScrollSession::new("Hi!", 3, 2, 3);

        for pair in frames.windows(2) {
            let step = session.next_column().unwrap();
            let glyph = Font8x8.glyph(step.character);
            for row in 0..8 {
                let bit = glyph.pixel(row, step.column as usize) as u128;
                let expected = ((pair[0].pixel_line(row) << 1) & mask) | bit;
                assert_eq!(pair[1].pixel_line(row), expected);
            }
        }
    }

    #[test]
    fn test_text_ends_fully_shifted_in() {
        let mut display = ScrollDisplay::new(RecordingSink::new(), Font8x8, 2).unwrap();
        let mut delay = CountingDelay::default();
        display.scroll("LT", params(1), &mut delay).unwrap();

        let canvas = display.canvas();
        assert_eq!(canvas.segment(0).unwrap().rows(), Font8x8.glyph('L').rows());
        assert_eq!(canvas.segment(1).unwrap().rows(), Font8x8.glyph('T').rows());
    }

    #[test]
    fn test_single_char_wraparound() {
        let mut display = ScrollDisplay::new(RecordingSink::new(), Font8x8, 1).unwrap();
        let mut delay = CountingDelay::default();
        display.scroll("A", params(3), &mut delay).unwrap();

        let frames = &display.sink().frames;
        let a = Font8x8.glyph('A');
        assert_eq!(frames.len(), 25);
        // After each full pass the glyph sits exactly in the segment
        for pass in 1..=3 {
            assert_eq!(frames[pass * 8].segments()[0].rows(), a.rows());
        }
    }

    #[test]
    fn test_sink_error_stops_scroll() {
        let sink = FailingSink {
            flushes: 0,
            fail_at: 5,
        };
        let mut display = ScrollDisplay::new(sink, Font8x8, 2).unwrap();
        let mut delay = CountingDelay::default();

        assert_eq!(display.scroll("OK", params(1), &mut delay), Err(BusDown));
        // Initial clear plus three good steps before the failure
        assert_eq!(delay.calls, 3);
    }

    #[test]
    fn test_scroll_async_matches_blocking() {
        let mut blocking = ScrollDisplay::new(RecordingSink::new(), Font8x8, 4).unwrap();
        blocking
            .scroll("AB", params(2), &mut CountingDelay::default())
            .unwrap();

        let mut display = ScrollDisplay::new(RecordingSink::new(), Font8x8, 4).unwrap();
        let never = AtomicBool::new(false);
        let steps = block_on(display.scroll_async(
            "AB",
            params(2),
            &mut CountingDelay::default(),
            &never,
        ))
        .unwrap();

        assert_eq!(steps, 32);
        assert_eq!(display.sink().frames, blocking.sink().frames);
    }

    #[test]
    fn test_scroll_async_cancel_between_steps() {
        let mut display = ScrollDisplay::new(RecordingSink::new(), Font8x8, 4).unwrap();
        let cancel = CancelAfter {
            polls: Cell::new(0),
            limit: 5,
        };
        let mut delay = CountingDelay::default();

        let result = block_on(display.scroll_async("HELLO", params(1), &mut delay, &cancel));

        assert_eq!(result, Err(ScrollError::Cancelled));
        assert_eq!(display.sink().frames.len(), 6);
        assert_eq!(delay.calls, 5);
    }

    #[test]
    fn test_scroll_async_already_cancelled() {
        let mut display = ScrollDisplay::new(RecordingSink::new(), Font8x8, 4).unwrap();
        let cancel = AtomicBool::new(false);
        cancel.store(true, Ordering::Release);

        let result = block_on(display.scroll_async(
            "HELLO",
            params(1),
            &mut CountingDelay::default(),
            &cancel,
        ));

        assert_eq!(result, Err(ScrollError::Cancelled));
        // Only the blank starting frame went out
        assert_eq!(display.sink().frames.len(), 1);
    }

    #[test]
    fn test_direct_writes() {
        let mut display = ScrollDisplay::new(RecordingSink::new(), Font8x8, 2).unwrap();

        display.write_char('Z').unwrap();
        assert_eq!(display.canvas().segment(0).unwrap().rows(), Font8x8.glyph('Z').rows());

        display.write_row(1, 2, 0x3C).unwrap();
        assert_eq!(display.canvas().row(1, 2), Some(0x3C));
        assert_eq!(display.sink().frames.len(), 2);

        // Out of range writes send nothing
        display.write_row(2, 0, 0xFF).unwrap();
        display.write_row(0, 8, 0xFF).unwrap();
        display.show_on_segment(7, Glyph::new([0xFF; 8])).unwrap();
        assert_eq!(display.sink().frames.len(), 2);

        display.clear().unwrap();
        assert!(display.canvas().is_blank());
        assert_eq!(display.sink().frames.len(), 3);
    }

    #[test]
    fn test_rejects_bad_module_count() {
        assert!(matches!(
            ScrollDisplay::new(RecordingSink::new(), Font8x8, 0),
            Err(CanvasError::InvalidModuleCount)
        ));
    }
}
