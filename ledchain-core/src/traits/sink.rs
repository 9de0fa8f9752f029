//! Frame output

use crate::canvas::Canvas;

/// Receives fully rendered canvases
///
/// Implementations transmit each segment buffer to its physical module.
/// A flush is only ever called between pixel-steps, so the canvas passed
/// in is always a complete, continuous frame.
pub trait FrameSink {
    /// Error type for transmission failures
    type Error;

    /// Transmit the whole canvas to the hardware
    fn flush(&mut self, canvas: &Canvas) -> Result<(), Self::Error>;
}

impl<T: FrameSink + ?Sized> FrameSink for &mut T {
    type Error = T::Error;

    fn flush(&mut self, canvas: &Canvas) -> Result<(), Self::Error> {
        (**self).flush(canvas)
    }
}
