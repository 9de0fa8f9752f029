//! Scroll cancellation

use core::sync::atomic::{AtomicBool, Ordering};

/// Polled once per pixel-step by a cancellable scroll
pub trait CancelToken {
    /// Check whether the running scroll should stop
    fn is_cancelled(&self) -> bool;
}

/// Token that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancelToken for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl<T: CancelToken + ?Sized> CancelToken for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}
