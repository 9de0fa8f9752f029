//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::String;

use ledchain_core::config::{ScrollConfig, MAX_TEXT_LEN};
use ledchain_core::traits::CancelToken;
use ledchain_core::ScrollParams;

/// Channel capacity for pending scroll requests
const SCROLL_CHANNEL_SIZE: usize = 4;

/// One text to scroll
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollRequest {
    /// Text to scroll
    pub text: String<MAX_TEXT_LEN>,
    /// Passes of the text
    pub repetitions: u32,
    /// Wait between pixel-steps in milliseconds
    pub step_delay_ms: u32,
}

impl ScrollRequest {
    /// Build a request using the configured scroll defaults
    pub fn new(text: String<MAX_TEXT_LEN>, defaults: &ScrollConfig) -> Self {
        Self {
            text,
            repetitions: defaults.repetitions,
            step_delay_ms: defaults.step_delay_ms,
        }
    }

    /// Scroll parameters for a chain of `module_count` modules
    pub fn params(&self, module_count: usize) -> ScrollParams {
        ScrollParams {
            visible_segments: module_count,
            repetitions: self.repetitions,
            step_delay_ms: self.step_delay_ms,
        }
    }
}

/// Texts waiting to be scrolled
pub static SCROLL_REQUESTS: Channel<CriticalSectionRawMutex, ScrollRequest, SCROLL_CHANNEL_SIZE> =
    Channel::new();

/// Signal that the running scroll should stop at the next step
pub static SCROLL_CANCEL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Cancel token backed by a [`Signal`]
pub struct SignalCancel<'a>(pub &'a Signal<CriticalSectionRawMutex, ()>);

impl CancelToken for SignalCancel<'_> {
    fn is_cancelled(&self) -> bool {
        self.0.signaled()
    }
}

/// Queue a text, interrupting whatever is scrolling now
pub async fn submit(request: ScrollRequest) {
    SCROLL_CANCEL.signal(());
    SCROLL_REQUESTS.send(request).await;
}
