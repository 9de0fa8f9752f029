//! Scroll task
//!
//! Sole owner of the display. Takes requests off the channel one at a
//! time and scrolls each through the chain; a new submission cancels the
//! running scroll between two pixel-steps.

use defmt::*;
use embassy_rp::peripherals::SPI0;
use embassy_time::Delay;

use ledchain_core::{Font8x8, ScrollDisplay, ScrollError};
use ledchain_drivers::Max7219;
use ledchain_hal_rp2040::{BlockingSpi, LoadPin};

use crate::channels::{SignalCancel, SCROLL_CANCEL, SCROLL_REQUESTS};

/// The concrete display driven by this board
pub type MatrixDisplay =
    ScrollDisplay<Max7219<BlockingSpi<'static, SPI0>, LoadPin<'static>>, Font8x8>;

/// Scroll task - renders queued text
#[embassy_executor::task]
pub async fn scroll_task(mut display: MatrixDisplay) {
    info!("Scroll task started ({} modules)", display.module_count());

    let mut delay = Delay;
    let cancel = SignalCancel(&SCROLL_CANCEL);

    loop {
        let request = SCROLL_REQUESTS.receive().await;
        // A cancel raised before this request was taken targets the old one
        SCROLL_CANCEL.reset();

        let params = request.params(display.module_count());
        debug!(
            "Scrolling {} chars x{} at {}ms/step",
            request.text.chars().count(),
            params.repetitions,
            params.step_delay_ms
        );

        match display
            .scroll_async(request.text.as_str(), params, &mut delay, &cancel)
            .await
        {
            Ok(steps) => info!("Scroll finished after {} steps", steps),
            Err(ScrollError::Cancelled) => info!("Scroll cancelled"),
            Err(ScrollError::Sink(e)) => error!("Display write failed: {:?}", e),
        }
    }
}
