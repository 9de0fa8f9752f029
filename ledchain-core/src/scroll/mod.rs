//! Text scrolling
//!
//! - [`ScrollSession`] - step counting, column offsets, text wraparound
//! - [`ScrollDisplay`] - the shift/inject/flush/wait loop over a canvas

pub mod display;
pub mod session;

pub use display::{ScrollDisplay, ScrollError, ScrollParams};
pub use session::{ColumnStep, ScrollSession};
