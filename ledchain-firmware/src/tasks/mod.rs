//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod scroll;

pub use scroll::{scroll_task, MatrixDisplay};
