//! Collaborator traits
//!
//! These traits define the seams between the rendering core and the
//! outside world: where glyphs come from, where finished frames go, and
//! how a running scroll learns it should stop.

pub mod cancel;
pub mod glyph;
pub mod sink;

pub use cancel::{CancelToken, NeverCancel};
pub use glyph::GlyphSource;
pub use sink::FrameSink;
