//! Board-agnostic rendering core for chained LED matrix modules
//!
//! This crate contains everything that does not depend on a specific bus
//! or chip:
//!
//! - Display state model (segment buffers and the canvas)
//! - Shift engine and column injector
//! - Scroll session and scroll driver
//! - Collaborator traits (glyph source, frame sink, cancellation)
//! - Built-in 8x8 ASCII font
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod canvas;
pub mod config;
pub mod font;
pub mod render;
pub mod scroll;
pub mod traits;

pub use canvas::{Canvas, CanvasError, Glyph, SegmentBuffer, COLUMNS, MAX_MODULES, ROWS};
pub use font::Font8x8;
pub use scroll::{ScrollDisplay, ScrollError, ScrollParams, ScrollSession};
