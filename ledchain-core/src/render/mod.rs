//! Per-tick rendering operations
//!
//! Each scroll step is a [`shift_left`] of the whole strip followed by an
//! [`inject_column`] into the trailing segment. Both are total over a
//! well-formed [`Canvas`](crate::canvas::Canvas) and never fail.

pub mod inject;
pub mod shift;

pub use inject::{glyph_column, inject_column};
pub use shift::shift_left;
