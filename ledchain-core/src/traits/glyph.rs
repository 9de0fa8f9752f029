//! Glyph lookup

use crate::canvas::Glyph;

/// Maps characters to 8x8 bit patterns
///
/// Must be total: characters outside the supported set map to a fixed
/// fallback glyph rather than failing.
pub trait GlyphSource {
    /// Look up the glyph for a character
    fn glyph(&self, c: char) -> Glyph;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn glyph(&self, c: char) -> Glyph {
        (**self).glyph(c)
    }
}
