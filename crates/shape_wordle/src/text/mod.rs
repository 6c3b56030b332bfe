//! Text measurement interface consumed by the layout.
//!
//! The layout never shapes text itself; it asks a [`TextMeasure`] implementation for advance
//! widths and ink extents. [`MeasureCache`] memoizes any measurer, and
//! [`FixedAdvanceMetrics`] is a deterministic measurer for tests and demos.
pub mod cache;

pub use cache::MeasureCache;

/// Ink extent of a rendered string.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextExtent {
    /// Height from the topmost to the bottommost inked row.
    pub height: f32,
    /// Advance width.
    pub width: f32,
    /// Inked rows below the baseline.
    pub descent: f32,
}

/// Source of text metrics. Both queries must be pure functions of their inputs.
pub trait TextMeasure {
    /// Advance width of `text` at `font_size` pixels.
    fn measure_width(&self, text: &str, font_size: f32, font_family: &str) -> f32;

    /// Ink height, advance width and descent of `text` at `font_size` pixels.
    fn measure_extent(&self, font_size: f32, font_family: &str, text: &str) -> TextExtent;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure_width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        (**self).measure_width(text, font_size, font_family)
    }

    fn measure_extent(&self, font_size: f32, font_family: &str, text: &str) -> TextExtent {
        (**self).measure_extent(font_size, font_family, text)
    }
}

/// Monospaced metrics with three glyph classes (x-height, ascender, descender).
///
/// Ignores the font family. Useful wherever a real font rasterizer is unavailable.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvanceMetrics {
    /// Advance width as a fraction of the font size.
    pub advance: f32,
    /// Height of short lowercase glyphs as a fraction of the font size.
    pub x_height: f32,
    /// Height of tall glyphs as a fraction of the font size.
    pub ascent: f32,
    /// Depth below the baseline of descending glyphs as a fraction of the font size.
    pub descent: f32,
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            x_height: 0.5,
            ascent: 0.7,
            descent: 0.2,
        }
    }
}

impl FixedAdvanceMetrics {
    fn glyph_top(&self, c: char) -> f32 {
        if c.is_lowercase() && !"bdfhiklt".contains(c) {
            self.x_height
        } else {
            self.ascent
        }
    }

    fn glyph_bottom(&self, c: char) -> f32 {
        if "gjpqy".contains(c) {
            self.descent
        } else {
            0.0
        }
    }
}

impl TextMeasure for FixedAdvanceMetrics {
    fn measure_width(&self, text: &str, font_size: f32, _font_family: &str) -> f32 {
        text.chars().count() as f32 * self.advance * font_size
    }

    fn measure_extent(&self, font_size: f32, font_family: &str, text: &str) -> TextExtent {
        let top = text.chars().map(|c| self.glyph_top(c)).fold(0.0, f32::max);
        let bottom = text.chars().map(|c| self.glyph_bottom(c)).fold(0.0, f32::max);
        TextExtent {
            height: ((top + bottom) * font_size).round(),
            width: self.measure_width(text, font_size, font_family),
            descent: (bottom * font_size).round(),
        }
    }
}
