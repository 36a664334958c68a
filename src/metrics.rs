//! Glyph and font metrics, and the style interface the layout engine
//! resolves text through.
//!
//! Metrics are expressed in font design units; the layout engine scales them
//! to user space with `point_size / units_per_em`. A [FontMetrics] value also
//! carries a `font_id` so runs spanning several fonts can tell their metrics
//! apart.

use tinyvec::TinyVec;

/// Per-glyph metrics in design units.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GlyphMetrics {
    pub advance_width: f32,
    pub advance_height: f32,
    pub bearing_x: f32,
    pub bearing_y: f32,
}

/// Font-wide metrics in design units.
///
/// `descender` is negative, following the `hhea` convention of measuring
/// downwards from the baseline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: f32,
    pub ascender: f32,
    pub descender: f32,
    pub line_height: f32,
    pub font_id: usize,
}

/// A font as the layout engine sees it: glyph resolution plus metrics.
///
/// `resolve` maps a code point to the glyphs that represent it — usually one,
/// but one-to-many substitutions leave several in the slot. `None` means the
/// font has no glyph for the code point and layout skips it.
pub trait FontSource {
    fn font_metrics(&self) -> FontMetrics;
    fn resolve(&self, codepoint: char, cp_index: usize) -> Option<TinyVec<[u16; 1]>>;
    fn glyph_metrics(&self, glyph_id: u16) -> GlyphMetrics;
}

/// The style in effect over a contiguous range of code points.
pub struct AppliedStyle<'a> {
    pub point_size: f32,
    /// First code point index the style covers.
    pub start: usize,
    /// One past the last code point index the style covers.
    pub end: usize,
    pub font: &'a dyn FontSource,
}

impl AppliedStyle<'_> {
    pub fn covers(&self, cp_index: usize) -> bool {
        self.start <= cp_index && cp_index < self.end
    }
}

/// Maps a code point index to the style applying there.
pub trait StyleProvider {
    fn style(&self, cp_index: usize, total_cp_count: usize) -> AppliedStyle<'_>;
}
