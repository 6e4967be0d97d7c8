//! Font metrics collaborator.
//!
//! The engine never rasterizes glyphs. It asks a [`FontMetricsProvider`] (normally backed by the
//! host's font cache) for line heights and glyph advances, and layers tab stops and hit-testing
//! on top of those answers through [`TextMeasure`].

use crate::layout::Size;
use unicode_width::UnicodeWidthChar;

/// Handle to a font owned by the host's font cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(pub u32);

/// Texture coordinates of a glyph inside the host's atlas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UvRect {
    /// Left texture coordinate.
    pub u0: f32,
    /// Top texture coordinate.
    pub v0: f32,
    /// Right texture coordinate.
    pub u1: f32,
    /// Bottom texture coordinate.
    pub v1: f32,
}

/// Placement metrics of a single glyph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    /// Horizontal pen advance.
    pub advance: f32,
    /// Offset from the pen position to the left edge of the glyph box.
    pub bearing_x: f32,
    /// Distance from the baseline up to the top edge of the glyph box.
    pub bearing_y: f32,
    /// Glyph box width (zero for glyphs without ink, e.g. spaces).
    pub width: f32,
    /// Glyph box height.
    pub height: f32,
    /// Atlas coordinates resolved by the font cache.
    pub uv: UvRect,
}

/// Source of font metrics.
pub trait FontMetricsProvider {
    /// Distance between consecutive baselines.
    fn line_height(&self, font: FontId) -> f32;

    /// Distance from the top of a line to its baseline.
    fn ascent(&self, font: FontId) -> f32;

    /// Distance from the baseline to the bottom of a line.
    fn descent(&self, font: FontId) -> f32;

    /// Metrics of one glyph.
    fn glyph_metrics(&self, font: FontId, ch: char) -> GlyphMetrics;

    /// Measure the first `char_count` characters of `text`.
    ///
    /// The default sums glyph advances; providers with kerning tables should override it.
    fn measure_string(&self, font: FontId, text: &str, char_count: usize) -> Size {
        let width = text
            .chars()
            .take(char_count)
            .map(|ch| self.glyph_metrics(font, ch).advance)
            .sum();
        Size::new(width, self.line_height(font))
    }
}

/// Measurement context: a provider, the active font and the tab width.
#[derive(Clone, Copy)]
pub struct TextMeasure<'a> {
    provider: &'a dyn FontMetricsProvider,
    font: FontId,
    tab_width: usize,
}

impl<'a> TextMeasure<'a> {
    /// Create a measurement context. `tab_width` is in spaces and clamped to at least 1.
    pub fn new(provider: &'a dyn FontMetricsProvider, font: FontId, tab_width: usize) -> Self {
        Self {
            provider,
            font,
            tab_width: tab_width.max(1),
        }
    }

    /// Active font.
    pub fn font(&self) -> FontId {
        self.font
    }

    /// Underlying provider.
    pub fn provider(&self) -> &'a dyn FontMetricsProvider {
        self.provider
    }

    /// Height of every line.
    pub fn line_height(&self) -> f32 {
        self.provider.line_height(self.font)
    }

    /// Width of a whole line of text.
    pub fn width(&self, text: &str) -> f32 {
        self.prefix_width(text, usize::MAX)
    }

    /// Width of the first `chars` characters of `text`, honoring tab stops.
    pub fn prefix_width(&self, text: &str, chars: usize) -> f32 {
        let mut x = 0.0;
        let mut remaining = chars;

        for (i, segment) in text.split('\t').enumerate() {
            if i > 0 {
                if remaining == 0 {
                    break;
                }
                x = self.next_tab_stop(x);
                remaining -= 1;
            }

            let take = segment.chars().count().min(remaining);
            if take > 0 {
                x += self.provider.measure_string(self.font, segment, take).width;
            }
            remaining -= take;
        }

        x
    }

    /// Pen position after a tab typed at `x`.
    pub fn next_tab_stop(&self, x: f32) -> f32 {
        let stop = self.tab_width as f32 * self.provider.glyph_metrics(self.font, ' ').advance;
        if stop <= 0.0 {
            return x;
        }
        ((x / stop).floor() + 1.0) * stop
    }

    /// Advance of `ch` when the pen is at `pen_x`.
    pub fn advance_at(&self, ch: char, pen_x: f32) -> f32 {
        if ch == '\t' {
            self.next_tab_stop(pen_x) - pen_x
        } else {
            self.provider.glyph_metrics(self.font, ch).advance
        }
    }

    /// Character index under `x` (line-local pixels).
    ///
    /// Scans glyph advances; the hit character is the first one whose advance midpoint lies to
    /// the right of `x`. Positions past the last midpoint resolve to the end of the line.
    pub fn hit_test(&self, text: &str, x: f32) -> usize {
        let mut pen = 0.0;
        let mut count = 0;

        for (i, ch) in text.chars().enumerate() {
            let next = pen + self.advance_at(ch, pen);
            if x < (pen + next) * 0.5 {
                return i;
            }
            pen = next;
            count = i + 1;
        }

        count
    }
}

/// Cell-based reference provider.
///
/// Every character occupies `cell_width` pixels per terminal cell as reported by `unicode-width`
/// (CJK and emoji take two cells, combining marks none). Useful for headless hosts and tests.
/// UVs address a 16x8 grid atlas of the printable ASCII range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Width of one cell.
    pub cell_width: f32,
    /// Line height.
    pub line_height: f32,
    /// Ascent (the remainder of the line height is descent).
    pub ascent: f32,
}

impl MonospaceMetrics {
    /// Create a provider with the given cell width and line height. Ascent is 80% of the line.
    pub fn new(cell_width: f32, line_height: f32) -> Self {
        Self {
            cell_width,
            line_height,
            ascent: line_height * 0.8,
        }
    }

    fn ascii_uv(ch: char) -> UvRect {
        let code = ch as u32;
        if !(0x20..0x80).contains(&code) {
            return UvRect::default();
        }
        let index = code - 0x20;
        let (col, row) = ((index % 16) as f32, (index / 16) as f32);
        UvRect {
            u0: col / 16.0,
            v0: row / 8.0,
            u1: (col + 1.0) / 16.0,
            v1: (row + 1.0) / 8.0,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl FontMetricsProvider for MonospaceMetrics {
    fn line_height(&self, _font: FontId) -> f32 {
        self.line_height
    }

    fn ascent(&self, _font: FontId) -> f32 {
        self.ascent
    }

    fn descent(&self, _font: FontId) -> f32 {
        self.line_height - self.ascent
    }

    fn glyph_metrics(&self, _font: FontId, ch: char) -> GlyphMetrics {
        let advance = ch.width().unwrap_or(0) as f32 * self.cell_width;
        if ch.is_whitespace() {
            return GlyphMetrics {
                advance,
                ..GlyphMetrics::default()
            };
        }

        GlyphMetrics {
            advance,
            bearing_x: 0.0,
            bearing_y: self.ascent,
            width: advance,
            height: self.line_height,
            uv: Self::ascii_uv(ch),
        }
    }
}
