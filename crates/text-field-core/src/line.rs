//! A single line of text with cached pixel extents.

use crate::metrics::TextMeasure;

/// Pixel extent of a character range inside a line, relative to the line's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineSpan {
    /// `end_px - start_px`.
    pub width: f32,
    /// Width of the text before the range start.
    pub start_px: f32,
    /// Width of the text before the range end.
    pub end_px: f32,
}

/// One line of text (never containing `'\n'`) plus its measured size.
///
/// Width and height are recomputed eagerly whenever the content changes, so they are never
/// stale relative to the measurement context they were last computed with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLine {
    text: String,
    char_count: usize,
    width: f32,
    height: f32,
}

impl TextLine {
    /// Create a measured line.
    pub fn new(text: impl Into<String>, measure: &TextMeasure<'_>) -> Self {
        let mut line = Self::default();
        line.set_text(text, measure);
        line
    }

    /// Line content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters (codepoints).
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Whether the line has no characters.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cached width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Cached height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Replace the content and re-measure.
    pub fn set_text(&mut self, text: impl Into<String>, measure: &TextMeasure<'_>) {
        self.text = text.into();
        debug_assert!(!self.text.contains('\n'), "TextLine must not contain newlines");
        self.remeasure(measure);
    }

    /// Recompute the cached size (after a font or tab width change).
    pub fn remeasure(&mut self, measure: &TextMeasure<'_>) {
        self.char_count = self.text.chars().count();
        self.width = measure.width(&self.text);
        self.height = measure.line_height();
    }

    /// Measure the character range `[start, end)`.
    ///
    /// Both prefixes are measured from the line start, so kerning across the split point is not
    /// modeled. Indices are clamped and ordered.
    pub fn measure(&self, start: usize, end: usize, measure: &TextMeasure<'_>) -> LineSpan {
        let (start, end) = self.clamp_range(start, end);
        let start_px = measure.prefix_width(&self.text, start);
        let end_px = if start == end {
            start_px
        } else {
            measure.prefix_width(&self.text, end)
        };

        LineSpan {
            width: end_px - start_px,
            start_px,
            end_px,
        }
    }

    /// Text of the character range `[start, end)` (clamped and ordered).
    pub fn text_in_range(&self, start: usize, end: usize) -> &str {
        let (start, end) = self.clamp_range(start, end);
        let start_byte = self.byte_offset(start);
        let end_byte = self.byte_offset(end);
        &self.text[start_byte..end_byte]
    }

    /// Remove the character range `[start, end)` (clamped and ordered) and return it.
    pub fn delete_characters(
        &mut self,
        start: usize,
        end: usize,
        measure: &TextMeasure<'_>,
    ) -> String {
        let (start, end) = self.clamp_range(start, end);
        if start == end {
            return String::new();
        }

        let start_byte = self.byte_offset(start);
        let end_byte = self.byte_offset(end);
        let removed: String = self.text.drain(start_byte..end_byte).collect();
        self.remeasure(measure);
        removed
    }

    /// Insert `text` before character `at` (clamped).
    pub fn insert_str(&mut self, at: usize, text: &str, measure: &TextMeasure<'_>) {
        debug_assert!(!text.contains('\n'), "TextLine must not contain newlines");
        let byte = self.byte_offset(at.min(self.char_count));
        self.text.insert_str(byte, text);
        self.remeasure(measure);
    }

    /// Split the line at character `at` (clamped), keeping the head and returning the tail.
    pub fn split_off(&mut self, at: usize, measure: &TextMeasure<'_>) -> String {
        let byte = self.byte_offset(at.min(self.char_count));
        let tail = self.text.split_off(byte);
        self.remeasure(measure);
        tail
    }

    /// Append `text` to the end of the line.
    pub fn append(&mut self, text: &str, measure: &TextMeasure<'_>) {
        debug_assert!(!text.contains('\n'), "TextLine must not contain newlines");
        self.text.push_str(text);
        self.remeasure(measure);
    }

    /// Byte offset of character index `char_index` (must be `<= char_count`).
    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }

    fn clamp_range(&self, start: usize, end: usize) -> (usize, usize) {
        let start = start.min(self.char_count);
        let end = end.min(self.char_count);
        if start <= end { (start, end) } else { (end, start) }
    }
}
