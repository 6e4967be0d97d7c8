//! The ordered, never-empty sequence of lines.

use crate::line::TextLine;
use crate::marker::Position;
use crate::metrics::TextMeasure;

/// Ordered lines of the document.
///
/// Always holds at least one line: an empty document is a single empty line, so "no lines" is
/// not a representable state.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCollection {
    lines: Vec<TextLine>,
}

impl LineCollection {
    /// A collection holding one empty line.
    pub fn new(measure: &TextMeasure<'_>) -> Self {
        Self {
            lines: vec![TextLine::new(String::new(), measure)],
        }
    }

    /// Build lines from `text`, breaking on `"\r\n"`, `'\n'` and a lone `'\r'`.
    ///
    /// `N` newlines always produce `N + 1` lines, so a trailing newline yields a trailing empty
    /// line.
    pub fn from_text(text: &str, measure: &TextMeasure<'_>) -> Self {
        let lines = split_lines(text)
            .map(|line| TextLine::new(line, measure))
            .collect();
        Self { lines }
    }

    /// Number of lines (always `>= 1`).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the last line.
    pub fn last_index(&self) -> usize {
        self.lines.len() - 1
    }

    /// Line at `index`, clamped to the last line.
    pub fn line(&self, index: usize) -> &TextLine {
        &self.lines[index.min(self.last_index())]
    }

    /// Mutable line at `index`, clamped to the last line.
    pub fn line_mut(&mut self, index: usize) -> &mut TextLine {
        let index = index.min(self.last_index());
        &mut self.lines[index]
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> std::slice::Iter<'_, TextLine> {
        self.lines.iter()
    }

    /// Insert `line` at `index` (clamped to `len`).
    pub fn insert(&mut self, index: usize, line: TextLine) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, line);
    }

    /// Remove and return the line at `index`.
    ///
    /// Returns `None` when `index` is out of range or when it is the only line left.
    pub fn remove(&mut self, index: usize) -> Option<TextLine> {
        if self.lines.len() <= 1 || index >= self.lines.len() {
            return None;
        }
        Some(self.lines.remove(index))
    }

    /// Remove the lines in `start..end` (clamped), never removing every line.
    pub fn remove_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.lines.len());
        let start = start.min(end);
        if end - start >= self.lines.len() {
            self.lines.truncate(1);
            return;
        }
        self.lines.drain(start..end);
    }

    /// Clamp a position into `[0, len) x [0, line_len]`.
    pub fn clamp_position(&self, position: Position) -> Position {
        let line = position.line.min(self.last_index());
        let column = position.column.min(self.lines[line].char_count());
        Position::new(line, column)
    }

    /// Position just past the last character of the document.
    pub fn end_position(&self) -> Position {
        let line = self.last_index();
        Position::new(line, self.lines[line].char_count())
    }

    /// Widest line, in pixels.
    pub fn max_width(&self) -> f32 {
        self.lines.iter().map(TextLine::width).fold(0.0, f32::max)
    }

    /// Sum of line heights, in pixels.
    pub fn total_height(&self) -> f32 {
        self.lines.iter().map(TextLine::height).sum()
    }

    /// Re-measure every line.
    pub fn remeasure(&mut self, measure: &TextMeasure<'_>) {
        for line in &mut self.lines {
            line.remeasure(measure);
        }
    }

    /// Concatenate all lines with `'\n'`.
    pub fn join(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.text().len() + 1).sum();
        let mut out = String::with_capacity(capacity);
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line.text());
        }
        out
    }

    /// Text between two ordered positions, lines joined with `'\n'`.
    pub fn text_between(&self, start: Position, end: Position) -> String {
        let start = self.clamp_position(start);
        let end = self.clamp_position(end);
        debug_assert!(start <= end, "text_between expects ordered positions");

        if start.line == end.line {
            return self.lines[start.line]
                .text_in_range(start.column, end.column)
                .to_string();
        }

        let first = &self.lines[start.line];
        let mut out = first
            .text_in_range(start.column, first.char_count())
            .to_string();
        for line in &self.lines[start.line + 1..end.line] {
            out.push('\n');
            out.push_str(line.text());
        }
        out.push('\n');
        out.push_str(self.lines[end.line].text_in_range(0, end.column));
        out
    }
}

impl<'a> IntoIterator for &'a LineCollection {
    type Item = &'a TextLine;
    type IntoIter = std::slice::Iter<'a, TextLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Split text into lines on `"\r\n"`, `'\n'` or a lone `'\r'`.
///
/// No line yielded contains either break character.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(['\n', '\r']) {
            Some(at) => {
                let break_len = if current[at..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[at + break_len..]);
                Some(&current[..at])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}
