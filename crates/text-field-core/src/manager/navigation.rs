//! Marker navigation and selection.

use super::TextManager;
use crate::marker::{MarkerId, Position};
use unicode_segmentation::UnicodeSegmentation;

/// Cursor motions available to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// One character left, wrapping to the end of the previous line.
    Left,
    /// One character right, wrapping to the start of the next line.
    Right,
    /// One line up, keeping the sticky column.
    Up,
    /// One line down, keeping the sticky column.
    Down,
    /// To the start of the previous word.
    WordLeft,
    /// To the end of the next word.
    WordRight,
    /// To the start of the line.
    LineStart,
    /// To the end of the line.
    LineEnd,
    /// To the start of the document.
    DocumentStart,
    /// To the end of the document.
    DocumentEnd,
}

impl TextManager {
    /// Move a marker to the character under the container-space point `(x, y)`.
    ///
    /// Points above the first line or below the last line resolve to those lines; within a line
    /// the character is picked by glyph advance midpoints.
    pub fn move_marker(&mut self, id: MarkerId, x: f32, y: f32) {
        let line = self.line_at_y(y);
        let rect = self.line_rect(line);
        let column = self
            .measure()
            .hit_test(self.lines.line(line).text(), x - rect.x);
        self.place_marker(id, Position::new(line, column));
    }

    /// Move a marker one character left, wrapping to the end of the previous line.
    pub fn move_marker_left(&mut self, id: MarkerId) {
        let pos = self.marker(id).position();
        let target = if pos.column > 0 {
            Position::new(pos.line, pos.column - 1)
        } else if pos.line > 0 {
            Position::new(pos.line - 1, self.lines.line(pos.line - 1).char_count())
        } else {
            pos
        };
        self.place_marker(id, target);
    }

    /// Move a marker one character right, wrapping to the start of the next line.
    pub fn move_marker_right(&mut self, id: MarkerId) {
        let pos = self.marker(id).position();
        let target = if pos.column < self.lines.line(pos.line).char_count() {
            Position::new(pos.line, pos.column + 1)
        } else if pos.line < self.lines.last_index() {
            Position::new(pos.line + 1, 0)
        } else {
            pos
        };
        self.place_marker(id, target);
    }

    /// Move a marker to the same character index on the previous line (clamped).
    ///
    /// For the cursor, the index it had before the first of a run of vertical moves is
    /// remembered and restored on lines long enough to hold it.
    pub fn move_marker_up(&mut self, id: MarkerId) {
        let line = self.marker(id).line;
        if line > 0 {
            self.move_marker_vertically(id, line - 1);
        }
    }

    /// Move a marker to the same character index on the next line (clamped).
    ///
    /// See [`move_marker_up`](Self::move_marker_up) for the cursor's sticky column.
    pub fn move_marker_down(&mut self, id: MarkerId) {
        let line = self.marker(id).line;
        if line < self.lines.last_index() {
            self.move_marker_vertically(id, line + 1);
        }
    }

    /// Apply `motion` to the cursor and drop the selection.
    pub fn move_cursor(&mut self, motion: Motion) {
        self.apply_motion(motion);
        self.collapse_selection();
        self.refresh_marker_positions();
    }

    /// Apply `motion` to the cursor, extending the selection from its anchor.
    pub fn select_to(&mut self, motion: Motion) {
        self.extend_selection(|manager| manager.apply_motion(motion));
    }

    /// Move the cursor one character left.
    pub fn move_cursor_left(&mut self) {
        self.move_cursor(Motion::Left);
    }

    /// Move the cursor one character right.
    pub fn move_cursor_right(&mut self) {
        self.move_cursor(Motion::Right);
    }

    /// Move the cursor one line up.
    pub fn move_cursor_up(&mut self) {
        self.move_cursor(Motion::Up);
    }

    /// Move the cursor one line down.
    pub fn move_cursor_down(&mut self) {
        self.move_cursor(Motion::Down);
    }

    /// Move the cursor to the start of the previous word.
    pub fn move_cursor_word_left(&mut self) {
        self.move_cursor(Motion::WordLeft);
    }

    /// Move the cursor to the end of the next word.
    pub fn move_cursor_word_right(&mut self) {
        self.move_cursor(Motion::WordRight);
    }

    /// Move the cursor to the start of its line.
    pub fn move_cursor_to_line_start(&mut self) {
        self.move_cursor(Motion::LineStart);
    }

    /// Move the cursor to the end of its line.
    pub fn move_cursor_to_line_end(&mut self) {
        self.move_cursor(Motion::LineEnd);
    }

    /// Move the cursor to the start of the document.
    pub fn move_cursor_to_document_start(&mut self) {
        self.move_cursor(Motion::DocumentStart);
    }

    /// Move the cursor to the end of the document.
    pub fn move_cursor_to_document_end(&mut self) {
        self.move_cursor(Motion::DocumentEnd);
    }

    /// Put the cursor at `position` (clamped) and drop the selection.
    pub fn set_cursor_position(&mut self, position: Position) {
        let position = self.lines.clamp_position(position);
        self.place_marker(MarkerId::Cursor, position);
        self.collapse_selection();
        self.refresh_marker_positions();
    }

    /// Click: move the cursor to the point and drop the selection.
    pub fn move_cursor_to_point(&mut self, x: f32, y: f32) {
        self.move_marker(MarkerId::Cursor, x, y);
        self.collapse_selection();
        self.refresh_marker_positions();
    }

    /// Shift-click / drag: move the cursor to the point, extending the selection.
    pub fn select_to_point(&mut self, x: f32, y: f32) {
        self.extend_selection(|manager| manager.move_marker(MarkerId::Cursor, x, y));
    }

    /// Select from `anchor` to `active` (both clamped); the cursor goes to `active`.
    pub fn set_selection(&mut self, anchor: Position, active: Position) {
        let anchor = self.lines.clamp_position(anchor);
        let active = self.lines.clamp_position(active);
        self.place_marker(MarkerId::Cursor, active);
        self.selection_start.set_position(anchor);
        self.selection_end.set_position(active);
        self.refresh_marker_positions();
    }

    /// Select the whole document.
    pub fn select_all(&mut self) {
        self.set_selection(Position::default(), self.lines.end_position());
    }

    /// Select the word (or run of whitespace/punctuation) under the cursor.
    pub fn select_word_at_cursor(&mut self) {
        let pos = self.cursor.position();
        let segments = word_segments(self.lines.line(pos.line).text());

        let hit = segments
            .iter()
            .find(|s| s.start <= pos.column && pos.column < s.end && s.is_word)
            .or_else(|| {
                segments
                    .iter()
                    .find(|s| s.start <= pos.column && pos.column < s.end)
            })
            .or_else(|| segments.last());

        if let Some(segment) = hit {
            self.set_selection(
                Position::new(pos.line, segment.start),
                Position::new(pos.line, segment.end),
            );
        }
    }

    /// Drop the selection, keeping the cursor where it is.
    pub fn clear_selection(&mut self) {
        self.collapse_selection();
        self.refresh_marker_positions();
    }

    fn apply_motion(&mut self, motion: Motion) {
        let pos = self.cursor.position();
        match motion {
            Motion::Left => self.move_marker_left(MarkerId::Cursor),
            Motion::Right => self.move_marker_right(MarkerId::Cursor),
            Motion::Up => self.move_marker_up(MarkerId::Cursor),
            Motion::Down => self.move_marker_down(MarkerId::Cursor),
            Motion::WordLeft => {
                if pos.column == 0 {
                    self.move_marker_left(MarkerId::Cursor);
                } else {
                    let column = word_start_before(self.lines.line(pos.line).text(), pos.column);
                    self.place_marker(MarkerId::Cursor, Position::new(pos.line, column));
                }
            }
            Motion::WordRight => {
                let line = self.lines.line(pos.line);
                if pos.column >= line.char_count() {
                    self.move_marker_right(MarkerId::Cursor);
                } else {
                    let column = word_end_after(line.text(), pos.column);
                    self.place_marker(MarkerId::Cursor, Position::new(pos.line, column));
                }
            }
            Motion::LineStart => self.place_marker(MarkerId::Cursor, Position::new(pos.line, 0)),
            Motion::LineEnd => {
                let end = self.lines.line(pos.line).char_count();
                self.place_marker(MarkerId::Cursor, Position::new(pos.line, end));
            }
            Motion::DocumentStart => self.place_marker(MarkerId::Cursor, Position::default()),
            Motion::DocumentEnd => {
                let end = self.lines.end_position();
                self.place_marker(MarkerId::Cursor, end);
            }
        }
    }

    /// Run `move_cursor`, then span the selection from the anchor to the new cursor.
    fn extend_selection(&mut self, move_cursor: impl FnOnce(&mut Self)) {
        let anchor = if self.has_selection() {
            self.selection_start.position()
        } else {
            self.cursor.position()
        };

        move_cursor(self);

        self.selection_start.set_position(anchor);
        self.selection_end.set_position(self.cursor.position());
        self.refresh_marker_positions();
    }

    fn move_marker_vertically(&mut self, id: MarkerId, target_line: usize) {
        let column = self.marker(id).character;
        let wanted = match id {
            MarkerId::Cursor => *self.sticky_column.get_or_insert(column),
            _ => column,
        };
        let target = Position::new(
            target_line,
            wanted.min(self.lines.line(target_line).char_count()),
        );

        let marker = self.marker_mut(id);
        marker.set_position(target);
        if id == MarkerId::Cursor {
            self.history.break_run();
        }
        self.refresh_marker_positions();
    }

    /// Move a marker without vertical stickiness; cursor moves end the typing run.
    fn place_marker(&mut self, id: MarkerId, position: Position) {
        self.marker_mut(id).set_position(position);
        if id == MarkerId::Cursor {
            self.sticky_column = None;
            self.history.break_run();
        }
        self.refresh_marker_positions();
    }

    fn line_at_y(&self, y: f32) -> usize {
        let last = self.lines.last_index();
        if y < self.line_rect(0).y {
            return 0;
        }
        if y >= self.line_rect(last).bottom() {
            return last;
        }

        (0..=last)
            .find(|&index| y < self.line_rect(index).bottom())
            .unwrap_or(last)
    }
}

struct WordSegment {
    start: usize,
    end: usize,
    is_word: bool,
}

/// Split a line into UAX #29 word-boundary segments, in character indices.
fn word_segments(text: &str) -> Vec<WordSegment> {
    let mut column = 0;
    text.split_word_bounds()
        .map(|segment| {
            let len = segment.chars().count();
            let out = WordSegment {
                start: column,
                end: column + len,
                is_word: segment.chars().any(|ch| ch.is_alphanumeric() || ch == '_'),
            };
            column += len;
            out
        })
        .collect()
}

fn word_start_before(text: &str, column: usize) -> usize {
    word_segments(text)
        .iter()
        .rev()
        .find(|s| s.is_word && s.start < column)
        .map(|s| s.start)
        .unwrap_or(0)
}

fn word_end_after(text: &str, column: usize) -> usize {
    let segments = word_segments(text);
    segments
        .iter()
        .find(|s| s.is_word && s.end > column)
        .map(|s| s.end)
        .unwrap_or_else(|| segments.last().map(|s| s.end).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundaries() {
        let text = "let foo_bar = baz;";
        assert_eq!(word_start_before(text, 18), 14);
        assert_eq!(word_start_before(text, 14), 4);
        assert_eq!(word_start_before(text, 6), 4);
        assert_eq!(word_start_before(text, 2), 0);

        assert_eq!(word_end_after(text, 0), 3);
        assert_eq!(word_end_after(text, 3), 11);
        assert_eq!(word_end_after(text, 11), 17);
        assert_eq!(word_end_after(text, 17), 18);
    }
}
