//! Insertion, deletion and clipboard transfer.

use super::TextManager;
use crate::error::{Result, TextFieldError};
use crate::history::EditRecord;
use crate::line::TextLine;
use crate::lines::split_lines;
use crate::marker::{Position, ordered};
use crate::metrics::TextMeasure;
use crate::state::ChangeCause;
use std::rc::Rc;
use tracing::{trace, warn};

impl TextManager {
    /// Insert one character at the cursor and advance the cursor.
    ///
    /// `'\n'` and `'\r'` insert a line break. Consecutive characters typed without moving the
    /// cursor are merged into a single undo record.
    pub fn insert_character_at_cursor(&mut self, ch: char) {
        if ch == '\n' || ch == '\r' {
            self.insert_new_line_at_cursor();
            return;
        }

        let at = self.cursor.position();
        let metrics = Rc::clone(&self.metrics);
        let measure = self.measure_with(&*metrics);
        let mut buf = [0u8; 4];
        let line = self.lines.line_mut(at.line);
        line.insert_str(at.column, ch.encode_utf8(&mut buf), &measure);

        // Growing one line can only widen the content.
        let width = line.width();
        if width > self.content_size.width {
            self.content_size.width = width;
        }

        self.cursor.character += 1;
        self.sticky_column = None;
        let merged = self.history.record_character(ch, at);
        trace!(?ch, line = at.line, column = at.column, merged, "inserted character");

        self.collapse_selection();
        self.content_changed(ChangeCause::Insert);
    }

    /// Insert `text` at the cursor as a single undo record.
    ///
    /// Line breaks (`"\r\n"`, `'\n'` or a lone `'\r'`) split the line, as they do when typed; the
    /// cursor ends up after the inserted text.
    pub fn insert_text_at_cursor(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let start = self.cursor.position();
        let metrics = Rc::clone(&self.metrics);
        let measure = self.measure_with(&*metrics);
        let end = self.insert_at(start, text, &measure);
        if end == start {
            return;
        }
        let normalized = split_lines(text).collect::<Vec<_>>().join("\n");
        trace!(?start, ?end, "inserted text");

        self.cursor.set_position(end);
        self.sticky_column = None;
        self.history.push(EditRecord::insert(normalized, start, end));
        self.recompute_content_size();
        self.collapse_selection();
        self.content_changed(ChangeCause::Insert);
    }

    /// Split the current line at the cursor and move the cursor to the start of the new line.
    pub fn insert_new_line_at_cursor(&mut self) {
        let at = self.cursor.position();
        let metrics = Rc::clone(&self.metrics);
        let measure = self.measure_with(&*metrics);

        let was_widest = self.lines.line(at.line).width() >= self.content_size.width;
        let end = self.split_line_at(at, &measure);

        self.content_size.height += self.lines.line(end.line).height();
        if was_widest {
            self.content_size.width = self.lines.max_width();
        }

        self.cursor.set_position(end);
        self.sticky_column = None;
        self.history.push(EditRecord::insert("\n", at, end));
        trace!(line = at.line, column = at.column, "inserted line break");

        self.collapse_selection();
        self.content_changed(ChangeCause::Insert);
    }

    /// Backspace: delete the character before the cursor.
    ///
    /// At the start of a line the line is joined onto the previous one. Returns `false` at the
    /// start of the document.
    pub fn delete_character_at_left_of_cursor(&mut self) -> bool {
        let at = self.cursor.position();
        let metrics = Rc::clone(&self.metrics);
        let measure = self.measure_with(&*metrics);

        let record = if at.column > 0 {
            let start = Position::new(at.line, at.column - 1);
            let removed = self.lines.line_mut(at.line).delete_characters(
                start.column,
                at.column,
                &measure,
            );
            EditRecord::delete(removed, start, at, false)
        } else if at.line > 0 {
            let start = self.join_with_next_line(at.line - 1, &measure);
            EditRecord::delete("\n", start, at, false)
        } else {
            return false;
        };

        self.finish_character_delete(record.start, record)
    }

    /// Delete: remove the character after the cursor.
    ///
    /// At the end of a line the next line is joined onto it. Returns `false` at the end of the
    /// document.
    pub fn delete_character_at_right_of_cursor(&mut self) -> bool {
        let at = self.cursor.position();
        let metrics = Rc::clone(&self.metrics);
        let measure = self.measure_with(&*metrics);
        let line_len = self.lines.line(at.line).char_count();

        let record = if at.column < line_len {
            let end = Position::new(at.line, at.column + 1);
            let removed = self.lines.line_mut(at.line).delete_characters(
                at.column,
                end.column,
                &measure,
            );
            EditRecord::delete(removed, at, end, true)
        } else if at.line < self.lines.last_index() {
            self.join_with_next_line(at.line, &measure);
            EditRecord::delete("\n", at, Position::new(at.line + 1, 0), true)
        } else {
            return false;
        };

        self.finish_character_delete(at, record)
    }

    /// Delete the text between two positions (in either order) as one undo record.
    ///
    /// Afterwards every marker is clamped back into the document. Returns the removed text.
    pub fn delete_characters_in_range(&mut self, a: Position, b: Position) -> String {
        let (start, end) = ordered(
            self.lines.clamp_position(a),
            self.lines.clamp_position(b),
        );
        if start == end {
            return String::new();
        }

        let metrics = Rc::clone(&self.metrics);
        let measure = self.measure_with(&*metrics);
        let removed = self.remove_range(start, end, &measure);
        trace!(?start, ?end, "deleted range");

        self.history
            .push(EditRecord::delete(removed.clone(), start, end, true));
        self.sticky_column = None;
        self.clamp_markers();
        self.recompute_content_size();
        self.content_changed(ChangeCause::Delete);
        removed
    }

    /// Delete the selection and leave an empty selection at its start.
    ///
    /// Returns the removed text (empty without a selection).
    pub fn delete_selected_characters(&mut self) -> String {
        if !self.has_selection() {
            return String::new();
        }

        let (start, end) = self.ordered_selection();
        self.cursor.set_position(start);
        let removed = self.delete_characters_in_range(start, end);
        self.collapse_selection();
        self.refresh_marker_positions();
        removed
    }

    /// Copy the selection to the clipboard. Returns `false` without a selection.
    pub fn copy(&mut self) -> Result<bool> {
        let text = self.has_selection().then(|| self.selected_text());
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or(TextFieldError::NoClipboard)?;
        let Some(text) = text else {
            return Ok(false);
        };

        clipboard
            .set_text(&text)
            .inspect_err(|err| warn!(%err, "clipboard write failed"))?;
        Ok(true)
    }

    /// Copy the selection to the clipboard, then delete it.
    pub fn cut(&mut self) -> Result<bool> {
        if !self.copy()? {
            return Ok(false);
        }
        self.delete_selected_characters();
        Ok(true)
    }

    /// Replace the selection (if any) with the clipboard text.
    pub fn paste(&mut self) -> Result<bool> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or(TextFieldError::NoClipboard)?;
        let text = clipboard
            .get_text()
            .inspect_err(|err| warn!(%err, "clipboard read failed"))?;
        if text.is_empty() {
            return Ok(false);
        }

        self.delete_selected_characters();
        self.insert_text_at_cursor(&text);
        Ok(true)
    }

    fn finish_character_delete(&mut self, cursor: Position, record: EditRecord) -> bool {
        trace!(start = ?record.start, end = ?record.end, "deleted character");
        self.cursor.set_position(cursor);
        self.sticky_column = None;
        self.history.push(record);
        self.recompute_content_size();
        self.collapse_selection();
        self.content_changed(ChangeCause::Delete);
        true
    }

    /// Split the line at `at`; returns the start of the new line.
    fn split_line_at(&mut self, at: Position, measure: &TextMeasure<'_>) -> Position {
        let tail = self.lines.line_mut(at.line).split_off(at.column, measure);
        self.lines
            .insert(at.line + 1, TextLine::new(tail, measure));
        Position::new(at.line + 1, 0)
    }

    /// Append line `line + 1` onto `line`; returns the join point.
    fn join_with_next_line(&mut self, line: usize, measure: &TextMeasure<'_>) -> Position {
        let join = Position::new(line, self.lines.line(line).char_count());
        if let Some(next) = self.lines.remove(line + 1) {
            self.lines.line_mut(line).append(next.text(), measure);
        }
        join
    }

    /// Insert `text` at `at` without recording history; returns the end of the inserted text.
    pub(crate) fn insert_at(
        &mut self,
        at: Position,
        text: &str,
        measure: &TextMeasure<'_>,
    ) -> Position {
        let mut position = self.lines.clamp_position(at);

        for (i, segment) in split_lines(text).enumerate() {
            if i > 0 {
                position = self.split_line_at(position, measure);
            }
            if !segment.is_empty() {
                self.lines
                    .line_mut(position.line)
                    .insert_str(position.column, segment, measure);
                position.column += segment.chars().count();
            }
        }

        position
    }

    /// Remove the ordered range `start..end` without recording history; returns the removed text.
    pub(crate) fn remove_range(
        &mut self,
        start: Position,
        end: Position,
        measure: &TextMeasure<'_>,
    ) -> String {
        let start = self.lines.clamp_position(start);
        let end = self.lines.clamp_position(end);
        debug_assert!(start <= end, "remove_range expects ordered positions");
        if start >= end {
            return String::new();
        }

        let removed = self.lines.text_between(start, end);

        if start.line == end.line {
            self.lines
                .line_mut(start.line)
                .delete_characters(start.column, end.column, measure);
            return removed;
        }

        let last = self.lines.line(end.line);
        let tail = last.text_in_range(end.column, last.char_count()).to_string();
        self.lines.remove_range(start.line + 1, end.line + 1);

        let first = self.lines.line_mut(start.line);
        let first_len = first.char_count();
        first.delete_characters(start.column, first_len, measure);
        first.append(&tail, measure);

        removed
    }
}
