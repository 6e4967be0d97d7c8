//! Undo/redo replay.

use super::TextManager;
use crate::history::{EditKind, EditRecord};
use crate::marker::Position;
use crate::state::ChangeCause;
use std::rc::Rc;
use tracing::debug;

impl TextManager {
    /// Revert the most recent applied edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.step_back() else {
            return false;
        };
        debug!(kind = ?record.kind, start = ?record.start, end = ?record.end, "undo");

        let cursor = match record.kind {
            EditKind::Insert => self.remove_record_text(&record),
            EditKind::Delete => {
                let end = self.restore_record_text(&record);
                if record.place_cursor_at_start {
                    record.start
                } else {
                    end
                }
            }
        };

        self.finish_replay(cursor, ChangeCause::Undo);
        true
    }

    /// Re-apply the most recently undone edit. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(record) = self.history.step_forward() else {
            return false;
        };
        debug!(kind = ?record.kind, start = ?record.start, end = ?record.end, "redo");

        let cursor = match record.kind {
            EditKind::Insert => self.restore_record_text(&record),
            EditKind::Delete => self.remove_record_text(&record),
        };

        self.finish_replay(cursor, ChangeCause::Redo);
        true
    }

    /// Whether [`undo`](Self::undo) would change anything.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether [`redo`](Self::redo) would change anything.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of undoable records.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Number of redoable records.
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Close the current typing run so the next character starts a new undo record.
    pub fn end_undo_group(&mut self) {
        self.history.break_run();
    }

    /// Remember the current state as saved.
    pub fn mark_clean(&mut self) {
        self.history.mark_clean();
    }

    /// Whether the content differs from the last state passed to [`mark_clean`](Self::mark_clean).
    pub fn is_modified(&self) -> bool {
        !self.history.is_clean()
    }

    /// Remove `record.start..record.end`; returns the new cursor position.
    fn remove_record_text(&mut self, record: &EditRecord) -> Position {
        let metrics = Rc::clone(&self.metrics);
        let measure = self.measure_with(&*metrics);
        self.remove_range(record.start, record.end, &measure);
        record.start
    }

    /// Insert `record.text` at `record.start`; returns the end of the inserted text.
    fn restore_record_text(&mut self, record: &EditRecord) -> Position {
        let metrics = Rc::clone(&self.metrics);
        let measure = self.measure_with(&*metrics);
        let end = self.insert_at(record.start, &record.text, &measure);
        debug_assert_eq!(end, record.end, "replayed edit ended at an unexpected position");
        end
    }

    fn finish_replay(&mut self, cursor: Position, cause: ChangeCause) {
        self.cursor.set_position(cursor);
        self.sticky_column = None;
        self.clamp_markers();
        self.collapse_selection();
        self.recompute_content_size();
        self.content_changed(cause);
    }
}
