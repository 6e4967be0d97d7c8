//! Linear undo/redo history.
//!
//! The history is a list of reversible [`EditRecord`]s plus an index pointing just past the last
//! applied record. Undo walks the index back, redo walks it forward, and pushing a new record
//! while records are waiting to be redone discards them.
//!
//! Consecutive typing is coalesced into a single record. Whether the next typed character may
//! join the top record is decided by the [`InsertRun`] state machine, which every operation
//! other than typing resets to [`InsertRun::Idle`].

use crate::marker::Position;
use std::collections::VecDeque;
use std::ops::Range;
use tracing::{debug, trace};

/// Default maximum number of records kept.
pub const DEFAULT_UNDO_LIMIT: usize = 1000;

/// Kind of a reversible edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// `text` was inserted, spanning `start..end` afterwards.
    Insert,
    /// `text` spanning `start..end` was removed.
    Delete,
}

/// A reversible record of one insert or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    /// Insert or delete.
    pub kind: EditKind,
    /// The inserted or removed text, lines joined with `'\n'`.
    pub text: String,
    /// Start of the affected range.
    pub start: Position,
    /// End of the affected range (in the document where the text is present).
    pub end: Position,
    /// For deletions: where to leave the cursor when the text is restored.
    pub place_cursor_at_start: bool,
}

impl EditRecord {
    /// Record an insertion of `text` now spanning `start..end`.
    pub fn insert(text: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind: EditKind::Insert,
            text: text.into(),
            start,
            end,
            place_cursor_at_start: false,
        }
    }

    /// Record a deletion of `text` which spanned `start..end`.
    pub fn delete(
        text: impl Into<String>,
        start: Position,
        end: Position,
        place_cursor_at_start: bool,
    ) -> Self {
        Self {
            kind: EditKind::Delete,
            text: text.into(),
            start,
            end,
            place_cursor_at_start,
        }
    }

    /// Whether the record is exactly one line break.
    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }
}

/// Coalescing state for consecutive typing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InsertRun {
    /// The next typed character starts a new record.
    #[default]
    Idle,
    /// Characters `chars` on `line` were typed without interruption and form the top record.
    Accumulating {
        /// Line being typed on.
        line: usize,
        /// Character range covered by the run.
        chars: Range<usize>,
    },
}

impl InsertRun {
    /// Whether a character typed at `(line, column)` continues the run.
    pub fn accepts(&self, line: usize, column: usize) -> bool {
        match self {
            InsertRun::Idle => false,
            InsertRun::Accumulating {
                line: run_line,
                chars,
            } => *run_line == line && chars.end == column,
        }
    }

    /// Advance the machine after a character was typed at `(line, column)`.
    pub fn typed(&mut self, line: usize, column: usize) {
        match self {
            InsertRun::Accumulating {
                line: run_line,
                chars,
            } if *run_line == line && chars.end == column => chars.end += 1,
            _ => {
                *self = InsertRun::Accumulating {
                    line,
                    chars: column..column + 1,
                }
            }
        }
    }

    /// Return to [`InsertRun::Idle`].
    pub fn reset(&mut self) {
        *self = InsertRun::Idle;
    }
}

/// Undo/redo history.
#[derive(Debug, Clone)]
pub struct CommandStack {
    records: VecDeque<EditRecord>,
    /// Number of applied records; `records[index..]` are redoable.
    index: usize,
    limit: usize,
    /// History index matching the last saved state, if still reachable.
    clean_index: Option<usize>,
    run: InsertRun,
}

impl Default for CommandStack {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl CommandStack {
    /// Create an empty history keeping at most `limit` records (at least one).
    pub fn new(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            index: 0,
            limit: limit.max(1),
            clean_index: Some(0),
            run: InsertRun::Idle,
        }
    }

    /// All records, applied and redoable.
    pub fn records(&self) -> &VecDeque<EditRecord> {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current history index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of undoable records.
    pub fn undo_depth(&self) -> usize {
        self.index
    }

    /// Number of redoable records.
    pub fn redo_depth(&self) -> usize {
        self.records.len() - self.index
    }

    /// Whether [`step_back`](Self::step_back) would return a record.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether [`step_forward`](Self::step_forward) would return a record.
    pub fn can_redo(&self) -> bool {
        self.index < self.records.len()
    }

    /// Current coalescing state.
    pub fn run(&self) -> &InsertRun {
        &self.run
    }

    /// End the current typing run.
    pub fn break_run(&mut self) {
        self.run.reset();
    }

    /// Change the record limit, dropping the oldest records if needed.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.enforce_limit();
    }

    /// Append a record, discarding anything redoable, and end the typing run.
    pub fn push(&mut self, record: EditRecord) {
        self.truncate_redo();
        trace!(kind = ?record.kind, start = ?record.start, end = ?record.end, "push edit record");
        self.records.push_back(record);
        self.index = self.records.len();
        self.run.reset();
        self.enforce_limit();
    }

    /// Record `ch` typed at `at`, merging into the top record when the run allows it.
    ///
    /// Returns `true` when the character was merged.
    pub fn record_character(&mut self, ch: char, at: Position) -> bool {
        let mergeable = self.index == self.records.len()
            && self.clean_index != Some(self.index)
            && self.run.accepts(at.line, at.column);

        if mergeable
            && let Some(top) = self.records.back_mut()
            && top.kind == EditKind::Insert
            && !top.is_newline()
            && top.end == at
        {
            top.text.push(ch);
            top.end.column += 1;
            self.run.typed(at.line, at.column);
            trace!(line = at.line, column = at.column, "coalesced typed character");
            return true;
        }

        self.push(EditRecord::insert(
            ch.to_string(),
            at,
            Position::new(at.line, at.column + 1),
        ));
        self.run.typed(at.line, at.column);
        false
    }

    /// Move the index back and return the record to revert.
    pub fn step_back(&mut self) -> Option<EditRecord> {
        self.run.reset();
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.records[self.index].clone())
    }

    /// Move the index forward and return the record to replay.
    pub fn step_forward(&mut self) -> Option<EditRecord> {
        self.run.reset();
        let record = self.records.get(self.index)?.clone();
        self.index += 1;
        Some(record)
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.index = 0;
        self.clean_index = Some(0);
        self.run.reset();
    }

    /// Remember the current index as the saved state.
    pub fn mark_clean(&mut self) {
        self.clean_index = Some(self.index);
        self.run.reset();
    }

    /// Whether the current index is the saved state.
    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.index)
    }

    fn truncate_redo(&mut self) {
        if self.index == self.records.len() {
            return;
        }

        debug!(
            dropped = self.records.len() - self.index,
            "discarding redoable history"
        );
        if let Some(clean_index) = self.clean_index
            && clean_index > self.index
        {
            self.clean_index = None;
        }
        self.records.truncate(self.index);
    }

    fn enforce_limit(&mut self) {
        while self.records.len() > self.limit {
            self.records.pop_front();
            self.index = self.index.saturating_sub(1);
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(clean_index) => Some(clean_index - 1),
            };
            self.run.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    #[test]
    fn test_insert_run_state_machine() {
        let mut run = InsertRun::Idle;
        assert!(!run.accepts(0, 0));

        run.typed(0, 3);
        assert_eq!(
            run,
            InsertRun::Accumulating {
                line: 0,
                chars: 3..4
            }
        );
        assert!(run.accepts(0, 4));
        assert!(!run.accepts(0, 3));
        assert!(!run.accepts(1, 4));

        run.typed(0, 4);
        assert_eq!(
            run,
            InsertRun::Accumulating {
                line: 0,
                chars: 3..5
            }
        );

        // A jump starts a fresh run.
        run.typed(2, 0);
        assert_eq!(
            run,
            InsertRun::Accumulating {
                line: 2,
                chars: 0..1
            }
        );

        run.reset();
        assert_eq!(run, InsertRun::Idle);
    }

    #[test]
    fn test_consecutive_characters_coalesce() {
        let mut stack = CommandStack::default();
        assert!(!stack.record_character('a', pos(0, 0)));
        assert!(stack.record_character('b', pos(0, 1)));
        assert!(stack.record_character('c', pos(0, 2)));

        assert_eq!(stack.len(), 1);
        assert_eq!(stack.records()[0].text, "abc");
        assert_eq!(stack.records()[0].start, pos(0, 0));
        assert_eq!(stack.records()[0].end, pos(0, 3));
    }

    #[test]
    fn test_break_run_starts_new_record() {
        let mut stack = CommandStack::default();
        stack.record_character('a', pos(0, 0));
        stack.break_run();
        assert!(!stack.record_character('b', pos(0, 1)));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_newline_record_is_never_extended() {
        let mut stack = CommandStack::default();
        stack.push(EditRecord::insert("\n", pos(0, 0), pos(1, 0)));
        assert!(!stack.record_character('x', pos(1, 0)));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_push_truncates_redo() {
        let mut stack = CommandStack::default();
        stack.push(EditRecord::insert("a", pos(0, 0), pos(0, 1)));
        stack.push(EditRecord::insert("b", pos(0, 1), pos(0, 2)));
        stack.push(EditRecord::insert("c", pos(0, 2), pos(0, 3)));

        assert!(stack.step_back().is_some());
        assert!(stack.step_back().is_some());
        assert_eq!(stack.index(), 1);
        assert_eq!(stack.redo_depth(), 2);

        stack.push(EditRecord::insert("z", pos(0, 1), pos(0, 2)));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.records()[1].text, "z");
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_step_back_and_forward() {
        let mut stack = CommandStack::default();
        assert!(stack.step_back().is_none());
        assert!(stack.step_forward().is_none());

        stack.push(EditRecord::delete("x", pos(0, 0), pos(0, 1), true));
        let undone = stack.step_back().expect("record");
        assert_eq!(undone.kind, EditKind::Delete);
        assert!(stack.step_back().is_none());

        let redone = stack.step_forward().expect("record");
        assert_eq!(redone, undone);
        assert!(stack.step_forward().is_none());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut stack = CommandStack::new(2);
        stack.push(EditRecord::insert("a", pos(0, 0), pos(0, 1)));
        stack.push(EditRecord::insert("b", pos(0, 1), pos(0, 2)));
        stack.push(EditRecord::insert("c", pos(0, 2), pos(0, 3)));

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.index(), 2);
        assert_eq!(stack.records()[0].text, "b");
        // The saved state (empty history) fell off the front.
        assert!(!stack.is_clean());
    }

    #[test]
    fn test_full_history_evicts_from_front() {
        let mut stack = CommandStack::new(3);
        for column in 0..10 {
            stack.push(EditRecord::insert("x", pos(0, column), pos(0, column + 1)));
        }

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.undo_depth(), 3);
        let starts: Vec<_> = stack.records().iter().map(|r| r.start.column).collect();
        assert_eq!(starts, vec![7, 8, 9]);
        assert_eq!(stack.step_back().map(|r| r.start), Some(pos(0, 9)));
    }

    #[test]
    fn test_clean_tracking() {
        let mut stack = CommandStack::default();
        assert!(stack.is_clean());

        stack.record_character('a', pos(0, 0));
        assert!(!stack.is_clean());
        stack.mark_clean();
        assert!(stack.is_clean());

        // Typing after a save starts a new record so the saved state stays reachable.
        assert!(!stack.record_character('b', pos(0, 1)));
        stack.step_back();
        assert!(stack.is_clean());
    }
}
