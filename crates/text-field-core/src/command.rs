//! Command Interface Layer
//!
//! A single entry point for hosts that prefer dispatching input as values rather than calling
//! [`TextManager`] methods one by one.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use text_field_core::{
//!     Command, CursorCommand, EditCommand, FontId, MonospaceMetrics, Motion, TextManager,
//! };
//!
//! let mut manager = TextManager::new(Rc::new(MonospaceMetrics::default()), FontId::default());
//!
//! for ch in "hello".chars() {
//!     manager.execute(Command::Edit(EditCommand::Type(ch))).unwrap();
//! }
//! manager
//!     .execute(Command::Cursor(CursorCommand::Move { motion: Motion::WordLeft, select: true }))
//!     .unwrap();
//! manager.execute(Command::Edit(EditCommand::Type('j'))).unwrap();
//!
//! assert_eq!(manager.get_text(), "j");
//! ```

use crate::error::Result;
use crate::layout::{HorizontalAlignment, Point, Size, VerticalAlignment};
use crate::manager::{Motion, TextManager};
use crate::marker::{MarkerId, Position};
use crate::metrics::FontId;

/// Text editing commands
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Type one character, replacing the selection.
    Type(char),
    /// Insert text at the cursor, replacing the selection.
    InsertText(String),
    /// Insert a line break, replacing the selection.
    NewLine,
    /// Delete the selection, or the character before the cursor.
    Backspace,
    /// Delete the selection, or the character after the cursor.
    DeleteForward,
    /// Delete the text between two positions.
    DeleteRange {
        /// One end of the range.
        start: Position,
        /// The other end of the range.
        end: Position,
    },
    /// Revert the last edit.
    Undo,
    /// Re-apply the last reverted edit.
    Redo,
    /// Copy the selection to the clipboard.
    Copy,
    /// Copy the selection to the clipboard and delete it.
    Cut,
    /// Replace the selection with the clipboard text.
    Paste,
    /// Replace the whole content.
    SetText(String),
    /// Return to the initial empty state.
    Reset,
}

/// Cursor and selection commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorCommand {
    /// Apply a motion; with `select`, extend the selection instead of dropping it.
    Move {
        /// Motion to apply.
        motion: Motion,
        /// Extend the selection.
        select: bool,
    },
    /// Move to a document position.
    MoveTo {
        /// Target position (clamped).
        position: Position,
        /// Extend the selection.
        select: bool,
    },
    /// Move to the character under a container-space point.
    MoveToPoint {
        /// Horizontal coordinate.
        x: f32,
        /// Vertical coordinate.
        y: f32,
        /// Extend the selection.
        select: bool,
    },
    /// Select the whole document.
    SelectAll,
    /// Select the word under the cursor.
    SelectWord,
    /// Drop the selection.
    ClearSelection,
}

/// Layout commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    /// Resize the container.
    SetContainerSize(Size),
    /// Scroll the content.
    SetContainerOffset(Point),
    /// Change the alignment.
    SetAlignment {
        /// Per-line horizontal alignment.
        horizontal: HorizontalAlignment,
        /// Block vertical alignment.
        vertical: VerticalAlignment,
    },
    /// Change the tab width.
    SetTabWidth(usize),
    /// Switch font.
    SetFont(FontId),
    /// Scroll the caret into view.
    ScrollToCursor,
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Text editing command
    Edit(EditCommand),
    /// Cursor/selection command
    Cursor(CursorCommand),
    /// Layout command
    View(ViewCommand),
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// The command was applied.
    Success,
    /// The command had nothing to act on (undo with empty history, copy without selection, ...).
    Unchanged,
    /// The command removed this text.
    Text(String),
}

impl TextManager {
    /// Execute a command.
    ///
    /// Only clipboard commands can fail.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult> {
        match command {
            Command::Edit(edit) => self.execute_edit(edit),
            Command::Cursor(cursor) => {
                self.execute_cursor(cursor);
                Ok(CommandResult::Success)
            }
            Command::View(view) => {
                self.execute_view(view);
                Ok(CommandResult::Success)
            }
        }
    }

    /// Execute commands in order, stopping at the first error.
    pub fn execute_batch(
        &mut self,
        commands: impl IntoIterator<Item = Command>,
    ) -> Result<Vec<CommandResult>> {
        commands
            .into_iter()
            .map(|command| self.execute(command))
            .collect()
    }

    fn execute_edit(&mut self, command: EditCommand) -> Result<CommandResult> {
        let changed = match command {
            EditCommand::Type(ch) => {
                if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
                    return Ok(CommandResult::Unchanged);
                }
                self.delete_selected_characters();
                self.insert_character_at_cursor(ch);
                true
            }
            EditCommand::InsertText(text) => {
                if text.is_empty() {
                    return Ok(CommandResult::Unchanged);
                }
                self.delete_selected_characters();
                self.insert_text_at_cursor(&text);
                true
            }
            EditCommand::NewLine => {
                self.delete_selected_characters();
                self.insert_new_line_at_cursor();
                true
            }
            EditCommand::Backspace => {
                if self.has_selection() {
                    !self.delete_selected_characters().is_empty()
                } else {
                    self.delete_character_at_left_of_cursor()
                }
            }
            EditCommand::DeleteForward => {
                if self.has_selection() {
                    !self.delete_selected_characters().is_empty()
                } else {
                    self.delete_character_at_right_of_cursor()
                }
            }
            EditCommand::DeleteRange { start, end } => {
                let removed = self.delete_characters_in_range(start, end);
                return Ok(if removed.is_empty() {
                    CommandResult::Unchanged
                } else {
                    CommandResult::Text(removed)
                });
            }
            EditCommand::Undo => self.undo(),
            EditCommand::Redo => self.redo(),
            EditCommand::Copy => self.copy()?,
            EditCommand::Cut => self.cut()?,
            EditCommand::Paste => self.paste()?,
            EditCommand::SetText(text) => {
                self.set_text(&text);
                true
            }
            EditCommand::Reset => {
                self.reset();
                true
            }
        };

        Ok(if changed {
            CommandResult::Success
        } else {
            CommandResult::Unchanged
        })
    }

    fn execute_cursor(&mut self, command: CursorCommand) {
        match command {
            CursorCommand::Move { motion, select } => {
                if select {
                    self.select_to(motion);
                } else {
                    self.move_cursor(motion);
                }
            }
            CursorCommand::MoveTo { position, select } => {
                if select {
                    let anchor = if self.has_selection() {
                        self.marker(MarkerId::SelectionStart).position()
                    } else {
                        self.cursor_position()
                    };
                    self.set_selection(anchor, position);
                } else {
                    self.set_cursor_position(position);
                }
            }
            CursorCommand::MoveToPoint { x, y, select } => {
                if select {
                    self.select_to_point(x, y);
                } else {
                    self.move_cursor_to_point(x, y);
                }
            }
            CursorCommand::SelectAll => self.select_all(),
            CursorCommand::SelectWord => self.select_word_at_cursor(),
            CursorCommand::ClearSelection => self.clear_selection(),
        }
    }

    fn execute_view(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::SetContainerSize(size) => self.set_container_size(size),
            ViewCommand::SetContainerOffset(offset) => self.set_container_offset(offset),
            ViewCommand::SetAlignment {
                horizontal,
                vertical,
            } => self.set_alignment(horizontal, vertical),
            ViewCommand::SetTabWidth(tab_width) => self.set_tab_width(tab_width),
            ViewCommand::SetFont(font) => self.set_font(font),
            ViewCommand::ScrollToCursor => self.scroll_to_cursor(),
        }
    }
}
