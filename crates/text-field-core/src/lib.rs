#![warn(missing_docs)]
//! Text Field Core - Headless Editing Engine for GPU Text Fields
//!
//! # Overview
//!
//! `text-field-core` keeps the editable state of a single (possibly multi-line) text field:
//! the lines and their measured sizes, a cursor and a selection, an undo/redo history, and
//! the alignment of the text inside a container. It does not rasterize anything; it hands
//! vertex/index buffers for the selection highlight and the glyph quads to a renderer the host
//! provides, and asks a host-provided font metrics source for glyph sizes.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface & Change Notifications   │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  TextManager (editing, navigation, undo)    │  ← Orchestration
//! ├─────────────────────────────────────────────┤
//! │  GeometryBuilder (selection + glyph quads)  │  ← Rendering Data
//! ├─────────────────────────────────────────────┤
//! │  Container layout (alignment, scrolling)    │  ← Text Layout
//! ├─────────────────────────────────────────────┤
//! │  LineCollection / TextLine                  │  ← Text Storage
//! ├─────────────────────────────────────────────┤
//! │  FontMetricsProvider / TextMeasure          │  ← Measurement
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Calling the manager directly
//!
//! ```rust
//! use std::rc::Rc;
//! use text_field_core::{FontId, MonospaceMetrics, Position, TextManager};
//!
//! let mut manager = TextManager::new(Rc::new(MonospaceMetrics::default()), FontId::default());
//!
//! for ch in "hello".chars() {
//!     manager.insert_character_at_cursor(ch);
//! }
//! manager.insert_new_line_at_cursor();
//! manager.insert_text_at_cursor("world");
//!
//! assert_eq!(manager.get_text(), "hello\nworld");
//! assert_eq!(manager.cursor_position(), Position::new(1, 5));
//!
//! manager.undo();
//! manager.undo();
//! assert_eq!(manager.get_text(), "hello");
//! ```
//!
//! ## Using the command interface
//!
//! ```rust
//! use std::rc::Rc;
//! use text_field_core::{
//!     Command, CommandResult, EditCommand, FontId, MemoryClipboard, MonospaceMetrics,
//!     CursorCommand, TextManager,
//! };
//!
//! let mut manager = TextManager::new(Rc::new(MonospaceMetrics::default()), FontId::default());
//! manager.set_clipboard(Box::new(MemoryClipboard::new()));
//!
//! manager.execute(Command::Edit(EditCommand::InsertText("copy me".to_string()))).unwrap();
//! manager.execute(Command::Cursor(CursorCommand::SelectAll)).unwrap();
//! assert_eq!(
//!     manager.execute(Command::Edit(EditCommand::Copy)).unwrap(),
//!     CommandResult::Success
//! );
//! ```
//!
//! # Module Description
//!
//! - [`metrics`] - Font metrics seam and tab-aware measurement
//! - [`line`] - A single measured line
//! - [`lines`] - The ordered, never-empty line list
//! - [`marker`] - Document positions and the cursor/selection markers
//! - [`history`] - Undo/redo stack with typing coalescing
//! - [`geometry`] - Quad mesh builder and the render seam
//! - [`layout`] - Container geometry and alignment
//! - [`command`] - Unified command interface
//! - [`state`] - Change notifications
//! - [`config`] - Field configuration
//! - [`clipboard`] - Clipboard seam
//!
//! # Unicode Support
//!
//! - Positions count Unicode scalar values (`char`s), never bytes
//! - Word motions follow UAX #29 word boundaries
//! - [`MonospaceMetrics`] gives East Asian wide characters two cells

pub mod clipboard;
pub mod command;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod layout;
pub mod line;
pub mod lines;
mod manager;
pub mod marker;
pub mod metrics;
pub mod state;

pub use clipboard::{ClipboardService, MemoryClipboard};
pub use command::{Command, CommandResult, CursorCommand, EditCommand, ViewCommand};
pub use config::{DEFAULT_TAB_WIDTH, TextFieldConfig};
pub use error::{ClipboardError, Result, TextFieldError};
pub use geometry::{Colour, GeometryBuilder, Mesh, RenderSink, Vertex};
pub use history::{CommandStack, DEFAULT_UNDO_LIMIT, EditKind, EditRecord, InsertRun};
pub use layout::{Container, HorizontalAlignment, Point, Rect, Size, VerticalAlignment};
pub use line::{LineSpan, TextLine};
pub use lines::LineCollection;
pub use manager::{Motion, TextManager};
pub use marker::{Marker, MarkerId, Position, is_marker_before};
pub use metrics::{
    FontId, FontMetricsProvider, GlyphMetrics, MonospaceMetrics, TextMeasure, UvRect,
};
pub use state::{ChangeCause, ContentChange, TextChangedCallback};
