//! The text field orchestrator.
//!
//! [`TextManager`] owns the lines, the cursor and selection markers, the undo history and the
//! layout parameters of one text field. Every public method finishes its mutation and all derived
//! recomputation (line sizes, cached text, content bounds, marker coordinates) before returning,
//! so the manager can be queried immediately after any call.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use text_field_core::{FontId, MonospaceMetrics, Position, TextManager};
//!
//! let mut manager = TextManager::new(Rc::new(MonospaceMetrics::default()), FontId::default());
//! manager.insert_text_at_cursor("ab\ncd");
//!
//! assert_eq!(manager.line_count(), 2);
//! assert_eq!(manager.cursor_position(), Position::new(1, 2));
//! assert_eq!(manager.get_text(), "ab\ncd");
//! ```

mod editing;
mod navigation;
mod render;
mod undo;

pub use navigation::Motion;

use crate::clipboard::ClipboardService;
use crate::config::TextFieldConfig;
use crate::history::CommandStack;
use crate::layout::{Container, HorizontalAlignment, Point, Rect, Size, VerticalAlignment};
use crate::line::TextLine;
use crate::lines::LineCollection;
use crate::marker::{Marker, MarkerId, Position, ordered};
use crate::metrics::{FontId, FontMetricsProvider, TextMeasure};
use crate::state::{ChangeCause, ChangeNotifier, ContentChange};
use std::cell::OnceCell;
use std::rc::Rc;
use tracing::debug;

/// In-memory editing and layout model of a single text field.
pub struct TextManager {
    lines: LineCollection,
    cursor: Marker,
    selection_start: Marker,
    selection_end: Marker,
    /// Character index the cursor had before the current run of vertical moves.
    sticky_column: Option<usize>,
    history: CommandStack,
    container: Container,
    tab_width: usize,
    metrics: Rc<dyn FontMetricsProvider>,
    font: FontId,
    config: TextFieldConfig,
    /// Concatenated text; an empty cell means the cache is invalid.
    text_cache: OnceCell<String>,
    /// Widest line width and total line height.
    content_size: Size,
    notifier: ChangeNotifier,
    clipboard: Option<Box<dyn ClipboardService>>,
}

impl TextManager {
    /// Create an empty manager with the default configuration.
    pub fn new(metrics: Rc<dyn FontMetricsProvider>, font: FontId) -> Self {
        Self::with_config(metrics, font, TextFieldConfig::default())
    }

    /// Create an empty manager.
    pub fn with_config(
        metrics: Rc<dyn FontMetricsProvider>,
        font: FontId,
        config: TextFieldConfig,
    ) -> Self {
        let tab_width = config.tab_width.max(1);
        let lines = LineCollection::new(&TextMeasure::new(&*metrics, font, tab_width));
        let container = Container {
            horizontal: config.horizontal_alignment,
            vertical: config.vertical_alignment,
            ..Container::default()
        };

        let mut manager = Self {
            lines,
            cursor: Marker::default(),
            selection_start: Marker::default(),
            selection_end: Marker::default(),
            sticky_column: None,
            history: CommandStack::new(config.undo_limit),
            container,
            tab_width,
            metrics,
            font,
            config,
            text_cache: OnceCell::new(),
            content_size: Size::default(),
            notifier: ChangeNotifier::default(),
            clipboard: None,
        };
        manager.recompute_content_size();
        manager.refresh_marker_positions();
        manager
    }

    /// Return to the initial state: one empty line, cursor at the origin, empty history.
    pub fn reset(&mut self) {
        debug!("resetting text field");
        let metrics = Rc::clone(&self.metrics);
        self.lines = LineCollection::new(&self.measure_with(&*metrics));
        self.cursor.set_position(Position::default());
        self.sticky_column = None;
        self.history.clear();
        self.collapse_selection();
        self.recompute_content_size();
        self.content_changed(ChangeCause::Reset);
    }

    /// Replace the whole content.
    ///
    /// Line breaks (`"\r\n"`, `'\n'` or a lone `'\r'`) are normalized to `'\n'`; the cursor moves
    /// to the start and the undo history is cleared.
    pub fn set_text(&mut self, text: &str) {
        let metrics = Rc::clone(&self.metrics);
        self.lines = LineCollection::from_text(text, &self.measure_with(&*metrics));
        debug!(lines = self.lines.len(), "replaced text field content");
        self.cursor.set_position(Position::default());
        self.sticky_column = None;
        self.history.clear();
        self.collapse_selection();
        self.recompute_content_size();
        self.content_changed(ChangeCause::Replace);
    }

    /// The whole content, lines joined with `'\n'`.
    pub fn get_text(&self) -> &str {
        self.text_cache.get_or_init(|| self.lines.join())
    }

    /// Whether the document holds any character (line breaks included).
    pub fn has_text(&self) -> bool {
        self.lines.len() > 1 || !self.lines.line(0).is_empty()
    }

    /// Number of lines (always `>= 1`).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line at `index` (clamped to the last line).
    pub fn line(&self, index: usize) -> &TextLine {
        self.lines.line(index)
    }

    /// All lines.
    pub fn lines(&self) -> &LineCollection {
        &self.lines
    }

    /// The caret marker.
    pub fn cursor(&self) -> &Marker {
        &self.cursor
    }

    /// The caret position.
    pub fn cursor_position(&self) -> Position {
        self.cursor.position()
    }

    /// Any of the three markers.
    pub fn marker(&self, id: MarkerId) -> &Marker {
        match id {
            MarkerId::Cursor => &self.cursor,
            MarkerId::SelectionStart => &self.selection_start,
            MarkerId::SelectionEnd => &self.selection_end,
        }
    }

    /// Whether the selection is non-empty.
    pub fn has_selection(&self) -> bool {
        self.selection_start.position() != self.selection_end.position()
    }

    /// Selection endpoints in document order.
    pub fn ordered_selection(&self) -> (Position, Position) {
        ordered(self.selection_start.position(), self.selection_end.position())
    }

    /// Selected text (empty without a selection).
    pub fn selected_text(&self) -> String {
        let (start, end) = self.ordered_selection();
        self.lines.text_between(start, end)
    }

    /// Active configuration.
    pub fn config(&self) -> &TextFieldConfig {
        &self.config
    }

    /// Container geometry.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Active font.
    pub fn font(&self) -> FontId {
        self.font
    }

    /// Tab width in spaces.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Widest line width and total height of the content.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Content version; increments on every content change.
    pub fn version(&self) -> u64 {
        self.notifier.version()
    }

    /// Undo history.
    pub fn history(&self) -> &CommandStack {
        &self.history
    }

    /// Subscribe to content changes.
    pub fn on_text_changed(&mut self, callback: impl FnMut(&ContentChange) + 'static) {
        self.notifier.subscribe(Box::new(callback));
    }

    /// Install the clipboard used by cut/copy/paste.
    pub fn set_clipboard(&mut self, clipboard: Box<dyn ClipboardService>) {
        self.clipboard = Some(clipboard);
    }

    /// Resize the container.
    pub fn set_container_size(&mut self, size: Size) {
        self.container.size = size;
        self.refresh_marker_positions();
    }

    /// Set the scroll offset.
    pub fn set_container_offset(&mut self, offset: Point) {
        self.container.offset = offset;
        self.refresh_marker_positions();
    }

    /// Set line and block alignment.
    pub fn set_alignment(&mut self, horizontal: HorizontalAlignment, vertical: VerticalAlignment) {
        self.container.horizontal = horizontal;
        self.container.vertical = vertical;
        self.refresh_marker_positions();
    }

    /// Switch font; every line is re-measured.
    pub fn set_font(&mut self, font: FontId) {
        debug!(?font, "font changed, re-measuring lines");
        self.font = font;
        self.remeasure_all();
    }

    /// Change the tab width (clamped to at least 1); every line is re-measured.
    pub fn set_tab_width(&mut self, tab_width: usize) {
        let tab_width = tab_width.max(1);
        if tab_width == self.tab_width {
            return;
        }
        debug!(tab_width, "tab width changed, re-measuring lines");
        self.tab_width = tab_width;
        self.remeasure_all();
    }

    /// Aligned rectangle enclosing all lines, in container space.
    pub fn bounding_rect(&self) -> Rect {
        Rect::new(
            self.container.line_origin_x(self.content_size.width),
            self.container.block_origin_y(self.content_size.height),
            self.content_size.width,
            self.content_size.height,
        )
    }

    /// Rectangle of line `index` (clamped), in container space.
    pub fn line_rect(&self, index: usize) -> Rect {
        let index = index.min(self.lines.last_index());
        let line = self.lines.line(index);
        Rect::new(
            self.container.line_origin_x(line.width()),
            self.line_top(index),
            line.width(),
            line.height(),
        )
    }

    /// Container-space point of the left edge of the character at `position` (clamped).
    pub fn position_to_point(&self, position: Position) -> Point {
        let position = self.lines.clamp_position(position);
        let line = self.lines.line(position.line);
        let x = self.container.line_origin_x(line.width())
            + self.measure().prefix_width(line.text(), position.column);
        Point::new(x, self.line_top(position.line))
    }

    /// Recompute the cached pixel coordinates of all three markers.
    pub fn refresh_marker_positions(&mut self) {
        for id in [MarkerId::Cursor, MarkerId::SelectionStart, MarkerId::SelectionEnd] {
            let point = self.position_to_point(self.marker(id).position());
            let marker = self.marker_mut(id);
            marker.x = point.x;
            marker.y = point.y;
        }
    }

    /// Scroll so that the caret rectangle lies inside the container.
    pub fn scroll_to_cursor(&mut self) {
        let caret = self.cursor_rect();
        let size = self.container.size;
        let mut offset = self.container.offset;

        if caret.x < 0.0 {
            offset.x += caret.x;
        } else if caret.right() > size.width {
            offset.x += caret.right() - size.width;
        }
        if caret.y < 0.0 {
            offset.y += caret.y;
        } else if caret.bottom() > size.height {
            offset.y += caret.bottom() - size.height;
        }

        if offset != self.container.offset {
            self.set_container_offset(offset);
        }
    }

    pub(crate) fn measure(&self) -> TextMeasure<'_> {
        TextMeasure::new(&*self.metrics, self.font, self.tab_width)
    }

    /// Measurement context detached from `self`, so lines can be mutated while measuring.
    pub(crate) fn measure_with<'a>(
        &self,
        provider: &'a dyn FontMetricsProvider,
    ) -> TextMeasure<'a> {
        TextMeasure::new(provider, self.font, self.tab_width)
    }

    pub(crate) fn marker_mut(&mut self, id: MarkerId) -> &mut Marker {
        match id {
            MarkerId::Cursor => &mut self.cursor,
            MarkerId::SelectionStart => &mut self.selection_start,
            MarkerId::SelectionEnd => &mut self.selection_end,
        }
    }

    fn line_top(&self, index: usize) -> f32 {
        self.container.block_origin_y(self.content_size.height)
            + index as f32 * self.metrics.line_height(self.font)
    }

    /// Collapse the selection onto the cursor.
    pub(crate) fn collapse_selection(&mut self) {
        let position = self.cursor.position();
        self.selection_start.set_position(position);
        self.selection_end.set_position(position);
    }

    /// Clamp every marker into the current lines.
    pub(crate) fn clamp_markers(&mut self) {
        for id in [MarkerId::Cursor, MarkerId::SelectionStart, MarkerId::SelectionEnd] {
            let clamped = self.lines.clamp_position(self.marker(id).position());
            self.marker_mut(id).set_position(clamped);
        }
    }

    pub(crate) fn recompute_content_size(&mut self) {
        self.content_size = Size::new(self.lines.max_width(), self.lines.total_height());
    }

    fn remeasure_all(&mut self) {
        let metrics = Rc::clone(&self.metrics);
        let measure = self.measure_with(&*metrics);
        self.lines.remeasure(&measure);
        self.recompute_content_size();
        self.refresh_marker_positions();
    }

    /// Drop caches derived from the content, refresh markers and notify subscribers.
    pub(crate) fn content_changed(&mut self, cause: ChangeCause) {
        self.text_cache.take();
        self.refresh_marker_positions();
        self.notifier.notify(cause);
    }
}
