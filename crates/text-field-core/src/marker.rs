//! Document positions and the markers that track them.

use std::cmp::Ordering;

/// Position coordinates (line index and character index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based character (codepoint) index within the line.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Identifies one of the manager's markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerId {
    /// The caret.
    Cursor,
    /// Selection anchor.
    SelectionStart,
    /// Selection active end.
    SelectionEnd,
}

/// A navigable document position with cached container-space pixel coordinates.
///
/// Markers store indices only, so inserting or removing lines never invalidates them; the
/// manager re-clamps them after structural edits and refreshes `x`/`y` explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Marker {
    /// Line index.
    pub line: usize,
    /// Character index within the line.
    pub character: usize,
    /// Cached x coordinate (left edge of the character).
    pub x: f32,
    /// Cached y coordinate (top of the line).
    pub y: f32,
}

impl Marker {
    /// The marker's document position.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.character)
    }

    /// Move to `position` without touching the cached coordinates.
    pub fn set_position(&mut self, position: Position) {
        self.line = position.line;
        self.character = position.column;
    }
}

/// Whether `a` comes strictly before `b` in the document.
///
/// On the same line the lower character index wins, otherwise the lower line index wins.
pub fn is_marker_before(a: &Marker, b: &Marker) -> bool {
    a.position() < b.position()
}

/// Order two positions.
pub fn ordered(a: Position, b: Position) -> (Position, Position) {
    if b < a { (b, a) } else { (a, b) }
}
