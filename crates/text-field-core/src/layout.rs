//! Pixel geometry and container alignment.
//!
//! All coordinates are in pixels, relative to the top-left corner of the text field's container.
//! Content coordinates are translated into container coordinates by the alignment offsets and by
//! subtracting the scroll offset.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D point in container-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// Create a new size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width (never negative for rectangles produced by this crate).
    pub width: f32,
    /// Height (never negative for rectangles produced by this crate).
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the point lies inside the rectangle (right/bottom edges exclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Horizontal placement of each line inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HorizontalAlignment {
    /// Lines start at the left edge.
    #[default]
    Left,
    /// Lines are centered individually.
    Center,
    /// Lines end at the right edge.
    Right,
}

/// Vertical placement of the whole block of lines inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VerticalAlignment {
    /// Block starts at the top edge.
    #[default]
    Top,
    /// Block is centered.
    Center,
    /// Block ends at the bottom edge.
    Bottom,
}

/// The box the text is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Container {
    /// Visible size of the container.
    pub size: Size,
    /// Scroll offset of the content (positive values scroll content up/left).
    pub offset: Point,
    /// Per-line horizontal alignment.
    pub horizontal: HorizontalAlignment,
    /// Block vertical alignment.
    pub vertical: VerticalAlignment,
}

impl Container {
    /// X coordinate (container space) where a line of `line_width` pixels starts.
    pub fn line_origin_x(&self, line_width: f32) -> f32 {
        let aligned = match self.horizontal {
            HorizontalAlignment::Left => 0.0,
            HorizontalAlignment::Center => (self.size.width - line_width) * 0.5,
            HorizontalAlignment::Right => self.size.width - line_width,
        };
        aligned - self.offset.x
    }

    /// Y coordinate (container space) of the top of a block of `content_height` pixels.
    pub fn block_origin_y(&self, content_height: f32) -> f32 {
        let aligned = match self.vertical {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Center => (self.size.height - content_height) * 0.5,
            VerticalAlignment::Bottom => self.size.height - content_height,
        };
        aligned - self.offset.y
    }

    /// Index range of the lines that intersect the container vertically.
    ///
    /// Lines all share `line_height`; the block starts at `origin_y`.
    pub fn visible_lines(
        &self,
        origin_y: f32,
        line_height: f32,
        line_count: usize,
    ) -> std::ops::Range<usize> {
        if line_height <= 0.0 || line_count == 0 {
            return 0..line_count;
        }

        let first = ((-origin_y) / line_height).floor().max(0.0) as usize;
        let last = ((self.size.height - origin_y) / line_height).ceil().max(0.0) as usize;
        first.min(line_count)..last.min(line_count)
    }
}
