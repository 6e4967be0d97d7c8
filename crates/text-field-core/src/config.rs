//! Text field configuration.
//!
//! With the `serde` feature enabled the configuration can be loaded from a TOML document:
//!
//! ```toml
//! tab_width = 2
//! horizontal_alignment = "center"
//! selection_colour = [0.2, 0.4, 0.9, 0.5]
//! ```

use crate::geometry::Colour;
use crate::history::DEFAULT_UNDO_LIMIT;
use crate::layout::{HorizontalAlignment, VerticalAlignment};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tab width (in spaces).
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Tunables of a text field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextFieldConfig {
    /// Tab stop distance in spaces.
    pub tab_width: usize,
    /// Maximum number of undo records.
    pub undo_limit: usize,
    /// Initial per-line horizontal alignment.
    pub horizontal_alignment: HorizontalAlignment,
    /// Initial block vertical alignment.
    pub vertical_alignment: VerticalAlignment,
    /// Glyph colour.
    pub text_colour: Colour,
    /// Selection highlight colour.
    pub selection_colour: Colour,
    /// Extra highlight width for a selected line break, so selected empty lines stay visible.
    pub newline_selection_width: f32,
    /// Caret width in pixels.
    pub caret_width: f32,
}

impl Default for TextFieldConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            undo_limit: DEFAULT_UNDO_LIMIT,
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
            text_colour: [1.0, 1.0, 1.0, 1.0],
            selection_colour: [0.25, 0.45, 0.85, 0.6],
            newline_selection_width: 4.0,
            caret_width: 1.0,
        }
    }
}

impl TextFieldConfig {
    /// Set the tab width.
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Set the undo limit.
    pub fn with_undo_limit(mut self, undo_limit: usize) -> Self {
        self.undo_limit = undo_limit;
        self
    }

    /// Set both alignments.
    pub fn with_alignment(
        mut self,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
    ) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    /// Set the glyph colour.
    pub fn with_text_colour(mut self, colour: Colour) -> Self {
        self.text_colour = colour;
        self
    }

    /// Set the selection colour.
    pub fn with_selection_colour(mut self, colour: Colour) -> Self {
        self.selection_colour = colour;
        self
    }

    /// Parse a TOML document; missing keys keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(source: &str) -> crate::error::Result<Self> {
        toml::from_str(source).map_err(|err| crate::error::TextFieldError::Config(err.to_string()))
    }
}
