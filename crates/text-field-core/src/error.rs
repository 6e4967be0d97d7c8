//! Error types.
//!
//! Editing operations never fail: out-of-range positions are clamped. The errors here only come
//! from collaborators (the clipboard) and from loading configuration.

use thiserror::Error;

/// Errors reported by a [`ClipboardService`](crate::ClipboardService) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// The clipboard could not be reached (no display server, locked by another process, ...).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    /// The clipboard held data that is not text.
    #[error("clipboard does not contain text")]
    NotText,
    /// Any other backend failure.
    #[error("clipboard error: {0}")]
    Other(String),
}

/// Errors surfaced by the [`TextManager`](crate::TextManager) command surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextFieldError {
    /// A clipboard command was executed without a clipboard service installed.
    #[error("no clipboard service installed")]
    NoClipboard,
    /// The clipboard service failed.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    /// A configuration document could not be parsed.
    #[error("invalid text field configuration: {0}")]
    Config(String),
}

/// Convenient result alias for text field operations.
pub type Result<T> = std::result::Result<T, TextFieldError>;
