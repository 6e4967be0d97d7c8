//! Clipboard collaborator.

use crate::error::ClipboardError;

/// Access to a clipboard. The host wires this to the OS clipboard.
pub trait ClipboardService {
    /// Current clipboard text.
    fn get_text(&mut self) -> Result<String, ClipboardError>;

    /// Replace the clipboard text.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Process-local clipboard, for headless hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    /// An empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored text, if any.
    pub fn contents(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl ClipboardService for MemoryClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        Ok(self.text.clone().unwrap_or_default())
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = Some(text.to_string());
        Ok(())
    }
}
