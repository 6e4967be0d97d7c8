//! Content change notifications.
//!
//! The manager keeps a version number that increments on every content mutation and calls every
//! subscribed callback with a [`ContentChange`] describing it.

/// What caused a content change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// Text was typed, pasted or otherwise inserted.
    Insert,
    /// Text was removed.
    Delete,
    /// An edit was reverted.
    Undo,
    /// A reverted edit was re-applied.
    Redo,
    /// The whole content was replaced.
    Replace,
    /// The manager returned to its initial state.
    Reset,
}

/// Content change record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentChange {
    /// Cause of the change.
    pub cause: ChangeCause,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
}

/// Content change callback type.
pub type TextChangedCallback = Box<dyn FnMut(&ContentChange)>;

/// Version counter plus subscribers.
#[derive(Default)]
pub(crate) struct ChangeNotifier {
    version: u64,
    callbacks: Vec<TextChangedCallback>,
}

impl ChangeNotifier {
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn subscribe(&mut self, callback: TextChangedCallback) {
        self.callbacks.push(callback);
    }

    pub(crate) fn notify(&mut self, cause: ChangeCause) {
        let change = ContentChange {
            cause,
            old_version: self.version,
            new_version: self.version + 1,
        };
        self.version = change.new_version;

        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("version", &self.version)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
