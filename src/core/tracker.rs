//! # Input Tracker
//!
//! Keeps our own copy of what the user has typed, built purely from key
//! events. The editable surface is free to change underneath us (paste,
//! autocorrect, undo), so this copy is a belief, not the truth. The periodic
//! [`InputTracker::resync`] is the only thing that pulls it back in line.

use log::debug;

use crate::core::key::Key;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputTracker {
    text: String,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Apply one key press to the tracked text.
    ///
    /// Backspace drops the last character, a visible character is appended,
    /// every other key leaves the text alone.
    pub fn on_key(&mut self, key: &Key) {
        match key {
            Key::Backspace => {
                self.text.pop();
            }
            Key::Char(c) => self.text.push(*c),
            _ => {}
        }
    }

    /// Trust the surface when it no longer extends what we tracked.
    ///
    /// Returns `true` if the tracked text was replaced.
    pub fn resync(&mut self, actual: &str) -> bool {
        if actual.starts_with(self.text.as_str()) {
            return false;
        }
        debug!(
            "Tracker drift: tracked {} bytes, surface {} bytes; replacing",
            self.text.len(),
            actual.len()
        );
        self.text = actual.to_string();
        true
    }

    /// Unconditional replacement, used after the session writes to the surface itself.
    pub fn replace(&mut self, actual: &str) {
        self.text.clear();
        self.text.push_str(actual);
    }
}
