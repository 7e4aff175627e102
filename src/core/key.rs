//! # Keys
//!
//! The host-independent key vocabulary the tracker and session understand.
//! Hosts translate their own events (crossterm, DOM `KeyboardEvent.key`, ...)
//! into a `Key` before handing them to the session.

/// Word-boundary character that triggers a suggestion fetch.
pub const TRIGGER_CHAR: char = ' ';

/// A single key press as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A visible character (letters, digits, punctuation, space).
    Char(char),
    Backspace,
    Delete,
    /// The accept gesture.
    Tab,
    Enter,
    Escape,
    Left,
    Right,
    Home,
    End,
    /// Anything else (modifiers, function keys, ...). Carries the host's name for logging.
    Other(String),
}

impl Key {
    /// Parse a DOM-style key name (`"Backspace"`, `"a"`, `" "`, `"ArrowLeft"`).
    ///
    /// A name consisting of exactly one character is a visible character,
    /// so `"Shift"` is `Other` but `"S"` is `Char('S')`.
    pub fn from_name(name: &str) -> Key {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }
        match name {
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Tab" => Key::Tab,
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "Home" => Key::Home,
            "End" => Key::End,
            other => Key::Other(other.to_string()),
        }
    }

    /// Returns the character for visible keys.
    pub fn visible_char(&self) -> Option<char> {
        match self {
            Key::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self, Key::Char(TRIGGER_CHAR))
    }
}
