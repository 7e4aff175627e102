use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Key;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    /// A key for the session and the composer
    Key(Key),
    /// Bracketed paste. Goes straight into the composer; the tracker only sees it on resync.
    Paste(String),
    /// Enter: done writing
    Finish,
    /// Esc or Ctrl+C: leave without a result
    Quit,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, waiting at most `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) => map_key(key_event),
        Ok(Event::Paste(data)) => Some(TuiEvent::Paste(data)),
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Translate a crossterm key event. Release/repeat reports are dropped.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    let event = match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => TuiEvent::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char(c)) => TuiEvent::Key(Key::Other(format!("Ctrl+{c}"))),
        (_, KeyCode::Char(c)) => TuiEvent::Key(Key::Char(c)),
        (_, KeyCode::Tab) => TuiEvent::Key(Key::Tab),
        (_, KeyCode::Backspace) => TuiEvent::Key(Key::Backspace),
        (_, KeyCode::Delete) => TuiEvent::Key(Key::Delete),
        (_, KeyCode::Left) => TuiEvent::Key(Key::Left),
        (_, KeyCode::Right) => TuiEvent::Key(Key::Right),
        (_, KeyCode::Home) => TuiEvent::Key(Key::Home),
        (_, KeyCode::End) => TuiEvent::Key(Key::End),
        (_, KeyCode::Enter) => TuiEvent::Finish,
        (_, KeyCode::Esc) => TuiEvent::Quit,
        (_, other) => TuiEvent::Key(Key::Other(format!("{other:?}"))),
    };
    Some(event)
}
