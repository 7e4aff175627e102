//! # Composer Component
//!
//! The editable text area the session annotates. From the session's point of
//! view this is a third-party editor: it edits itself on key events at its own
//! cursor, takes pastes the tracker never sees, and only exposes its text
//! through [`EditableSurface`].
//!
//! ## Responsibilities
//!
//! - Capture text input at the cursor (insert, backspace, delete, paste)
//! - Cursor movement (left, right, home, end)
//! - Render the buffer with the ghost text prop trailing it, dim and italic
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. The ghost text is a prop synced
//! from the session's overlay before each draw.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::Key;
use crate::surface::EditableSurface;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, VERTICAL_OVERHEAD, cursor_cell, inner_width, layout_rows,
    next_char_boundary, prev_char_boundary,
};

/// High-level events emitted by the Composer
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    /// Buffer text changed
    ContentChanged,
    /// Only the cursor moved
    CursorMoved,
}

/// Multi-line text area with trailing ghost text.
///
/// # Props
///
/// - `ghost`: Suggestion to draw after the content (from the session overlay)
///
/// # State
///
/// - `buffer`: Current text
/// - `cursor`: Byte offset into `buffer`
/// - `scroll_offset`: First visible row
pub struct Composer {
    buffer: String,
    cursor: usize,
    scroll_offset: u16,
    /// Ghost text (Prop)
    pub ghost: Option<String>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_offset: 0,
            ghost: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Apply an editing key. Returns `None` when nothing changed.
    fn apply_key(&mut self, key: &Key) -> Option<ComposerEvent> {
        match key {
            Key::Char(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(ComposerEvent::ContentChanged)
            }
            Key::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                ComposerEvent::ContentChanged
            }),
            Key::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                ComposerEvent::ContentChanged
            }),
            Key::Left => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                ComposerEvent::CursorMoved
            }),
            Key::Right => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                ComposerEvent::CursorMoved
            }),
            Key::Home => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    ComposerEvent::CursorMoved
                })
            }
            Key::End => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    ComposerEvent::CursorMoved
                })
            }
            // Tab, Enter, Escape and unknown keys are not edits here.
            _ => None,
        }
    }

    /// Keep the cursor row inside the visible rows.
    fn update_scroll_offset(&mut self, cursor_row: u16, visible_rows: u16) {
        let visible_rows = visible_rows.max(1);
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + visible_rows {
            self.scroll_offset = cursor_row + 1 - visible_rows;
        }
    }
}

impl EditableSurface for Composer {
    fn rich_text(&self) -> Option<String> {
        Some(self.buffer.clone())
    }

    fn append_text(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.cursor = self.buffer.len();
    }
}

impl Component for Composer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let visible_rows = area.height.saturating_sub(VERTICAL_OVERHEAD);

        let text_style = Style::default().fg(Color::Green);
        let ghost_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC);
        let rows = layout_rows(
            &self.buffer,
            text_style,
            self.ghost.as_deref(),
            ghost_style,
            width,
        );

        let (cursor_row, cursor_col) = cursor_cell(&self.buffer[..self.cursor], width);
        self.update_scroll_offset(cursor_row, visible_rows);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title("Body");

        let paragraph = Paragraph::new(rows)
            .block(block)
            .scroll((self.scroll_offset, 0));
        frame.render_widget(paragraph, area);

        let x = area.x + CONTENT_OFFSET_X + cursor_col;
        let y = area.y + CONTENT_OFFSET_Y + (cursor_row - self.scroll_offset);
        frame.set_cursor_position((x, y));
    }
}

impl EventHandler for Composer {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Key(key) => self.apply_key(key),
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                Some(ComposerEvent::ContentChanged)
            }
            _ => None,
        }
    }
}
