//! # TitleBar Component
//!
//! Top status bar: the subject being written under and the session status.
//!
//! Purely presentational. It receives everything as props and has no
//! internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(subject.clone(), "Tab to accept".to_string());
//! title_bar.render(frame, area);
//! ```
//!
//! The title text is `"Ghostwrite | Subject: <subject> | <status>"`, with the
//! status part dropped when empty.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Subject sent as suggestion context
    pub subject: String,
    /// Transient status (e.g. "Fetching suggestion...", "Tab to accept")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(subject: String, status_message: String) -> Self {
        Self {
            subject,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("Ghostwrite", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" | Subject: {}", self.subject)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
