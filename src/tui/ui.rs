use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::core::Session;
use crate::tui::component::Component;
use crate::tui::components::{Composer, GhostOverlay, TitleBar};
use crate::tui::surface::SubjectLine;

pub type TerminalSession = Session<Composer, SubjectLine, GhostOverlay>;

const HINTS: &str = "Space: suggest · Tab: accept · Enter: finish · Esc: quit";

/// Status text derived from the session, falling back to the loop's last note.
pub fn status_line(session: &TerminalSession, note: &str) -> String {
    if session.state().is_active() {
        "Tab to accept".to_string()
    } else if session.pending_fetch().is_some() {
        "Fetching suggestion...".to_string()
    } else {
        note.to_string()
    }
}

pub fn draw_ui(frame: &mut Frame, session: &mut TerminalSession, note: &str) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(3), Length(1)]);
    let [title_area, body_area, hint_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(session.subject().0.clone(), status_line(session, note));
    title_bar.render(frame, title_area);

    // Sync the composer's ghost prop with the overlay
    let ghost = session.overlay().text().map(str::to_owned);
    let composer = session.body_mut();
    composer.ghost = ghost;
    composer.render(frame, body_area);

    frame.render_widget(
        Span::styled(HINTS, Style::default().add_modifier(Modifier::DIM)),
        hint_area,
    );
}
