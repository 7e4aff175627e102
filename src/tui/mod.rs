//! # TUI Adapter
//!
//! The ratatui host for a ghost-text session. It plays the part of the page:
//! a composer the user types into, a subject line, and an overlay slot that
//! the composer draws as dim italic text after the body.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Ordering
//!
//! The loop is the session's single event queue. Key presses, fetch
//! completions from spawned tasks, and resync ticks are all turned into
//! `core::Action` values and applied one at a time, so a resync never lands
//! in the middle of a keystroke.
//!
//! Keys go to the session before the composer sees them, the way a page's
//! keydown listener runs before the default action. When the session reports
//! `Effect::Consumed` (Tab accepting a suggestion) the composer never sees
//! the key.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
pub mod components;
mod event;
pub mod surface;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio::sync::mpsc;

use crate::core::config::ResolvedConfig;
use crate::core::{Action, Effect, Session, update};
use crate::inference::{AutocompleteProvider, SuggestionClient};
use crate::runtime::spawn_fetch;
use crate::surface::{EditableSurface, discover};
use crate::tui::component::EventHandler;
use crate::tui::components::GhostOverlay;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::surface::TerminalProbe;
use crate::tui::ui::TerminalSession;

/// How long the loop waits for input before checking completions and resync.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// What happened to the loop after handling one event.
enum Flow {
    Continue,
    Finish,
    Quit,
}

/// Build the suggestion client from resolved config.
pub fn build_client(config: &ResolvedConfig) -> std::io::Result<SuggestionClient> {
    let provider =
        AutocompleteProvider::new(Some(config.service_url.clone()), config.request_timeout)
            .map_err(std::io::Error::other)?;
    info!("Suggestion service at {}", provider.base_url());
    Ok(SuggestionClient::new(Arc::new(provider)))
}

/// Run the composer until the user finishes (returns the body) or quits (`None`).
pub async fn run(config: &ResolvedConfig, subject: String) -> std::io::Result<Option<String>> {
    let client = build_client(config)?;

    let mut probe = TerminalProbe::new(subject);
    let handles = discover(&mut probe, config.discovery_poll).await;
    let mut session: TerminalSession = Session::new(handles, GhostOverlay::default());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Fetch completions from background tasks
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

    let mut last_resync = Instant::now();
    let mut note = String::new();
    let mut needs_redraw = true;

    let outcome = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &mut session, &note)) {
                ratatui::restore();
                return Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(POLL_INTERVAL);

        let mut flow = Flow::Continue;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            flow = handle_event(&mut session, &client, &tx, &event, &mut note);
            if !matches!(flow, Flow::Continue) {
                break;
            }
        }
        match flow {
            Flow::Continue => {}
            Flow::Finish => break Some(session.body().read_text()),
            Flow::Quit => break None,
        }

        while let Ok(action) = rx.try_recv() {
            update(&mut session, action);
            needs_redraw = true;
        }

        if last_resync.elapsed() >= config.resync_interval {
            last_resync = Instant::now();
            if update(&mut session, Action::Resync) == Effect::DriftCorrected {
                note = "Drift corrected".to_string();
                needs_redraw = true;
            }
        }
    };

    ratatui::restore();
    info!("Composer closed ({})", if outcome.is_some() { "finished" } else { "quit" });
    Ok(outcome)
}

fn handle_event(
    session: &mut TerminalSession,
    client: &SuggestionClient,
    tx: &mpsc::UnboundedSender<Action>,
    event: &TuiEvent,
    note: &mut String,
) -> Flow {
    match event {
        TuiEvent::Key(key) => {
            note.clear();
            match update(session, Action::Key(key.clone())) {
                Effect::Consumed => {
                    debug!("Tab consumed by accept");
                    return Flow::Continue;
                }
                Effect::Fetch(fetch) => {
                    spawn_fetch(client.clone(), fetch, tx.clone());
                }
                Effect::None | Effect::DriftCorrected => {}
            }
            session.body_mut().handle_event(event);
        }
        TuiEvent::Paste(_) => {
            session.body_mut().handle_event(event);
        }
        TuiEvent::Finish => return Flow::Finish,
        TuiEvent::Quit => return Flow::Quit,
        TuiEvent::Resize => {}
    }
    Flow::Continue
}
