//! # Surface Session
//!
//! One `Session` per discovered editable surface. It owns everything that
//! used to be loose per-page state: the tracked text, the suggestion state,
//! the overlay, and the fetch sequence counter.
//!
//! ```text
//! Session
//! ├── body: B                  // editable surface handle (ground truth)
//! ├── subject: F               // context field handle
//! ├── overlay: O               // ghost-text renderer
//! ├── tracker: InputTracker    // what we believe was typed
//! ├── state: SuggestionState   // Inactive | Active { suggestion }
//! ├── last_seq: u64            // last fetch sequence number issued
//! ├── pending: Option<u64>     // fetch whose result may still apply
//! └── last_accept: Option<String> // surface text right after the last accept
//! ```
//!
//! A fetch result applies only if its sequence number is still `pending`.
//! Dispatching a newer fetch, dismissing, or accepting all move `pending`
//! away, which is how late responses get dropped without cancelling them.

use log::{debug, info};

use crate::core::action::{Effect, FetchRequest};
use crate::core::key::{Key, TRIGGER_CHAR};
use crate::core::state::SuggestionState;
use crate::core::tracker::InputTracker;
use crate::inference::SuggestionRequest;
use crate::surface::{EditableSurface, OverlayRenderer, SubjectField, SurfaceHandles};

pub struct Session<B, F, O> {
    body: B,
    subject: F,
    overlay: O,
    tracker: InputTracker,
    state: SuggestionState,
    last_seq: u64,
    pending: Option<u64>,
    last_accept: Option<String>,
}

impl<B, F, O> Session<B, F, O>
where
    B: EditableSurface,
    F: SubjectField,
    O: OverlayRenderer,
{
    /// Start observing a surface. Tracking begins from the surface's current text.
    pub fn new(handles: SurfaceHandles<B, F>, overlay: O) -> Self {
        let SurfaceHandles { body, subject } = handles;
        let mut tracker = InputTracker::new();
        tracker.replace(&body.read_text());
        Self {
            body,
            subject,
            overlay,
            tracker,
            state: SuggestionState::Inactive,
            last_seq: 0,
            pending: None,
            last_accept: None,
        }
    }

    pub fn tracked_text(&self) -> &str {
        self.tracker.text()
    }

    pub fn state(&self) -> &SuggestionState {
        &self.state
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    /// Mutable access for hosts that drive the surface themselves.
    /// Edits made through it are invisible to the tracker until the next resync.
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn subject(&self) -> &F {
        &self.subject
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Sequence number of the fetch whose result is still wanted.
    pub fn pending_fetch(&self) -> Option<u64> {
        self.pending
    }

    /// Run one key through tracking, dismiss, trigger, and accept, in that order.
    pub fn handle_key(&mut self, key: &Key) -> Effect {
        self.tracker.on_key(key);

        if key.visible_char().is_some() {
            self.dismiss();
        }

        if key.is_trigger() && self.tracker.text().ends_with(TRIGGER_CHAR) {
            return Effect::Fetch(self.dispatch_fetch());
        }

        if *key == Key::Tab && self.accept() {
            return Effect::Consumed;
        }

        Effect::None
    }

    /// Drop the visible suggestion and forget any in-flight fetch.
    pub fn dismiss(&mut self) {
        if self.state.is_active() {
            debug!("Dismissing active suggestion");
            self.overlay.clear();
            self.state = SuggestionState::Inactive;
        }
        if let Some(seq) = self.pending.take() {
            debug!("Fetch #{} superseded by typing", seq);
        }
    }

    fn dispatch_fetch(&mut self) -> FetchRequest {
        self.last_seq += 1;
        self.pending = Some(self.last_seq);
        let request = SuggestionRequest::new(self.subject.value(), self.tracker.text());
        debug!(
            "Dispatching fetch #{} (prefix {} bytes)",
            self.last_seq,
            request.prefix.len()
        );
        FetchRequest {
            seq: self.last_seq,
            request,
        }
    }

    /// Apply a fetch result. Returns `true` if a suggestion is now showing.
    pub fn apply_suggestion(&mut self, seq: u64, suggestion: String) -> bool {
        if self.pending != Some(seq) {
            debug!(
                "Discarding stale fetch #{} (pending: {:?})",
                seq, self.pending
            );
            return false;
        }
        self.pending = None;

        if suggestion.is_empty() {
            self.overlay.clear();
            self.state = SuggestionState::Inactive;
            return false;
        }

        self.overlay.show(&suggestion);
        self.state = SuggestionState::Active { suggestion };
        true
    }

    /// Commit the active suggestion into the surface.
    ///
    /// Returns `false` (and does nothing) when no suggestion is active.
    /// The append is skipped only when it would repeat the previous accept
    /// onto an unchanged surface; a suggestion that merely matches the last
    /// typed word is still appended.
    pub fn accept(&mut self) -> bool {
        let SuggestionState::Active { suggestion } = std::mem::take(&mut self.state) else {
            return false;
        };
        self.overlay.clear();
        self.pending = None;

        let appended = format!("{suggestion}{TRIGGER_CHAR}");
        let current = self.body.read_text();
        let repeat = self.last_accept.as_deref() == Some(current.as_str())
            && current.ends_with(&appended);
        if repeat {
            debug!("Surface already ends with this accept; skipping append");
        } else {
            self.body.append_text(&appended);
            info!("Accepted suggestion ({} bytes)", suggestion.len());
        }

        let text = self.body.read_text();
        self.tracker.replace(&text);
        self.last_accept = Some(text);
        true
    }

    /// Reconcile the tracker against the surface. Returns `true` on drift.
    pub fn resync(&mut self) -> bool {
        let actual = self.body.read_text();
        self.tracker.resync(&actual)
    }
}
