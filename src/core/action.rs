//! # Actions
//!
//! Everything that can happen to a session becomes an `Action`.
//! User presses a key? That's `Action::Key(key)`.
//! The suggestion service answers? That's `Action::SuggestionReady { .. }`.
//! The reconciliation timer fires? That's `Action::Resync`.
//!
//! The `update()` function applies one action to the session and returns the
//! `Effect` the host has to carry out. No I/O happens here.
//!
//! ```text
//! Session + Action  →  update()  →  Effect
//! ```
//!
//! Hosts feed actions from a single queue, one at a time. That ordering is the
//! whole concurrency story: a resync tick is its own action and can never land
//! between a key's tracker update and its trigger check.

use log::debug;

use crate::core::key::Key;
use crate::core::session::Session;
use crate::inference::SuggestionRequest;
use crate::surface::{EditableSurface, OverlayRenderer, SubjectField};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Key(Key),
    SuggestionReady { seq: u64, suggestion: String },
    Resync,
}

/// A fetch the host should run, tagged with the sequence number to report back.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub seq: u64,
    pub request: SuggestionRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The key was handled; the host must suppress its default behavior.
    Consumed,
    /// Start a suggestion fetch and post the result back as `SuggestionReady`.
    Fetch(FetchRequest),
    /// Resync replaced the tracked text.
    DriftCorrected,
}

pub fn update<B, F, O>(session: &mut Session<B, F, O>, action: Action) -> Effect
where
    B: EditableSurface,
    F: SubjectField,
    O: OverlayRenderer,
{
    match action {
        Action::Key(key) => session.handle_key(&key),
        Action::SuggestionReady { seq, suggestion } => {
            session.apply_suggestion(seq, suggestion);
            Effect::None
        }
        Action::Resync => {
            if session.resync() {
                debug!("Resync corrected tracked text");
                Effect::DriftCorrected
            } else {
                Effect::None
            }
        }
    }
}
