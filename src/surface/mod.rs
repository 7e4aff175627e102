//! # Surface Boundary
//!
//! Everything the session touches on the host side goes through the traits
//! in this module. The host owns the editable content; we only get handles.
//!
//! ```text
//!   SurfaceProbe ──discover()──▶ SurfaceHandles { body, subject }
//!                                      │
//!   OverlayRenderer ◀──── Session ─────┘
//! ```
//!
//! ## Modules
//!
//! - [`memory`]: In-process handles backed by shared buffers. Used by tests
//!   and by hosts that keep the text in memory themselves.

pub mod memory;

use std::time::Duration;

use log::{debug, info};

/// The externally-owned editable text container.
pub trait EditableSurface {
    /// Richest text representation the host offers, if it has one right now.
    fn rich_text(&self) -> Option<String>;

    /// Plainer fallback representation.
    fn plain_text(&self) -> Option<String> {
        None
    }

    /// Current plain text content. A surface with no readable text reads as empty.
    fn read_text(&self) -> String {
        self.rich_text()
            .or_else(|| self.plain_text())
            .unwrap_or_default()
    }

    /// Insert `text` at the logical end and move the input cursor after it.
    fn append_text(&mut self, text: &str);
}

/// The plain single-line field whose value is sent as suggestion context.
pub trait SubjectField {
    fn value(&self) -> String;
}

/// Draws the ghost-text annotation attached to the surface.
///
/// Implementations keep at most one annotation alive: `show` replaces,
/// `clear` on nothing is a no-op.
pub trait OverlayRenderer {
    fn show(&mut self, text: &str);
    fn clear(&mut self);
}

/// Both handles a session needs, delivered together once they exist.
#[derive(Debug, Clone)]
pub struct SurfaceHandles<B, F> {
    pub body: B,
    pub subject: F,
}

/// Host-specific lookup for the two handles. Each call is a fresh query.
pub trait SurfaceProbe {
    type Body: EditableSurface;
    type Subject: SubjectField;

    fn find_body(&mut self) -> Option<Self::Body>;
    fn find_subject(&mut self) -> Option<Self::Subject>;
}

/// Poll `probe` every `poll_interval` until both handles are present.
///
/// The first query happens immediately. The returned future never resolves
/// if the surface never appears; callers that need a deadline wrap it in
/// `tokio::time::timeout`. A zero interval is treated as one millisecond.
pub async fn discover<P: SurfaceProbe>(
    probe: &mut P,
    poll_interval: Duration,
) -> SurfaceHandles<P::Body, P::Subject> {
    let mut ticker = tokio::time::interval(poll_interval.max(Duration::from_millis(1)));
    let mut attempts = 0u32;
    loop {
        ticker.tick().await;
        attempts += 1;
        match (probe.find_body(), probe.find_subject()) {
            (Some(body), Some(subject)) => {
                info!("Editable surface found after {} probe(s)", attempts);
                return SurfaceHandles { body, subject };
            }
            (body, subject) => {
                debug!(
                    "Probe {}: body={}, subject={}",
                    attempts,
                    body.is_some(),
                    subject.is_some()
                );
            }
        }
    }
}
