//! Surface discovery for the terminal host.
//!
//! The composer and subject exist as soon as the demo starts, so the probe
//! hands them out on the first query.

use crate::surface::{SubjectField, SurfaceProbe};
use crate::tui::components::Composer;

/// Fixed subject line entered before the composer opens.
#[derive(Debug, Clone)]
pub struct SubjectLine(pub String);

impl SubjectField for SubjectLine {
    fn value(&self) -> String {
        self.0.clone()
    }
}

pub struct TerminalProbe {
    composer: Option<Composer>,
    subject: String,
}

impl TerminalProbe {
    pub fn new(subject: String) -> Self {
        Self {
            composer: Some(Composer::new()),
            subject,
        }
    }
}

impl SurfaceProbe for TerminalProbe {
    type Body = Composer;
    type Subject = SubjectLine;

    fn find_body(&mut self) -> Option<Composer> {
        self.composer.take()
    }

    fn find_subject(&mut self) -> Option<SubjectLine> {
        Some(SubjectLine(self.subject.clone()))
    }
}
