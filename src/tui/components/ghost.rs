//! Overlay renderer for the terminal host.
//!
//! The terminal has no DOM to attach a node to, so the "annotation" is a slot
//! holding the ghost text. The composer draws whatever is in the slot.

use log::debug;

use crate::surface::OverlayRenderer;

#[derive(Debug, Default)]
pub struct GhostOverlay {
    text: Option<String>,
}

impl GhostOverlay {
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl OverlayRenderer for GhostOverlay {
    fn show(&mut self, text: &str) {
        self.text = (!text.is_empty()).then(|| text.to_string());
        debug!("Ghost overlay: {:?}", self.text);
    }

    fn clear(&mut self) {
        self.text = None;
    }
}
