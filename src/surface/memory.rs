//! In-memory surface handles.
//!
//! Each handle is a cheap clone pointing at shared content, the same way a
//! DOM node reference points at a node someone else owns. Tests keep a clone
//! to play the part of the host and mutate the content behind the session's
//! back.

use std::sync::{Arc, Mutex, MutexGuard};

use super::{EditableSurface, OverlayRenderer, SubjectField};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
struct SurfaceContent {
    text: String,
    /// Byte offset of the input cursor.
    cursor: usize,
    /// When false the rich representation is unavailable and reads fall back to plain.
    rich_available: bool,
    appends: usize,
}

#[derive(Debug, Clone)]
pub struct MemorySurface {
    inner: Arc<Mutex<SurfaceContent>>,
}

impl MemorySurface {
    pub fn new(text: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SurfaceContent {
                text: text.to_string(),
                cursor: text.len(),
                rich_available: true,
                appends: 0,
            })),
        }
    }

    /// Simulate the host inserting a typed character at its cursor.
    pub fn type_char(&self, c: char) {
        let mut content = lock(&self.inner);
        let at = content.cursor;
        content.text.insert(at, c);
        content.cursor += c.len_utf8();
    }

    /// Simulate the host deleting the character before its cursor.
    pub fn backspace(&self) {
        let mut content = lock(&self.inner);
        let at = content.cursor;
        if let Some((prev, _)) = content.text[..at].char_indices().next_back() {
            content.text.drain(prev..at);
            content.cursor = prev;
        }
    }

    /// Replace the whole content, as autocorrect or a script would.
    pub fn set_text(&self, text: &str) {
        let mut content = lock(&self.inner);
        content.text = text.to_string();
        content.cursor = content.text.len();
    }

    pub fn set_rich_available(&self, available: bool) {
        lock(&self.inner).rich_available = available;
    }

    pub fn text(&self) -> String {
        lock(&self.inner).text.clone()
    }

    pub fn cursor(&self) -> usize {
        lock(&self.inner).cursor
    }

    /// Number of `append_text` calls made through any handle.
    pub fn append_count(&self) -> usize {
        lock(&self.inner).appends
    }
}

impl EditableSurface for MemorySurface {
    fn rich_text(&self) -> Option<String> {
        let content = lock(&self.inner);
        content.rich_available.then(|| content.text.clone())
    }

    fn plain_text(&self) -> Option<String> {
        Some(lock(&self.inner).text.clone())
    }

    fn append_text(&mut self, text: &str) {
        let mut content = lock(&self.inner);
        content.text.push_str(text);
        content.cursor = content.text.len();
        content.appends += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryField {
    value: Arc<Mutex<String>>,
}

impl MemoryField {
    pub fn new(value: &str) -> Self {
        Self {
            value: Arc::new(Mutex::new(value.to_string())),
        }
    }

    pub fn set(&self, value: &str) {
        *lock(&self.value) = value.to_string();
    }
}

impl SubjectField for MemoryField {
    fn value(&self) -> String {
        lock(&self.value).clone()
    }
}

/// Overlay that records annotation nodes the way a DOM would hold them.
#[derive(Debug, Clone, Default)]
pub struct MemoryOverlay {
    nodes: Arc<Mutex<Vec<String>>>,
}

impl MemoryOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of annotation nodes currently attached.
    pub fn node_count(&self) -> usize {
        lock(&self.nodes).len()
    }

    /// Text of the attached annotation, if any.
    pub fn visible_text(&self) -> Option<String> {
        lock(&self.nodes).last().cloned()
    }
}

impl OverlayRenderer for MemoryOverlay {
    fn show(&mut self, text: &str) {
        let mut nodes = lock(&self.nodes);
        nodes.clear();
        if !text.is_empty() {
            nodes.push(text.to_string());
        }
    }

    fn clear(&mut self) {
        lock(&self.nodes).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_moves_cursor_to_end() {
        let mut surface = MemorySurface::new("Hi");
        let host = surface.clone();
        surface.append_text(" there");

        assert_eq!(host.text(), "Hi there");
        assert_eq!(host.cursor(), "Hi there".len());
        assert_eq!(host.append_count(), 1);
    }

    #[test]
    fn test_typing_and_backspace_follow_cursor() {
        let surface = MemorySurface::new("");
        surface.type_char('a');
        surface.type_char('ß');
        surface.backspace();
        assert_eq!(surface.text(), "a");
        surface.backspace();
        surface.backspace();
        assert_eq!(surface.text(), "");
    }

    #[test]
    fn test_rich_text_unavailable_reads_plain() {
        let surface = MemorySurface::new("body");
        surface.set_rich_available(false);
        assert_eq!(surface.rich_text(), None);
        assert_eq!(surface.read_text(), "body");
    }

    #[test]
    fn test_overlay_never_holds_more_than_one_node() {
        let mut overlay = MemoryOverlay::new();
        let ops: [Option<&str>; 7] = [
            Some("one"),
            Some("two"),
            None,
            None,
            Some("three"),
            Some(""),
            Some("four"),
        ];
        for op in ops {
            match op {
                Some(text) => overlay.show(text),
                None => overlay.clear(),
            }
            assert!(overlay.node_count() <= 1);
        }
        assert_eq!(overlay.visible_text().as_deref(), Some("four"));
    }

    #[test]
    fn test_overlay_show_empty_clears() {
        let mut overlay = MemoryOverlay::new();
        overlay.show("ghost");
        overlay.show("");
        assert_eq!(overlay.node_count(), 0);
    }

    #[test]
    fn test_subject_field_shared_between_handles() {
        let field = MemoryField::new("Draft");
        let other = field.clone();
        other.set("Final");
        assert_eq!(field.value(), "Final");
    }
}
