//! Clipboard-style interchange for copied elements.
//!
//! The payload is a JSON array of element records. Malformed or missing
//! data is tolerated: paste treats it as empty, warns, and leaves the
//! scene untouched.

use crate::editor::{Editor, DUPLICATE_OFFSET};
use crate::element::{Element, ElementId};
use crate::scene::Scene;

/// Holds the serialized form of the last copy.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    payload: Option<String>,
}

impl Clipboard {
    /// Create an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the scene's selected elements, in paint order.
    ///
    /// An empty selection leaves the clipboard unchanged.
    pub fn copy(&mut self, scene: &Scene) {
        let selected: Vec<&Element> = scene
            .elements()
            .filter(|el| scene.is_selected(el.id))
            .collect();
        if selected.is_empty() {
            return;
        }
        match serde_json::to_string(&selected) {
            Ok(json) => self.payload = Some(json),
            Err(e) => tracing::warn!("clipboard copy failed to serialize: {e}"),
        }
    }

    /// Load the clipboard from an externally produced payload.
    pub fn set_payload(&mut self, payload: impl Into<String>) {
        self.payload = Some(payload.into());
    }

    /// Current payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Deserialize the payload and add the elements through the batch path.
    ///
    /// Pasted elements get fresh ids and a fixed position offset. Returns
    /// the new ids; malformed data pastes nothing.
    pub fn paste(&self, editor: &mut Editor) -> Vec<ElementId> {
        let Some(payload) = &self.payload else {
            return Vec::new();
        };
        let mut elements: Vec<Element> = match serde_json::from_str(payload) {
            Ok(elements) => elements,
            Err(e) => {
                tracing::warn!("ignoring malformed clipboard payload: {e}");
                return Vec::new();
            }
        };
        for el in &mut elements {
            el.x += DUPLICATE_OFFSET;
            el.y += DUPLICATE_OFFSET;
        }
        editor.add_elements(elements)
    }
}
