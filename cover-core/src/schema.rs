//! Persisted project document shared with the save/load collaborator.

use serde::{Deserialize, Serialize};

use crate::editor::Editor;
use crate::element::Element;
use crate::error::{CoreError, CoreResult};
use crate::scene::Scene;

/// The on-disk/record form of a project.
///
/// Round-trip contract: loading a saved record and re-saving it immediately
/// reproduces an equivalent element list; element ids are regenerated on
/// load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDocument {
    /// Canvas width in canvas units.
    pub canvas_width: u32,
    /// Canvas height in canvas units.
    pub canvas_height: u32,
    /// Elements in paint order, bottom first.
    pub elements: Vec<Element>,
    /// View zoom at save time.
    pub zoom: f32,
    /// Save timestamp, milliseconds since the Unix epoch.
    pub saved_at: u64,
}

impl ProjectDocument {
    /// Capture a scene into a document.
    #[must_use]
    pub fn from_scene(scene: &Scene, saved_at: u64) -> Self {
        Self {
            canvas_width: scene.canvas_width,
            canvas_height: scene.canvas_height,
            elements: scene.elements().cloned().collect(),
            zoom: scene.zoom(),
            saved_at,
        }
    }

    /// Serialize to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(CoreError::Serialization)
    }

    /// Parse a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Serialization`] on parse failure and
    /// [`CoreError::InvalidDocument`] when the record is structurally valid
    /// but violates document constraints (zero canvas dimensions).
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let doc: Self = serde_json::from_str(json)?;
        if doc.canvas_width == 0 || doc.canvas_height == 0 {
            return Err(CoreError::InvalidDocument(format!(
                "canvas dimensions {}x{} are not positive",
                doc.canvas_width, doc.canvas_height
            )));
        }
        Ok(doc)
    }

    /// Load this document into an editor.
    ///
    /// The element collection is replaced through the template path (fresh
    /// ids, selection cleared, one history entry), then canvas size and
    /// zoom are applied.
    pub fn apply(self, editor: &mut Editor) {
        editor.load_template(self.elements);
        editor.set_canvas_size(self.canvas_width, self.canvas_height);
        editor.set_zoom(self.zoom);
    }
}
